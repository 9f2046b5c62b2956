//! Splitting statement files into individual statements

/// One statement and where it sits in the file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Statement<'a> {
    /// 1-based line number
    pub line: usize,
    /// Byte offset of `text` within the file
    pub offset: usize,
    pub text: &'a str,
}

/// One statement per line; blank lines and `#` comments are skipped
pub fn split(source: &str) -> Vec<Statement<'_>> {
    let mut statements = Vec::new();
    let mut line_start = 0;

    for (index, raw) in source.split_inclusive('\n').enumerate() {
        let line = raw.trim_end_matches(['\n', '\r']);
        let text = line.trim();
        if !text.is_empty() && !text.starts_with('#') {
            let leading = line.len() - line.trim_start().len();
            statements.push(Statement {
                line: index + 1,
                offset: line_start + leading,
                text,
            });
        }
        line_start += raw.len();
    }

    statements
}
