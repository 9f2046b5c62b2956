//! Parser limits

use serde::Deserialize;

/// Limits applied while parsing a statement
#[derive(Debug, Clone, Deserialize)]
pub struct ParserConfig {
    /// Maximum nesting of parenthesized conditions and nested calls
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
}

fn default_max_depth() -> usize {
    64
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
        }
    }
}
