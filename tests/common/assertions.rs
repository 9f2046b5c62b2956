use pretty_assertions::assert_eq;
use tql_ast::{ParsedQuery, ToTql};

/// Assert that parsing succeeds
pub fn assert_parses(source: &str) -> ParsedQuery {
    tql_parser::parse(source)
        .unwrap_or_else(|e| panic!("Expected `{}` to parse, got {:?}", source, e))
}

/// Assert that parsing fails
pub fn assert_parse_fails(source: &str) -> tql_parser::ParseError {
    match tql_parser::parse(source) {
        Ok(query) => panic!("Expected `{}` to fail parsing, got {:?}", source, query),
        Err(e) => e,
    }
}

/// Printing then re-parsing reaches a fixed point
pub fn assert_round_trips(source: &str) {
    let canonical = assert_parses(source).to_tql();
    let reparsed = assert_parses(&canonical);
    assert_eq!(reparsed.to_tql(), canonical, "canonical form of `{}` is unstable", source);
    assert_eq!(assert_parses(&canonical), reparsed);
}
