//! Query neutralization for parse-failure recovery.
//!
//! When a query does not parse as written, it is retried once as plain
//! terms: query syntax characters become word separators and dangling
//! boolean operators are dropped.
//! - `title:foo (bar` keeps the `title:` qualifier: `title:foo bar`
//! - anything else is rewritten as a whole, so `Rust: the book` becomes
//!   `Rust the book`

use crate::core::storage::schema::QUERYABLE_FIELDS;
use once_cell::sync::Lazy;
use regex::Regex;

// Leading `field:value` qualifier
static QUALIFIER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*([A-Za-z_][A-Za-z0-9_]*):(.*)$").unwrap());

/// Characters the query grammar gives meaning to
const SYNTAX_CHARS: &[char] = &[
    ':', '{', '}', '[', ']', '(', ')', '"', '\'', '`', '\\', '+', '-', '!', '^', '~', '*', '<',
    '>', '=', '&', '|', '@', '/',
];

const OPERATORS: [&str; 3] = ["AND", "OR", "NOT"];

/// Rewrite a query so it parses as plain terms.
///
/// A leading qualifier is kept only when it names a queryable schema
/// field and something is left of its value.
///
/// # Examples
///
/// ```
/// use blogdex::core::search::escape_query;
///
/// assert_eq!(escape_query("foo AND (bar"), "foo AND bar");
/// assert_eq!(escape_query("title:[draft"), "title:draft");
/// assert_eq!(escape_query("nope:[draft"), "nope draft");
/// ```
pub fn escape_query(query: &str) -> String {
    if let Some(caps) = QUALIFIER_PATTERN.captures(query) {
        let field = &caps[1];
        let value = plain_terms(&caps[2]);
        if QUERYABLE_FIELDS.contains(&field) && !value.is_empty() {
            return format!("{field}:{value}");
        }
    }

    plain_terms(query)
}

/// True if the query starts with a qualifier naming a queryable field
pub fn has_field_qualifier(query: &str) -> bool {
    QUALIFIER_PATTERN
        .captures(query)
        .map(|caps| QUERYABLE_FIELDS.contains(&&caps[1]))
        .unwrap_or(false)
}

fn is_operator(word: &str) -> bool {
    OPERATORS.contains(&word)
}

/// Split on whitespace and syntax characters, keeping boolean
/// operators only where they join two terms.
fn plain_terms(s: &str) -> String {
    let mut words: Vec<&str> = Vec::new();
    for word in s
        .split(|c: char| c.is_whitespace() || SYNTAX_CHARS.contains(&c))
        .filter(|w| !w.is_empty())
    {
        if is_operator(word) {
            let joins = match words.last() {
                None => word == "NOT",
                Some(&prev) if is_operator(prev) => word == "NOT" && prev != "NOT",
                Some(_) => true,
            };
            if !joins {
                continue;
            }
        }
        words.push(word);
    }

    while words.last().is_some_and(|w| is_operator(w)) {
        words.pop();
    }

    words.join(" ")
}
