//! Function body location
//!
//! Finds `<name> (` in the text, takes the first `{` after it and scans forward
//! counting brace depth until the matching `}`. Purely textual: braces inside
//! string literals or comments are counted like any other.

use regex::Regex;

use crate::features::extraction::domain::ExtractionMiss;

/// Regex matching `<name>` followed by optional whitespace and `(`
pub fn function_pattern(function: &str) -> Option<Regex> {
    if function.is_empty() {
        return None;
    }
    Regex::new(&format!(r"\b{}\s*\(", regex::escape(function))).ok()
}

/// Whether `text` mentions the function name followed by `(`
pub fn mentions_function(text: &str, function: &str) -> bool {
    function_pattern(function)
        .map(|re| re.is_match(text))
        .unwrap_or(false)
}

/// Extract the body of `function`, braces included
pub fn locate_body<'a>(text: &'a str, function: &str) -> Result<&'a str, ExtractionMiss> {
    let pattern = function_pattern(function).ok_or(ExtractionMiss::FunctionNotFound)?;
    let name_match = pattern
        .find(text)
        .ok_or(ExtractionMiss::FunctionNotFound)?;

    let open = text[name_match.end()..]
        .find('{')
        .map(|offset| name_match.end() + offset)
        .ok_or(ExtractionMiss::NoOpeningBrace)?;

    let mut depth = 0usize;
    for (offset, byte) in text.as_bytes()[open..].iter().enumerate() {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Ok(&text[open..=open + offset]);
                }
            }
            _ => {}
        }
    }

    Err(ExtractionMiss::UnbalancedBraces)
}
