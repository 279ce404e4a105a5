//! Guard idiom recognition
//!
//! Three idioms are tested independently on every trimmed body line, so one
//! line can yield more than one predicate:
//!
//! | Idiom      | Shape                          | Kind         |
//! |------------|--------------------------------|--------------|
//! | null check | `if (P == NULL` / `if (P != NULL` | NonNull   |
//! | bit test   | `if ((Flags & 0x01)`           | BitmaskSet   |
//! | relational | `if (Len > 0`                  | Less ... Ne  |

use once_cell::sync::Lazy;
use regex::Regex;

use crate::features::extraction::domain::ParseSkip;
use crate::features::predicate::{Origin, Predicate, PredicateKind};

static NULL_CHECK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bif\s*\(\s*(\w+)\s*[!=]=\s*NULL\b").expect("static regex")
});

static BITMASK_TEST: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bif\s*\(\s*\(?\s*(\w+)\s*&\s*(\w+)").expect("static regex")
});

// Longest operators first so `<=` is never read as `<` followed by `=`.
static RELATIONAL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\bif\s*\(\s*(\w+)\s*(<=|>=|==|!=|<|>)\s*(-?[0-9]\w*)").expect("static regex")
});

/// Parse a C integer literal: decimal or `0x` hex, optional `u`/`l` suffixes,
/// optional leading minus
///
/// Values above `i64::MAX` keep their 64-bit two's-complement pattern.
pub fn parse_literal(text: &str) -> Option<i64> {
    let (negative, digits) = match text.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, text),
    };
    let digits = digits.trim_end_matches(['u', 'U', 'l', 'L']);

    let magnitude = if let Some(hex) = digits
        .strip_prefix("0x")
        .or_else(|| digits.strip_prefix("0X"))
    {
        if hex.is_empty() {
            return None;
        }
        u64::from_str_radix(hex, 16).ok()?
    } else {
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        digits.parse::<u64>().ok()?
    };

    let value = magnitude as i64;
    Some(if negative { value.wrapping_neg() } else { value })
}

/// Recognised guards and dropped literals for one line
#[derive(Debug, Default)]
pub struct LineScan {
    pub predicates: Vec<Predicate>,
    pub skipped: Vec<ParseSkip>,
}

/// Scan one line of an extracted body
///
/// `line` is the 0-based index within the body, used for the origin tag.
pub fn scan_line(text: &str, function: &str, line: usize) -> LineScan {
    let mut scan = LineScan::default();
    let origin = || Origin::at(function, line);

    if let Some(caps) = NULL_CHECK.captures(text) {
        scan.predicates.push(Predicate::new(
            &caps[1],
            PredicateKind::NonNull,
            None,
            origin(),
        ));
    }

    if text.contains('&') && !text.contains("&&") {
        if let Some(caps) = BITMASK_TEST.captures(text) {
            match parse_literal(&caps[2]) {
                Some(mask) => scan.predicates.push(Predicate::new(
                    &caps[1],
                    PredicateKind::BitmaskSet,
                    Some(mask),
                    origin(),
                )),
                None => scan.skipped.push(ParseSkip {
                    line,
                    literal: caps[2].to_string(),
                }),
            }
        }
    }

    if let Some(caps) = RELATIONAL.captures(text) {
        let kind = PredicateKind::from_operator(&caps[2]);
        match (kind, parse_literal(&caps[3])) {
            (Some(kind), Some(value)) => {
                scan.predicates
                    .push(Predicate::new(&caps[1], kind, Some(value), origin()))
            }
            _ => scan.skipped.push(ParseSkip {
                line,
                literal: caps[3].to_string(),
            }),
        }
    }

    scan
}

/// Scan a whole body, lines split on `\n` and trimmed; line 0 holds the `{`
pub fn scan_body(body: &str, function: &str) -> LineScan {
    let mut out = LineScan::default();
    for (index, raw) in body.split('\n').enumerate() {
        let LineScan {
            predicates,
            skipped,
        } = scan_line(raw.trim(), function, index);
        out.predicates.extend(predicates);
        out.skipped.extend(skipped);
    }
    out
}
