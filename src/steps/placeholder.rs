//! Step output placeholders.
//!
//! A statement may refer to the captured output of an earlier step with
//! `$<n>`, where `n` is the 1-based index of that step:
//!
//! ```text
//! CALL spock.wait_for_sync_event(true, 'n2', $7::pg_lsn, 1200000);
//! ```
//!
//! A placeholder token is `$` followed by the longest run of ASCII digits,
//! so `$10` always means step 10 and never step 1 followed by a literal `0`.
//! A `$` that is not followed by a digit is literal text, and so is a digit
//! run with a leading zero (`$0`, `$07`): step indices start at 1 and are
//! never zero-padded.

use crate::error::{Result, SpockctrlError};
use crate::steps::step::Step;
use std::collections::{BTreeMap, BTreeSet};

/// A segment of a statement template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal text
    Literal(String),
    /// Output reference: $n
    Placeholder(usize),
}

/// Parse a statement template into literal and placeholder segments.
pub fn parse_placeholders(input: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut current_literal = String::new();
    let mut chars = input.char_indices().peekable();

    while let Some((start, c)) = chars.next() {
        if c != '$' {
            current_literal.push(c);
            continue;
        }

        let mut end = start + 1;
        while let Some(&(i, d)) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            end = i + 1;
            chars.next();
        }

        let digits = &input[start + 1..end];
        match digits.parse::<usize>() {
            Ok(index) if !digits.starts_with('0') => {
                if !current_literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut current_literal)));
                }
                segments.push(Segment::Placeholder(index));
            }
            // No digits, zero-padded, or too many to be a step index.
            _ => current_literal.push_str(&input[start..end]),
        }
    }

    if !current_literal.is_empty() {
        segments.push(Segment::Literal(current_literal));
    }

    segments
}

/// Step indices referenced by a statement template.
pub fn referenced_steps(input: &str) -> BTreeSet<usize> {
    parse_placeholders(input)
        .into_iter()
        .filter_map(|seg| match seg {
            Segment::Placeholder(index) => Some(index),
            _ => None,
        })
        .collect()
}

/// Substitute captured outputs into a statement template.
///
/// Every placeholder is replaced in a single pass. A placeholder without a
/// captured output is kept verbatim; [`validate_references`] rejects such
/// templates before a run starts.
pub fn resolve_placeholders(input: &str, outputs: &BTreeMap<usize, String>) -> String {
    let mut result = String::with_capacity(input.len());

    for segment in parse_placeholders(input) {
        match segment {
            Segment::Literal(text) => result.push_str(&text),
            Segment::Placeholder(index) => match outputs.get(&index) {
                Some(value) => result.push_str(value),
                None => {
                    result.push('$');
                    result.push_str(&index.to_string());
                }
            },
        }
    }

    result
}

/// Check that every step only refers to steps that run before it.
///
/// # Errors
///
/// Returns `ConfigValidationError` naming the first offending step.
pub fn validate_references(steps: &[Step]) -> Result<()> {
    for (position, step) in steps.iter().enumerate() {
        let index = position + 1;
        if let Some(bad) = referenced_steps(step.statement())
            .into_iter()
            .find(|&r| r >= index)
        {
            return Err(SpockctrlError::ConfigValidationError {
                message: format!(
                    "Step {} ('{}') refers to ${} which does not run before it",
                    index,
                    step.description(),
                    bad
                ),
            });
        }
    }

    Ok(())
}
