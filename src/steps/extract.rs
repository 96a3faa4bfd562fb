//! Captured value extraction from client output.
//!
//! `psql` prints a result set as a header, a rule, the rows and a row
//! count footer:
//!
//! ```text
//!  sync_event
//! ------------
//!  0/1A2B3C8
//! (1 row)
//! ```
//!
//! The captured value of a step is the last line that is not blank, not a
//! footer and not an echoed function-name header.

/// Column headers echoed for helper calls whose result is a single scalar.
const ECHOED_HELPERS: &[&str] = &["sub_create", "node_create"];

/// Extract the value a later step can substitute for this step's placeholder.
///
/// Values containing `/` are log positions and are returned single-quoted so
/// they can be cast (`'0/1A2B3C8'::pg_lsn`); anything else is returned as is.
/// Returns an empty string when no line qualifies.
pub fn extract_output(stdout: &str) -> String {
    let candidate = stdout
        .lines()
        .rev()
        .map(str::trim)
        .find(|line| !is_decoration(line))
        .unwrap_or_default();

    if candidate.contains('/') {
        format!("'{}'", candidate)
    } else {
        candidate.to_string()
    }
}

fn is_decoration(line: &str) -> bool {
    line.is_empty()
        || line.starts_with('(')
        || ECHOED_HELPERS.iter().any(|helper| line.starts_with(helper))
}
