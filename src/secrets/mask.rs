//! Password masking for connection strings.
//!
//! Targets and statements both carry libpq connection strings, which embed
//! the node password. Anything shown to the operator or written to the log
//! goes through [`mask_passwords`] first.

/// Replacement for masked values.
pub const MASK: &str = "[REDACTED]";

const PASSWORD_KEY: &str = "password=";

/// Mask the value of every `password=` keyword in `input`.
///
/// An unquoted value ends at whitespace or at a quote character, so a
/// connection string embedded in a SQL literal is masked without touching
/// the literal's closing quote. A quoted value (`'...'`, or `''...''` once
/// its connection string sits inside a SQL literal) is masked through its
/// closing quote, honoring backslash escapes.
///
/// # Example
///
/// ```
/// use spockctrl::secrets::mask_passwords;
///
/// let dsn = "host=127.0.0.1 user=pgedge password=s3cret";
/// assert_eq!(mask_passwords(dsn), "host=127.0.0.1 user=pgedge password=[REDACTED]");
///
/// let quoted = "host=127.0.0.1 password='s3 cret'";
/// assert_eq!(mask_passwords(quoted), "host=127.0.0.1 password=[REDACTED]");
/// ```
pub fn mask_passwords(input: &str) -> String {
    let mut result = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find(PASSWORD_KEY) {
        let value_start = pos + PASSWORD_KEY.len();
        result.push_str(&rest[..value_start]);

        let value = &rest[value_start..];
        let value_len = value_len(value);
        if value_len > 0 {
            result.push_str(MASK);
        }
        rest = &value[value_len..];
    }

    result.push_str(rest);
    result
}

/// Length of the password value at the start of `value`.
fn value_len(value: &str) -> usize {
    match value.bytes().take_while(|&b| b == b'\'').count() {
        0 => value
            .find(|c: char| c.is_whitespace() || c == '\'' || c == '"')
            .unwrap_or(value.len()),
        1 => quoted_len(value, 1),
        // A bare `''` closing the input is an empty password.
        2 if value.len() == 2 => 0,
        _ => quoted_len(value, 2),
    }
}

/// Length of a value opened by `width` quotes, through its closing quotes.
///
/// A backslash escapes the next character, or the next quote run of the
/// same width. An unterminated value runs to the end of `value`.
fn quoted_len(value: &str, width: usize) -> usize {
    let bytes = value.as_bytes();
    let close = &bytes[..width];
    let mut i = width;

    while i < bytes.len() {
        if bytes[i] == b'\\' {
            let escaped = if bytes[i + 1..].starts_with(close) {
                width
            } else {
                1
            };
            i += 1 + escaped;
        } else if bytes[i..].starts_with(close) {
            return i + width;
        } else {
            i += 1;
        }
    }

    bytes.len()
}
