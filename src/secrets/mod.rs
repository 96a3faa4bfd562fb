//! Secret masking.
//!
//! - [`mask_passwords`] - Masks passwords in connection strings and statements

pub mod mask;

pub use mask::{mask_passwords, MASK};
