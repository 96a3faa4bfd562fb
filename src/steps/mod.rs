//! Workflow steps.
//!
//! - [`Step`] - A statement, its connection target and its error policy
//! - [`StepStatus`] - Outcome of an executed step
//! - [`resolve_placeholders`] - Substitute earlier outputs into a statement
//! - [`extract_output`] - Capture the value a step produced
//!
//! # Example
//!
//! ```
//! use spockctrl::steps::{extract_output, resolve_placeholders};
//! use std::collections::BTreeMap;
//!
//! let mut outputs = BTreeMap::new();
//! outputs.insert(1, extract_output(" sync_event\n------------\n 0/3000060\n(1 row)\n"));
//!
//! let sql = resolve_placeholders("SELECT $1::pg_lsn;", &outputs);
//! assert_eq!(sql, "SELECT '0/3000060'::pg_lsn;");
//! ```

pub mod extract;
pub mod placeholder;
pub mod step;

pub use extract::extract_output;
pub use placeholder::{
    parse_placeholders, referenced_steps, resolve_placeholders, validate_references, Segment,
};
pub use step::{Step, StepStatus};
