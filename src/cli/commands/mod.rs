//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.

pub mod dispatcher;
pub mod membership;

pub use dispatcher::{dispatch, Command, CommandResult};
pub use membership::MembershipCommand;
