//! SQL execution and statement templates.
//!
//! - [`SqlExecutor`] - Blocking, infallible statement execution
//! - [`PsqlExecutor`] - Runs statements through the `psql` client
//! - [`DryRunExecutor`] - Runs nothing, for `--dry-run`
//! - [`MockExecutor`] - Scripted responses for tests
//! - [`templates`] - Spock administrative statements

pub mod executor;
pub mod mock;
pub mod templates;

pub use executor::{
    prepend_to_path, DryRunExecutor, ExecutionResult, PsqlExecutor, SqlExecutor,
    SPAWN_FAILURE_EXIT_CODE,
};
pub use mock::{ExecutedStatement, MockExecutor};
pub use templates::SubscriptionOptions;
