//! Mock executor for testing.
//!
//! `MockExecutor` implements [`SqlExecutor`] and records every statement it
//! receives. Responses are returned from a queue in call order; once the
//! queue is empty the fallback response is used.
//!
//! # Example
//!
//! ```
//! use spockctrl::sql::{ExecutionResult, MockExecutor, SqlExecutor};
//!
//! let executor = MockExecutor::new()
//!     .with_response(ExecutionResult::success(" 42\n(1 row)\n"))
//!     .with_response(ExecutionResult::failure(1, "ERROR: boom"));
//!
//! assert!(executor.execute("SELECT 42;", "host=a").is_success());
//! assert!(!executor.execute("SELECT boom();", "host=b").is_success());
//! assert!(executor.execute("SELECT 1;", "host=c").is_success());
//! assert_eq!(executor.calls()[1].target, "host=b");
//! ```

use std::cell::RefCell;
use std::collections::VecDeque;

use super::executor::{ExecutionResult, SqlExecutor};

/// A statement received by [`MockExecutor`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecutedStatement {
    pub statement: String,
    pub target: String,
}

/// Mock executor implementation for testing.
#[derive(Debug)]
pub struct MockExecutor {
    responses: RefCell<VecDeque<ExecutionResult>>,
    fallback: ExecutionResult,
    calls: RefCell<Vec<ExecutedStatement>>,
}

impl Default for MockExecutor {
    fn default() -> Self {
        Self::new()
    }
}

impl MockExecutor {
    /// Create a mock whose statements succeed with empty output.
    pub fn new() -> Self {
        Self {
            responses: RefCell::new(VecDeque::new()),
            fallback: ExecutionResult::success(""),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Create a mock whose statements all fail.
    pub fn failing() -> Self {
        Self::new().with_fallback(ExecutionResult::failure(1, "ERROR: mock failure"))
    }

    /// Queue the response for the next unanswered call.
    pub fn with_response(self, response: ExecutionResult) -> Self {
        self.responses.borrow_mut().push_back(response);
        self
    }

    /// Set the response used once the queue is exhausted.
    pub fn with_fallback(mut self, response: ExecutionResult) -> Self {
        self.fallback = response;
        self
    }

    /// Statements received so far, in call order.
    pub fn calls(&self) -> Vec<ExecutedStatement> {
        self.calls.borrow().clone()
    }

    /// Number of statements received so far.
    pub fn call_count(&self) -> usize {
        self.calls.borrow().len()
    }
}

impl SqlExecutor for MockExecutor {
    fn execute(&self, statement: &str, target: &str) -> ExecutionResult {
        self.calls.borrow_mut().push(ExecutedStatement {
            statement: statement.to_string(),
            target: target.to_string(),
        });

        self.responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| self.fallback.clone())
    }
}
