//! Output verbosity.

use std::fmt;
use std::str::FromStr;

/// How much detail is shown for each step.
///
/// Every level shows one status line per step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    /// Step descriptions and statuses only (`-v 0`).
    #[default]
    Steps,
    /// Also the connection target and the client's output (`-v 1`).
    Output,
    /// Also the resolved statement (`-v 2`).
    Statements,
}

impl Verbosity {
    /// Check if this level shows the connection target of each step.
    pub fn shows_target(&self) -> bool {
        *self >= Self::Output
    }

    /// Check if this level shows client stdout and stderr.
    pub fn shows_output(&self) -> bool {
        *self >= Self::Output
    }

    /// Check if this level shows resolved statements.
    pub fn shows_statement(&self) -> bool {
        *self == Self::Statements
    }

    /// Numeric level as accepted by `--verbose`.
    pub fn level(&self) -> u8 {
        match self {
            Self::Steps => 0,
            Self::Output => 1,
            Self::Statements => 2,
        }
    }
}

impl TryFrom<u8> for Verbosity {
    type Error = String;

    fn try_from(level: u8) -> Result<Self, Self::Error> {
        match level {
            0 => Ok(Self::Steps),
            1 => Ok(Self::Output),
            2 => Ok(Self::Statements),
            _ => Err(format!("verbosity must be 0, 1 or 2 (got {})", level)),
        }
    }
}

impl FromStr for Verbosity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level: u8 = s
            .trim()
            .parse()
            .map_err(|_| format!("verbosity must be 0, 1 or 2 (got {})", s))?;
        Self::try_from(level)
    }
}

impl fmt::Display for Verbosity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.level())
    }
}
