//! Read-only statement guard.
//!
//! Parses SQL and classifies it as read-only or writing, so that nothing but
//! pure queries ever reaches the store.

mod parser;

pub use parser::{classify_sql, ensure_read_only, SqlClassifier};

use std::fmt;

/// Whether a statement can change the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Pure queries (SELECT, WITH ... SELECT, EXPLAIN of a query).
    ReadOnly,
    /// Anything that modifies data or schema, or could not be understood.
    Write,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ReadOnly => write!(f, "read-only"),
            Self::Write => write!(f, "write"),
        }
    }
}

/// The type of SQL statement detected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatementType {
    Select,
    With,
    Explain,
    Insert,
    Update,
    Delete,
    Create,
    Drop,
    Alter,
    Pragma,
    /// More than one statement in a single text.
    Multiple,
    /// Statement type could not be determined.
    Unknown,
}

impl fmt::Display for StatementType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Select => write!(f, "SELECT"),
            Self::With => write!(f, "WITH (CTE)"),
            Self::Explain => write!(f, "EXPLAIN"),
            Self::Insert => write!(f, "INSERT"),
            Self::Update => write!(f, "UPDATE"),
            Self::Delete => write!(f, "DELETE"),
            Self::Create => write!(f, "CREATE"),
            Self::Drop => write!(f, "DROP"),
            Self::Alter => write!(f, "ALTER"),
            Self::Pragma => write!(f, "PRAGMA"),
            Self::Multiple => write!(f, "Multiple"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

/// Result of classifying a SQL text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Read-only or writing.
    pub access: Access,
    /// The type of statement detected.
    pub statement_type: StatementType,
    /// Why the statement is not read-only, when that is not obvious from the type.
    pub reason: Option<String>,
}

impl Classification {
    /// Creates a classification without a reason.
    pub fn new(access: Access, statement_type: StatementType) -> Self {
        Self {
            access,
            statement_type,
            reason: None,
        }
    }

    /// Creates a write classification with an explanatory reason.
    pub fn rejected(statement_type: StatementType, reason: impl Into<String>) -> Self {
        Self {
            access: Access::Write,
            statement_type,
            reason: Some(reason.into()),
        }
    }

    /// Returns true if the statement may be executed against the store.
    pub fn is_read_only(&self) -> bool {
        self.access == Access::ReadOnly
    }
}
