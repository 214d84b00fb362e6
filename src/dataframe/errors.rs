use thiserror::Error;

use crate::dataframe::seed::SeedKind;

/// Error types for dataframe construction and merging
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DataframeError {
    /// More positional seeds than the call accepts
    #[error("{operation} expected at most {expected} positional argument(s), got {got}")]
    ArgumentCount {
        operation: &'static str,
        expected: usize,
        got: usize,
    },
    /// The seed shape is not accepted by the operation
    #[error("cannot {operation} a Dataframe with a {found} seed. {hint}")]
    TypeMismatch {
        operation: &'static str,
        found: SeedKind,
        hint: &'static str,
    },
    /// Column lookup on a key the table does not hold
    #[error("column not found: {0}")]
    MissingColumn(String),
}
