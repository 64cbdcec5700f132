//! Error handler for mainta.

use thiserror::Error;
use validator::ValidationErrors;

pub type Result<T> = std::result::Result<T, CoreError>;

/// Enum representing core-side errors.
///
/// Every failure is terminal for the current user action; the UI layer
/// reports it and waits for the user to re-attempt.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("validation error occurred")]
    Validation(#[from] ValidationErrors),

    #[error("invalid email")]
    WrongEmail,

    #[error("invalid email or password")]
    InvalidCredentials,

    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("{entity} already registered under this {key}")]
    Duplicate {
        entity: &'static str,
        key: &'static str,
    },

    #[error("at least one problem must be selected")]
    NoProblemSelected,

    #[error("unknown {what}: {value}")]
    Parse { what: &'static str, value: String },

    #[error("record file operation failed: {0}")]
    Io(#[from] std::io::Error),
}

impl CoreError {
    /// Whether the error comes from user input rather than the system.
    ///
    /// The UI layer shows user errors as warnings and everything else as
    /// failures.
    pub fn is_user_error(&self) -> bool {
        !matches!(self, CoreError::Io(_) | CoreError::Parse { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_error_split() {
        assert!(CoreError::InvalidCredentials.is_user_error());
        assert!(
            CoreError::NotFound { entity: "machine" }.is_user_error()
        );
        assert!(
            !CoreError::Io(std::io::Error::other("disk gone"))
                .is_user_error()
        );
    }
}
