use thiserror::Error;

/// Message shown for any failure that is neither a validation problem nor
/// an expired session
pub const GENERIC_FAILURE: &str = "Something went wrong. Please try again.";

#[derive(Debug, Error)]
pub enum ClientError {
    /// Rejected locally; nothing was sent
    #[error("Validation failed: {}", .0.join("; "))]
    Validation(Vec<String>),

    #[error("Unauthorized, sign in at {login_path}")]
    Unauthorized { login_path: String },

    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Unauthorized { .. })
    }

    /// Where the UI should redirect after a 401
    pub fn login_path(&self) -> Option<&str> {
        match self {
            ClientError::Unauthorized { login_path } => Some(login_path),
            _ => None,
        }
    }

    /// Text suitable for a toast: validation messages verbatim, everything
    /// else collapsed to a generic message
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Validation(messages) => messages.join("\n"),
            ClientError::Unauthorized { .. } => "Your session has expired. Please sign in again.".to_string(),
            _ => GENERIC_FAILURE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_predicate_and_login_path() {
        let err = ClientError::Unauthorized {
            login_path: "/api/login".into(),
        };
        assert!(err.is_unauthorized());
        assert_eq!(err.login_path(), Some("/api/login"));

        let other = ClientError::Api {
            status: 500,
            message: "Database error occurred".into(),
        };
        assert!(!other.is_unauthorized());
        assert_eq!(other.login_path(), None);
    }

    #[test]
    fn server_failures_are_generic_for_users() {
        let err = ClientError::Api {
            status: 409,
            message: "A page with this slug already exists".into(),
        };
        assert_eq!(err.user_message(), GENERIC_FAILURE);

        let err = ClientError::Validation(vec!["Title is required".into()]);
        assert_eq!(err.user_message(), "Title is required");
    }
}
