#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{0}")]
    Validate(#[from] validator::ValidationErrors),

    #[error("forbidden")]
    Forbidden,

    #[error("not found")]
    NotFound,

    #[error("persistence: {0}")]
    Persistence(#[from] sqlx::Error),

    #[error("serialization: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("{0}")]
    Server(String),

    #[error("{0}")]
    Unknown(#[from] anyhow::Error),
}

impl Error {
    /// Failures coming from the storage collaborator rather than from local validation.
    pub fn is_persistence(&self) -> bool {
        matches!(
            self,
            Self::Persistence(_) | Self::Serialization(_) | Self::NotFound | Self::Unknown(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[macro_export]
macro_rules! bail {
    ($msg:literal $(,)?) => {
        return Err($crate::Error::Server(format!($msg)))
    };
    ($err:expr $(,)?) => {
        return Err($crate::Error::Server(format!($err)))
    };
    ($fmt:expr, $($arg:tt)*) => {
        return Err($crate::Error::Server(format!($fmt, $($arg)*)))
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server_error(reason: &str) -> Result<()> {
        crate::bail!("week {} rejected", reason);
    }

    #[test]
    fn test_bail_formats_server_error() {
        let err = server_error("w1").unwrap_err();
        assert_eq!(err.to_string(), "week w1 rejected");
        assert!(!err.is_persistence());
    }

    #[test]
    fn test_not_found_is_persistence_failure() {
        assert!(Error::NotFound.is_persistence());
        assert!(!Error::Forbidden.is_persistence());
    }
}
