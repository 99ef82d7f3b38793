//! Error handling types

use thiserror::Error;

/// Result type alias for operations that can fail
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the injected builder
///
/// Every failure is structural (bad registry metadata or bad arguments) and
/// is surfaced synchronously; nothing here is retried.
#[derive(Error, Debug)]
pub enum Error {
    /// Type resolution error
    ///
    /// The target type name is not registered, a constructor parameter has
    /// no nominal dependency type, or no stand-in factory exists for a
    /// dependency type.
    #[error("Type resolution error: {message}")]
    TypeResolution {
        /// Description of what could not be resolved
        message: String,
    },

    /// Construction error
    ///
    /// The constructor was invoked with the wrong number or kinds of
    /// arguments, or the construct function itself failed.
    #[error("Construction error: {message}")]
    Construction {
        /// Description of the construction failure
        message: String,
        /// Optional source error
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },
}

impl Error {
    /// Create a type resolution error
    pub fn type_resolution<S: Into<String>>(message: S) -> Self {
        Self::TypeResolution {
            message: message.into(),
        }
    }

    /// Create a construction error
    pub fn construction<S: Into<String>>(message: S) -> Self {
        Self::Construction {
            message: message.into(),
            source: None,
        }
    }

    /// Create a construction error with source
    pub fn construction_with_source<S: Into<String>, E: std::error::Error + Send + Sync + 'static>(
        message: S,
        source: E,
    ) -> Self {
        Self::Construction {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }
}
