//! Error handling for pass-forge


use thiserror::Error;

/// Main error type for pass-forge
#[derive(Error, Debug, Clone)]
pub enum PassForgeError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Input error: {message}")]
    Input { message: String },

    #[error("Component pool is empty: {message}")]
    EmptyPool { message: String },

    #[error("Blacklist error ({path}): {message}")]
    Blacklist { path: String, message: String },

    #[error("Network error: {message}")]
    Network {
        message: String,
        status_code: Option<u16>,
        url: Option<String>,
    },

    #[error("Parse error: {message}")]
    Parse {
        message: String,
        content: Option<String>,
    },

    #[error("IO error: {message}")]
    Io {
        message: String,
        path: Option<String>,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },

    #[error("CLI error: {message}")]
    Cli { message: String },
}

impl PassForgeError {
    /// Create a configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create an input error
    pub fn input(message: impl Into<String>) -> Self {
        Self::Input {
            message: message.into(),
        }
    }

    /// Create an empty component pool error
    pub fn empty_pool(message: impl Into<String>) -> Self {
        Self::EmptyPool {
            message: message.into(),
        }
    }

    /// Create a blacklist loading error
    pub fn blacklist(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Blacklist {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a network error
    pub fn network(
        message: impl Into<String>,
        status_code: Option<u16>,
        url: Option<String>,
    ) -> Self {
        Self::Network {
            message: message.into(),
            status_code,
            url,
        }
    }

    /// Create a parse error
    pub fn parse(message: impl Into<String>, content: Option<String>) -> Self {
        Self::Parse {
            message: message.into(),
            content,
        }
    }

    /// Create an IO error
    pub fn io(message: impl Into<String>, path: Option<String>) -> Self {
        Self::Io {
            message: message.into(),
            path,
        }
    }

    /// Create an internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
        }
    }

    /// Create a CLI error
    pub fn cli(message: impl Into<String>) -> Self {
        Self::Cli {
            message: message.into(),
        }
    }

    /// True for errors raised before any worker starts
    pub fn is_setup_error(&self) -> bool {
        matches!(
            self,
            Self::Config { .. } | Self::Input { .. } | Self::EmptyPool { .. } | Self::Blacklist { .. }
        )
    }

    /// Get user-friendly error message with suggestions
    pub fn user_message(&self) -> String {
        match self {
            Self::Config { message } => {
                format!("❌ Configuration problem: {}\n💡 Check your flags or .env file", message)
            }
            Self::Input { message } => {
                format!("❌ Input problem: {}\n💡 Pass a wordlist with -f or pipe words on stdin", message)
            }
            Self::EmptyPool { message } => {
                format!("❌ Cannot build passphrases: {}\n💡 Loosen the length or character filters", message)
            }
            Self::Blacklist { path, message } => {
                format!("❌ Could not load blacklist '{}': {}\n💡 Check the --exclude-common path", path, message)
            }
            Self::Network { message, status_code, .. } => {
                let status = status_code.map_or(String::new(), |c| format!(" ({})", c));
                format!("❌ Network error{}: {}\n💡 Check your internet connection", status, message)
            }
            Self::Parse { message, .. } => {
                format!("❌ Parse error: {}", message)
            }
            Self::Io { message, path } => {
                let path_info = path.as_ref().map_or(String::new(), |p| format!(" ({})", p));
                format!("❌ File error{}: {}\n💡 Check file permissions and paths", path_info, message)
            }
            Self::Internal { message } => {
                format!("❌ Internal error: {}\n💡 This is a bug, please report it", message)
            }
            Self::Cli { message } => {
                format!("❌ Command error: {}\n💡 Use --help for usage information", message)
            }
        }
    }
}

#[cfg(feature = "update-check")]
impl From<reqwest::Error> for PassForgeError {
    fn from(err: reqwest::Error) -> Self {
        let status_code = err.status().map(|s| s.as_u16());
        let url = err.url().map(|u| u.to_string());

        if err.is_connect() {
            Self::network("Connection failed", status_code, url)
        } else {
            Self::network(err.to_string(), status_code, url)
        }
    }
}

impl From<serde_json::Error> for PassForgeError {
    fn from(err: serde_json::Error) -> Self {
        Self::parse(err.to_string(), None)
    }
}

impl From<std::io::Error> for PassForgeError {
    fn from(err: std::io::Error) -> Self {
        Self::io(err.to_string(), None)
    }
}

impl From<tokio::task::JoinError> for PassForgeError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::internal(format!("worker task failed: {}", err))
    }
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, PassForgeError>;


/// Helper macros for common error patterns
#[macro_export]
macro_rules! config_error {
    ($msg:expr) => {
        $crate::error::PassForgeError::config($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::PassForgeError::config(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! input_error {
    ($msg:expr) => {
        $crate::error::PassForgeError::input($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::PassForgeError::input(format!($fmt, $($arg)*))
    };
}

#[macro_export]
macro_rules! internal_error {
    ($msg:expr) => {
        $crate::error::PassForgeError::internal($msg)
    };
    ($fmt:expr, $($arg:tt)*) => {
        $crate::error::PassForgeError::internal(format!($fmt, $($arg)*))
    };
}
