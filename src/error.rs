use std::fmt;
use std::path::Path;

#[derive(Debug)]
pub enum DDoSError {
    /// A simulation setting was rejected during validation.
    InvalidSetting {
        setting: &'static str,
        reason: String,
    },
    IoError(String),
    /// A CSV export could not be written.
    ExportError {
        path: String,
        reason: String,
    },
}

impl DDoSError {
    pub fn invalid(setting: &'static str, reason: impl Into<String>) -> Self {
        DDoSError::InvalidSetting {
            setting,
            reason: reason.into(),
        }
    }

    pub fn export(path: &Path, err: impl fmt::Display) -> Self {
        DDoSError::ExportError {
            path: path.display().to_string(),
            reason: err.to_string(),
        }
    }

    /// True for anything the user can fix by changing the run settings.
    pub fn is_config(&self) -> bool {
        matches!(self, DDoSError::InvalidSetting { .. })
    }
}

impl fmt::Display for DDoSError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DDoSError::InvalidSetting { setting, reason } => {
                write!(f, "Configuration error: invalid {}: {}", setting, reason)
            }
            DDoSError::IoError(msg) => write!(f, "IO error: {}", msg),
            DDoSError::ExportError { path, reason } => {
                write!(f, "IO error: could not export to {}: {}", path, reason)
            }
        }
    }
}

impl std::error::Error for DDoSError {}

impl From<std::io::Error> for DDoSError {
    fn from(err: std::io::Error) -> Self {
        DDoSError::IoError(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, DDoSError>;
