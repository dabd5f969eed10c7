// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Destination(DestinationError),
}

/// Failures while binding a destination folder or writing a batch into it.
/// Used to provide user-friendly, localized error messages.
#[derive(Debug, Clone, PartialEq)]
pub enum DestinationError {
    /// The user closed the folder picker without choosing a folder
    Cancelled,

    /// The destination root or a subfolder could not be created or opened
    Unavailable(String),

    /// A single file could not be written
    WriteFailed { file_name: String, message: String },

    /// Some files of the batch were written, others were not
    PartialWrite {
        written: usize,
        total: usize,
        first_error: String,
    },
}

impl DestinationError {
    /// Returns the i18n message key for this error type.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            DestinationError::Cancelled => "error-destination-cancelled",
            DestinationError::Unavailable(_) => "error-destination-unavailable",
            DestinationError::WriteFailed { .. } => "error-destination-write-failed",
            DestinationError::PartialWrite { .. } => "error-destination-partial-write",
        }
    }

    /// Returns the arguments interpolated into the localized message.
    pub fn i18n_args(&self) -> Vec<(String, String)> {
        match self {
            DestinationError::Cancelled => Vec::new(),
            DestinationError::Unavailable(msg) => vec![("reason".into(), msg.clone())],
            DestinationError::WriteFailed { file_name, message } => vec![
                ("file".into(), file_name.clone()),
                ("reason".into(), message.clone()),
            ],
            DestinationError::PartialWrite {
                written,
                total,
                first_error,
            } => vec![
                ("written".into(), written.to_string()),
                ("total".into(), total.to_string()),
                ("reason".into(), first_error.clone()),
            ],
        }
    }
}

impl fmt::Display for DestinationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DestinationError::Cancelled => write!(f, "Folder selection cancelled"),
            DestinationError::Unavailable(msg) => write!(f, "Destination unavailable: {}", msg),
            DestinationError::WriteFailed { file_name, message } => {
                write!(f, "Failed to write {}: {}", file_name, message)
            }
            DestinationError::PartialWrite {
                written,
                total,
                first_error,
            } => write!(
                f,
                "Only {} of {} files written: {}",
                written, total, first_error
            ),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Destination(e) => write!(f, "Destination Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<DestinationError> for Error {
    fn from(err: DestinationError) -> Self {
        Error::Destination(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_io_error() {
        let err = Error::Io("disk failure".to_string());
        assert_eq!(format!("{}", err), "I/O Error: disk failure");
    }

    #[test]
    fn from_io_error_produces_io_variant() {
        let io_error = std::io::Error::other("boom");
        let err: Error = io_error.into();
        match err {
            Error::Io(message) => assert!(message.contains("boom")),
            _ => panic!("expected Io variant"),
        }
    }

    #[test]
    fn config_error_formats_properly() {
        let err = Error::Config("bad field".into());
        assert_eq!(format!("{}", err), "Config Error: bad field");
    }

    #[test]
    fn destination_error_i18n_keys() {
        assert_eq!(
            DestinationError::Cancelled.i18n_key(),
            "error-destination-cancelled"
        );
        assert_eq!(
            DestinationError::Unavailable("x".into()).i18n_key(),
            "error-destination-unavailable"
        );
        assert_eq!(
            DestinationError::PartialWrite {
                written: 1,
                total: 2,
                first_error: "x".into()
            }
            .i18n_key(),
            "error-destination-partial-write"
        );
    }

    #[test]
    fn partial_write_reports_counts() {
        let err = DestinationError::PartialWrite {
            written: 3,
            total: 8,
            first_error: "permission denied".into(),
        };
        assert_eq!(
            format!("{}", err),
            "Only 3 of 8 files written: permission denied"
        );
        let args = err.i18n_args();
        assert!(args.contains(&("written".to_string(), "3".to_string())));
        assert!(args.contains(&("total".to_string(), "8".to_string())));
    }

    #[test]
    fn destination_error_wraps_into_error() {
        let err: Error = DestinationError::Cancelled.into();
        assert!(matches!(err, Error::Destination(DestinationError::Cancelled)));
    }
}
