use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("Course '{title}' is full.")]
    CapacityExceeded { title: String },

    #[error("Invalid date format '{value}'. Use 'YYYY-MM-DD'.")]
    InvalidDateFormat {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("Malformed course record: missing field '{field}'")]
    MalformedRecord { field: String },

    #[error("File {path} not found.")]
    FileNotFound { path: String },

    #[error("Error reading JSON from {path}: {source}")]
    DecodeError {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Course '{title}' not found")]
    CourseNotFound { title: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Enrollment,
    Data,
    Storage,
    Configuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl PlatformError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::CapacityExceeded { .. } | Self::CourseNotFound { .. } => ErrorCategory::Enrollment,
            Self::InvalidDateFormat { .. }
            | Self::MalformedRecord { .. }
            | Self::DecodeError { .. }
            | Self::SerializationError(_) => ErrorCategory::Data,
            Self::FileNotFound { .. } | Self::IoError(_) => ErrorCategory::Storage,
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            // 讀檔失敗時記憶體內的課程保持不變
            Self::FileNotFound { .. } => ErrorSeverity::Low,
            Self::CapacityExceeded { .. } | Self::CourseNotFound { .. } => ErrorSeverity::Medium,
            Self::InvalidDateFormat { .. }
            | Self::MalformedRecord { .. }
            | Self::DecodeError { .. }
            | Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => ErrorSeverity::High,
            Self::IoError(_) | Self::SerializationError(_) => ErrorSeverity::Critical,
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            Self::CapacityExceeded { .. } => "Enroll the student in another course or raise its capacity",
            Self::InvalidDateFormat { .. } => "Fix the stored course dates to use the YYYY-MM-DD format",
            Self::MalformedRecord { .. } => {
                "Make sure every record has title, instructor, start_date, end_date and max_students"
            }
            Self::FileNotFound { .. } => "Check the data file path, or run `demo` to create one",
            Self::DecodeError { .. } => "The data file must be a JSON array of course records",
            Self::CourseNotFound { .. } => "Run `list` to see the available course titles",
            Self::IoError(_) => "Check file permissions and available disk space",
            Self::SerializationError(_) => "Report this as a bug, the course data could not be encoded",
            Self::ConfigError { .. }
            | Self::InvalidConfigValueError { .. }
            | Self::MissingConfigError { .. } => "Review the command line flags and the TOML configuration file",
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            Self::IoError(e) => format!("Could not access the data file: {}", e),
            Self::SerializationError(_) => "Could not encode the course data".to_string(),
            other => other.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlatformError>;
