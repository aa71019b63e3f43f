use thiserror::Error;

#[derive(Error, Debug)]
pub enum DumpError {
    #[error("API request failed: {0}")]
    Api(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config file error: {0}")]
    ConfigFile(#[from] toml::de::Error),

    #[error("Portal error {code}: {message}")]
    Portal { code: i64, message: String },

    #[error("Authentication failed: {message}")]
    Auth { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfig { field: String },

    #[error("Invalid value for {field}: {value} ({reason})")]
    InvalidConfigValue {
        field: String,
        value: String,
        reason: String,
    },
}

pub type Result<T> = std::result::Result<T, DumpError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Portal,
    Io,
    Data,
    Config,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    Low,
    Medium,
    High,
    Critical,
}

impl DumpError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DumpError::Api(_) => ErrorCategory::Network,
            DumpError::Portal { .. } | DumpError::Auth { .. } => ErrorCategory::Portal,
            DumpError::Io(_) => ErrorCategory::Io,
            DumpError::Serialization(_) => ErrorCategory::Data,
            DumpError::ConfigFile(_)
            | DumpError::MissingConfig { .. }
            | DumpError::InvalidConfigValue { .. } => ErrorCategory::Config,
        }
    }

    pub fn severity(&self) -> ErrorSeverity {
        match self {
            DumpError::Api(_) => ErrorSeverity::Medium,
            DumpError::Portal { .. } | DumpError::Auth { .. } => ErrorSeverity::High,
            DumpError::Io(_) | DumpError::Serialization(_) => ErrorSeverity::High,
            DumpError::ConfigFile(_)
            | DumpError::MissingConfig { .. }
            | DumpError::InvalidConfigValue { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DumpError::Api(e) => format!("Could not reach the portal: {}", e),
            DumpError::Portal { message, .. } => {
                format!("The portal rejected the request: {}", message)
            }
            DumpError::Auth { message } => format!("Portal sign-in failed: {}", message),
            DumpError::Io(e) => format!("File operation failed: {}", e),
            DumpError::Serialization(e) => format!("Could not serialize item data: {}", e),
            DumpError::ConfigFile(e) => format!("Could not read the config file: {}", e),
            DumpError::MissingConfig { field } => {
                format!("Missing required configuration: {}", field)
            }
            DumpError::InvalidConfigValue { field, reason, .. } => {
                format!("Invalid value for {}: {}", field, reason)
            }
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            DumpError::Api(_) => "Check network connectivity and the portal URL",
            DumpError::Portal { .. } => "Check the account's privileges on the portal",
            DumpError::Auth { .. } => "Verify the token or username/password, or set AGOL_TOKEN",
            DumpError::Io(_) => "Check that the output directory exists and is writable",
            DumpError::Serialization(_) => "Inspect the item's data payload on the portal",
            DumpError::ConfigFile(_) => "Fix the TOML syntax in the config file",
            DumpError::MissingConfig { .. } | DumpError::InvalidConfigValue { .. } => {
                "Run with --help to see the expected configuration"
            }
        }
    }
}
