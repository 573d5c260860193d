use thiserror::Error;

#[derive(Error, Debug)]
pub enum FabricError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value '{value}' for {field}: {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Authentication against {host} failed: {message}")]
    AuthenticationError { host: String, message: String },

    #[error("Query against {host} failed with status {status}: {message}")]
    QueryError {
        host: String,
        status: u16,
        message: String,
    },

    #[error("Malformed response from {host}: {message}")]
    MalformedResponse { host: String, message: String },
}

impl FabricError {
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            FabricError::ConfigError { .. }
                | FabricError::MissingConfigError { .. }
                | FabricError::InvalidConfigValueError { .. }
        )
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            FabricError::MissingConfigError { field } => {
                format!("\"{}\" is undefined", field)
            }
            FabricError::InvalidConfigValueError { field, reason, .. } => {
                format!("{} is invalid: {}", field, reason)
            }
            FabricError::ConfigError { message } => message.clone(),
            FabricError::AuthenticationError { host, .. } => {
                format!("Unable to authenticate against {}", host)
            }
            FabricError::QueryError { host, status, .. } => {
                format!("{} answered the query with HTTP {}", host, status)
            }
            FabricError::MalformedResponse { host, .. } => {
                format!("{} returned an unexpected response", host)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            FabricError::MissingConfigError { .. } => {
                "Set INVENTORY_USERNAME and INVENTORY_PASSWORD as environment variables or in the settings file"
            }
            FabricError::InvalidConfigValueError { .. } | FabricError::ConfigError { .. } => {
                "Check the settings file for typos and valid values"
            }
            FabricError::AuthenticationError { .. } => "Verify the credentials and that the account is not locked",
            FabricError::ApiError(_) => "Check network reachability of the controller",
            FabricError::IoError(_) => "Check that the file exists and is readable",
            FabricError::YamlError(_) | FabricError::SerializationError(_) => {
                "Check the file or response format"
            }
            FabricError::QueryError { .. } | FabricError::MalformedResponse { .. } => {
                "Re-run with --loglevel debug to inspect the raw response"
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, FabricError>;
