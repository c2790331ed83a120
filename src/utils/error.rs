use thiserror::Error;

#[derive(Error, Debug)]
pub enum GlueError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("TOML rendering error: {0}")]
    TomlError(#[from] toml::ser::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field} ({value}): {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Provider responded with {status}: {message}")]
    ProviderError { status: u16, message: String },

    #[error("Bundler exited with {}", describe_exit(.code))]
    BundlerFailed { code: Option<i32> },
}

fn describe_exit(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {}", code),
        None => "no status (terminated by signal)".to_string(),
    }
}

impl GlueError {
    /// Short line for operators, without the nested source chain.
    pub fn user_friendly_message(&self) -> String {
        match self {
            GlueError::HttpError(e) if e.is_connect() => {
                "Could not reach the remote service".to_string()
            }
            GlueError::HttpError(_) => "The remote request failed".to_string(),
            GlueError::IoError(e) => format!("File system operation failed: {}", e),
            GlueError::SerializationError(_) | GlueError::TomlError(_) => {
                "Could not encode or decode data".to_string()
            }
            GlueError::ConfigError { message } => message.clone(),
            GlueError::MissingConfigError { field } => format!("{} is not set", field),
            GlueError::InvalidConfigValueError { field, reason, .. } => {
                format!("{} is invalid: {}", field, reason)
            }
            GlueError::ProviderError { status, message } => {
                format!("Provider rejected the request ({}): {}", status, message)
            }
            GlueError::BundlerFailed { .. } => self.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            GlueError::HttpError(_) => "Check BACKEND_URL and that the service is running",
            GlueError::IoError(_) => "Check file permissions and that the paths exist",
            GlueError::SerializationError(_) | GlueError::TomlError(_) => {
                "Inspect the payload shape returned by the remote service"
            }
            GlueError::ConfigError { .. }
            | GlueError::MissingConfigError { .. }
            | GlueError::InvalidConfigValueError { .. } => {
                "Set the variable in the environment or in .env"
            }
            GlueError::ProviderError { status, .. } if *status == 401 || *status == 403 => {
                "Verify the API key or admin token"
            }
            GlueError::ProviderError { .. } => "Check the provider dashboard for details",
            GlueError::BundlerFailed { .. } => "Scroll up for the bundler output",
        }
    }

    /// Process exit code for CLIs: the bundler's own code when it has one.
    pub fn exit_code(&self) -> i32 {
        match self {
            GlueError::BundlerFailed { code: Some(code) } if *code != 0 => *code,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, GlueError>;
