use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Payload for '{key}' contains a non-ASCII character at byte {position}")]
    Encoding { key: &'static str, position: usize },

    #[error("Failed to serialize a JSON payload ({0})")]
    Serialization(#[from] serde_json::Error),

    #[error("Configuration '{0}' was read before being set")]
    MissingConfig(String),

    #[error("Parameter '{0}' is not present in the payload")]
    KeyNotFound(String),

    #[error("Encountered an invalid tracker configuration ({0})")]
    Config(#[from] serde_yaml::Error),

    #[error("Encountered an invalid Base64 value ({0})")]
    Base64(#[from] base64::DecodeError),

    #[error("Decoded payload is not valid UTF-8 ({0})")]
    Utf8(#[from] std::string::FromUtf8Error),

    #[error("Unknown event kind code '{0}'")]
    UnknownEventKind(String),
}

impl Error {
    pub(crate) fn missing_config<S: AsRef<str>>(name: S) -> Self {
        Error::MissingConfig(name.as_ref().to_owned())
    }

    pub(crate) fn key_not_found<S: AsRef<str>>(key: S) -> Self {
        Error::KeyNotFound(key.as_ref().to_owned())
    }
}
