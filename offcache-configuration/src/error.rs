use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid path regex `{pattern}`: {source}")]
    InvalidRegex {
        pattern: String,
        #[source]
        source: regex::Error,
    },
    #[error("invalid HTTP method `{0}`")]
    InvalidMethod(String),
    #[error("path must start with `/`, got `{0}`")]
    InvalidPath(String),
    #[error("cache names must be distinct, both are `{0}`")]
    DuplicateCacheName(String),
}
