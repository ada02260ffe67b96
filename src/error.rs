use thiserror::Error;

/// Failure to read a canonical `"x/y/z"` chunk key.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinateParseError {
    #[error("chunk key `{0}` does not have three `/`-separated parts")]
    WrongArity(String),
    #[error("chunk key component `{0}` is not an integer")]
    BadComponent(String),
}

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("settings i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("settings encoding failed: {0}")]
    Encoding(#[from] bincode::Error),
    #[error("not a settings file (bad magic header)")]
    BadMagic,
    #[error("unsupported settings version: {0}")]
    UnsupportedVersion(u32),
}
