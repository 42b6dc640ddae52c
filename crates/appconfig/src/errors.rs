use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("no default instance has been registered")]
    Uninitialized,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ron error: {0}")]
    Ron(#[from] ron::Error),

    #[error("parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    #[error("settings object did not serialize to a map")]
    NotAMap,

    #[error(transparent)]
    Copy(#[from] CopyError),
}

/// Raised by the graph copier when two object shapes disagree mid-recursion.
/// Persistence paths absorb this into a boolean result; direct `copy_into`
/// callers see it according to the configured recursion-error policy.
#[derive(Error, Debug)]
pub enum CopyError {
    #[error("member `{0}` has an incompatible shape")]
    IncompatibleMember(String),

    #[error("failed to snapshot member `{member}`: {message}")]
    Snapshot { member: String, message: String },
}
