use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The linker saw a root string the registry never persisted.
    /// Registry and linker ran over inconsistent word sets; the batch
    /// must abort rather than write a dangling reference.
    #[error("root registry has no entry for '{root}'")]
    RegistryInconsistent { root: String },

    #[error("Store failure: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, Error>;
