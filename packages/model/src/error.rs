use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unknown element type: {0}")]
    UnknownElementType(String),

    #[error("Unknown style property: {0}")]
    UnknownStyleProperty(String),
}
