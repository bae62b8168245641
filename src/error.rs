use thiserror::Error;

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Invalid WCS: {0}")]
    InvalidWcs(#[from] ProjError),

    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    #[error("Invalid affine transform: {0}")]
    Affine(String),
}

#[derive(Error, Debug)]
pub enum ProjError {
    #[error("Missing mandatory WCS keyword: {0}")]
    MissingKeyword(String),

    #[error("Unknown projection: {0}")]
    UnknownProjection(String),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Malformed header: {0}")]
    Header(String),

    #[error("Point outside projection domain: {0}")]
    OutOfDomain(&'static str),
}
