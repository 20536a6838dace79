use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConcernError {
    #[error("{attribute}: duplicate restricted value `{value}`")]
    DuplicateValue { attribute: String, value: String },
    #[error("{attribute}: restricted value list is empty")]
    EmptyValues { attribute: String },
    #[error("{attribute}: `{value}` is not a permitted value")]
    NotPermitted { attribute: String, value: String },
    #[error("generated helper `{name}` is already defined")]
    NameCollision { name: String },
    #[error("unknown field `{0}`")]
    UnknownField(String),
    #[error("unknown method `{0}`")]
    UnknownMethod(String),
    #[error("unknown transform `{0}`")]
    UnknownTransform(String),
    #[error("no generated helper named `{0}`")]
    UnknownHelper(String),
    #[error("persistence error: {0}")]
    Persistence(String),
    #[error("transform failed: {0}")]
    Transform(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, ConcernError>;
