use thiserror::Error;

use crate::schema::SchemaReport;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed osm document: {0}")]
    MalformedDocument(String),
    #[error("no standardization pattern or correction entry for phone value {0:?}")]
    UnmappablePhone(String),
    #[error("way {id} is missing required attribute {attribute:?}")]
    MissingAttribute { id: String, attribute: &'static str },
    #[error("{0}")]
    Schema(SchemaReport),
}

pub type Result<T> = std::result::Result<T, ConvertError>;
