use permcore::error::{
    BackendError,
    ValueError,
};
use thiserror::Error;

#[non_exhaustive]
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Backend(#[from] BackendError),
    #[error(transparent)]
    Value(#[from] ValueError),
    #[error(transparent)]
    NotFound(#[from] NotFound),
    #[error("project key {key:?} matches the key pattern of more than one template: {uuids:?}")]
    AmbiguousTemplate {
        key: String,
        uuids: Vec<String>,
    },
    #[error(transparent)]
    InvalidKeyPattern(#[from] regex::Error),
}

#[non_exhaustive]
#[derive(Debug, Error, PartialEq)]
pub enum NotFound {
    #[error("template not found: {0}")]
    Template(String),
    #[error("project not found: {0}")]
    Project(String),
    #[error("user not found: {0}")]
    User(String),
    #[error("group not found: {0}")]
    Group(String),
}
