//! Errors raised by the link editor

use flowsync_sdk::ErrorKind;
use thiserror::Error;

/// Why a link could not be added.
///
/// The display text is the message shown to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LinkError {
    #[error("Enter both a link and a name.")]
    MissingInput,

    #[error("URL does not exist.")]
    Unreachable,
}

impl LinkError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LinkError::MissingInput => ErrorKind::Validation,
            LinkError::Unreachable => ErrorKind::UnreachableResource,
        }
    }
}
