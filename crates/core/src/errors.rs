use thiserror::Error;

use crate::domain::request::RequestStatus;

/// Recoverable validation failures. Every variant is surfaced to the operator
/// for correction; nothing is persisted when one of these is returned.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DomainError {
    #[error("required field `{0}` must not be empty")]
    MissingField(&'static str),
    #[error("delivery estimate moved later, a delay justification is required")]
    MissingDelayJustification,
    #[error("request is closed ({0}) and accepts no further buyer updates")]
    ClosedRequest(RequestStatus),
    #[error("no request found with id `{0}`")]
    NotFound(String),
}
