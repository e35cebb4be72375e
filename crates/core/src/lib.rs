pub mod clock;
pub mod config;
pub mod domain;
pub mod errors;
pub mod lifecycle;

pub use clock::{Clock, FixedClock, SystemClock};
pub use domain::request::{Priority, Request, RequestId, RequestKind, RequestStatus};
pub use errors::DomainError;
pub use lifecycle::{
    apply_update, create_request, finalize, Finalization, RequestDraft, UpdateCandidate,
};
