//! Request lifecycle ruleset.
//!
//! Pure functions over a [`Request`] plus operator input. Callers persist the
//! returned record through the store; on error the stored record is untouched.

use chrono::NaiveDate;
use uuid::Uuid;

use crate::clock::Clock;
use crate::domain::request::{Priority, Request, RequestId, RequestKind, RequestStatus};
use crate::errors::DomainError;

/// Intake form fields collected from the requester.
#[derive(Clone, Debug)]
pub struct RequestDraft {
    pub requester_name: String,
    pub registration_number: String,
    pub work_order_number: String,
    pub request_code: String,
    pub equipment_tag: String,
    pub description: String,
    pub kind: RequestKind,
}

/// Buyer-screen input for one existing request.
///
/// `expected_delivery = None` keeps the stored estimate, which is how bulk
/// status updates reuse this path without touching delivery dates.
#[derive(Clone, Debug)]
pub struct UpdateCandidate {
    pub expected_delivery: Option<NaiveDate>,
    pub status: RequestStatus,
    pub purchase_order_number: Option<String>,
    pub delay_reason: String,
}

/// Administrator-screen input.
#[derive(Clone, Debug)]
pub struct Finalization {
    pub priority: Priority,
    pub notes: String,
    pub mark_completed: bool,
}

/// Validates intake fields and mints a fresh Pending request stamped with the
/// clock's current date.
pub fn create_request(draft: RequestDraft, clock: &dyn Clock) -> Result<Request, DomainError> {
    let required: [(&'static str, &str); 6] = [
        ("requester_name", &draft.requester_name),
        ("registration_number", &draft.registration_number),
        ("work_order_number", &draft.work_order_number),
        ("request_code", &draft.request_code),
        ("equipment_tag", &draft.equipment_tag),
        ("description", &draft.description),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            return Err(DomainError::MissingField(field));
        }
    }

    Ok(Request {
        id: RequestId(Uuid::new_v4().to_string()),
        requester_name: draft.requester_name.trim().to_string(),
        registration_number: draft.registration_number.trim().to_string(),
        work_order_number: draft.work_order_number.trim().to_string(),
        request_code: draft.request_code.trim().to_string(),
        equipment_tag: draft.equipment_tag.trim().to_string(),
        description: draft.description.trim().to_string(),
        kind: draft.kind,
        requested_at: Some(clock.today()),
        status: RequestStatus::Pending,
        expected_delivery: None,
        delay_reason: String::new(),
        purchase_order_number: None,
        priority: Priority::default(),
        notes: String::new(),
        lead_time_days: None,
    })
}

/// Applies a buyer update, enforcing the delay override.
///
/// When the candidate delivery estimate is strictly later than a stored one,
/// the status is forced to [`RequestStatus::Delayed`] no matter what the
/// caller asked for, and a non-blank `delay_reason` becomes mandatory. A
/// record that reached a terminal status is rejected outright; completion and
/// re-prioritization go through [`finalize`].
pub fn apply_update(record: &Request, candidate: &UpdateCandidate) -> Result<Request, DomainError> {
    if record.status.is_terminal() {
        return Err(DomainError::ClosedRequest(record.status));
    }

    let slipped = match (record.expected_delivery, candidate.expected_delivery) {
        (Some(prior), Some(proposed)) => proposed > prior,
        _ => false,
    };

    let status = if slipped { RequestStatus::Delayed } else { candidate.status };

    // Guarantee: a Delayed record always carries a justification, whether the
    // status was forced by a slipping estimate or requested outright.
    if status == RequestStatus::Delayed && candidate.delay_reason.trim().is_empty() {
        return Err(DomainError::MissingDelayJustification);
    }

    let mut updated = record.clone();
    updated.expected_delivery = candidate.expected_delivery.or(record.expected_delivery);
    updated.status = status;
    updated.delay_reason = candidate.delay_reason.trim().to_string();

    // A purchase-order number is only accepted while the request sits in one
    // of the approval routes. An already-stored number is never cleared.
    if status.is_approval() {
        if let Some(number) = candidate.purchase_order_number.as_deref() {
            if !number.trim().is_empty() {
                updated.purchase_order_number = Some(number.trim().to_string());
            }
        }
    }

    if status == RequestStatus::Completed {
        updated.lead_time_days = derived_lead_time(&updated);
    }

    Ok(updated)
}

/// Administrator finalization: priority and notes always, completion on
/// request. Completing an already-completed record recomputes the same lead
/// time, so the call is idempotent.
pub fn finalize(record: &Request, decision: &Finalization) -> Request {
    let mut updated = record.clone();
    updated.priority = decision.priority;
    updated.notes = decision.notes.clone();

    if decision.mark_completed {
        updated.status = RequestStatus::Completed;
        updated.lead_time_days = derived_lead_time(&updated);
    }

    updated
}

/// Whole days between request date and delivery estimate. Either date absent
/// leaves the lead time undefined; that is deliberate tolerance, not an error.
fn derived_lead_time(record: &Request) -> Option<i64> {
    match (record.requested_at, record.expected_delivery) {
        (Some(requested), Some(delivery)) => Some((delivery - requested).num_days()),
        _ => None,
    }
}
