pub mod csv_file;
pub mod memory;

use thiserror::Error;

use expedite_core::domain::request::{Request, RequestId};

pub use csv_file::CsvRequestStore;
pub use memory::InMemoryRequestStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("csv store failure: {0}")]
    Csv(#[from] csv::Error),
    #[error("could not decode stored row: {0}")]
    Decode(String),
}

/// Persistent collection of purchase requests.
///
/// The whole collection is read and rewritten on every interaction, exactly
/// like the flat-file tool this replaces. There is no locking: two operators
/// saving at once race and the last writer wins. Known limitation, kept on
/// purpose for a single-editor deployment.
pub trait RequestStore: Send + Sync {
    fn load_all(&self) -> Result<Vec<Request>, StoreError>;
    fn save_all(&self, requests: &[Request]) -> Result<(), StoreError>;
}

/// Linear scan by identifier; the collection is small by design.
pub fn find_by_id<'a>(requests: &'a [Request], id: &RequestId) -> Option<&'a Request> {
    requests.iter().find(|request| &request.id == id)
}

#[cfg(test)]
mod tests {
    use expedite_core::domain::request::{
        Priority, Request, RequestId, RequestKind, RequestStatus,
    };

    use super::find_by_id;

    fn request(id: &str) -> Request {
        Request {
            id: RequestId(id.to_string()),
            requester_name: "Ana Souza".to_string(),
            registration_number: "55421".to_string(),
            work_order_number: "OS-1188".to_string(),
            request_code: "RC-2071".to_string(),
            equipment_tag: "PUMP-12B".to_string(),
            description: "Seal kit".to_string(),
            kind: RequestKind::Material,
            requested_at: None,
            status: RequestStatus::Pending,
            expected_delivery: None,
            delay_reason: String::new(),
            purchase_order_number: None,
            priority: Priority::Medium,
            notes: String::new(),
            lead_time_days: None,
        }
    }

    #[test]
    fn find_by_id_scans_the_collection() {
        let requests = vec![request("a"), request("b")];

        assert_eq!(find_by_id(&requests, &RequestId("b".to_string())).map(|r| &r.id.0), Some(&"b".to_string()));
        assert!(find_by_id(&requests, &RequestId("missing".to_string())).is_none());
    }
}
