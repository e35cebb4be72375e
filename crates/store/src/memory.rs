use std::sync::Mutex;

use expedite_core::domain::request::Request;

use crate::{RequestStore, StoreError};

/// In-memory stand-in for the CSV file, used by tests and dry runs.
#[derive(Default)]
pub struct InMemoryRequestStore {
    requests: Mutex<Vec<Request>>,
}

impl InMemoryRequestStore {
    pub fn with_requests(requests: Vec<Request>) -> Self {
        Self { requests: Mutex::new(requests) }
    }
}

impl RequestStore for InMemoryRequestStore {
    fn load_all(&self) -> Result<Vec<Request>, StoreError> {
        let requests = self.requests.lock().expect("request store lock poisoned");
        Ok(requests.clone())
    }

    fn save_all(&self, requests: &[Request]) -> Result<(), StoreError> {
        let mut stored = self.requests.lock().expect("request store lock poisoned");
        *stored = requests.to_vec();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use expedite_core::domain::request::{
        Priority, Request, RequestId, RequestKind, RequestStatus,
    };

    use crate::{InMemoryRequestStore, RequestStore};

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
    fn starts_empty_and_round_trips() {
        let store = InMemoryRequestStore::default();
        assert!(store.load_all().expect("load").is_empty());

        let requests = vec![request("a"), request("b")];
        store.save_all(&requests).expect("save");

        assert_eq!(store.load_all().expect("reload"), requests);
    }

    #[test]
    fn save_replaces_the_previous_collection() {
        let store = InMemoryRequestStore::with_requests(vec![request("a"), request("b")]);

        store.save_all(&[request("only")]).expect("save");

        let loaded = store.load_all().expect("load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id.0, "only");
    }
}
