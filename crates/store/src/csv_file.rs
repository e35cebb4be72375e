//! Flat CSV file store: one row per request, header row, full rewrite on save.

use std::path::PathBuf;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use expedite_core::domain::request::{Priority, Request, RequestId, RequestKind, RequestStatus};

use crate::{RequestStore, StoreError};

pub struct CsvRequestStore {
    path: PathBuf,
}

impl CsvRequestStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

impl RequestStore for CsvRequestStore {
    fn load_all(&self) -> Result<Vec<Request>, StoreError> {
        // First run: no file yet means an empty collection, not an error.
        if !self.path.exists() {
            return Ok(Vec::new());
        }

        let mut reader = csv::Reader::from_path(&self.path)?;
        let mut requests = Vec::new();
        for row in reader.deserialize::<RequestRow>() {
            requests.push(row?.into_request()?);
        }

        Ok(requests)
    }

    fn save_all(&self, requests: &[Request]) -> Result<(), StoreError> {
        let mut writer = csv::Writer::from_path(&self.path)?;
        for request in requests {
            writer.serialize(RequestRow::from_request(request))?;
        }
        writer.flush().map_err(csv::Error::from)?;

        Ok(())
    }
}

/// On-disk row shape. Everything is a string so that half-broken files written
/// by earlier revisions of the tool still load: malformed dates and lead times
/// decode as absent. An unknown kind/status/priority token is real corruption
/// and fails the load.
#[derive(Debug, Serialize, Deserialize)]
struct RequestRow {
    id: String,
    requester_name: String,
    registration_number: String,
    work_order_number: String,
    request_code: String,
    equipment_tag: String,
    description: String,
    kind: String,
    requested_at: String,
    status: String,
    expected_delivery: String,
    delay_reason: String,
    purchase_order_number: String,
    priority: String,
    notes: String,
    lead_time_days: String,
}

impl RequestRow {
    fn from_request(request: &Request) -> Self {
        Self {
            id: request.id.0.clone(),
            requester_name: request.requester_name.clone(),
            registration_number: request.registration_number.clone(),
            work_order_number: request.work_order_number.clone(),
            request_code: request.request_code.clone(),
            equipment_tag: request.equipment_tag.clone(),
            description: request.description.clone(),
            kind: request.kind.to_string(),
            requested_at: encode_date(request.requested_at),
            status: request.status.to_string(),
            expected_delivery: encode_date(request.expected_delivery),
            delay_reason: request.delay_reason.clone(),
            purchase_order_number: request.purchase_order_number.clone().unwrap_or_default(),
            priority: request.priority.to_string(),
            notes: request.notes.clone(),
            lead_time_days: request.lead_time_days.map(|days| days.to_string()).unwrap_or_default(),
        }
    }

    fn into_request(self) -> Result<Request, StoreError> {
        let kind = self
            .kind
            .parse::<RequestKind>()
            .map_err(|error| StoreError::Decode(format!("row `{}`: {error}", self.id)))?;
        let status = self
            .status
            .parse::<RequestStatus>()
            .map_err(|error| StoreError::Decode(format!("row `{}`: {error}", self.id)))?;
        let priority = self
            .priority
            .parse::<Priority>()
            .map_err(|error| StoreError::Decode(format!("row `{}`: {error}", self.id)))?;

        Ok(Request {
            kind,
            status,
            priority,
            id: RequestId(self.id),
            requester_name: self.requester_name,
            registration_number: self.registration_number,
            work_order_number: self.work_order_number,
            request_code: self.request_code,
            equipment_tag: self.equipment_tag,
            description: self.description,
            requested_at: decode_date(&self.requested_at),
            expected_delivery: decode_date(&self.expected_delivery),
            delay_reason: self.delay_reason,
            purchase_order_number: non_empty(self.purchase_order_number),
            notes: self.notes,
            lead_time_days: self.lead_time_days.trim().parse().ok(),
        })
    }
}

fn encode_date(date: Option<NaiveDate>) -> String {
    date.map(|date| date.format("%Y-%m-%d").to_string()).unwrap_or_default()
}

/// Lenient by contract: an empty or unparseable date cell is treated as "no
/// date recorded".
fn decode_date(cell: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(cell.trim(), "%Y-%m-%d").ok()
}

fn non_empty(cell: String) -> Option<String> {
    let trimmed = cell.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use chrono::NaiveDate;
    use tempfile::tempdir;

    use expedite_core::domain::request::{
        Priority, Request, RequestId, RequestKind, RequestStatus,
    };

    use crate::{CsvRequestStore, RequestStore, StoreError};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    fn request(id: &str) -> Request {
        Request {
            id: RequestId(id.to_string()),
            requester_name: "Ana Souza".to_string(),
            registration_number: "55421".to_string(),
            work_order_number: "OS-1188".to_string(),
            request_code: "RC-2071".to_string(),
            equipment_tag: "PUMP-12B".to_string(),
            description: "Replacement seal kit, includes o-rings".to_string(),
            kind: RequestKind::Material,
            requested_at: Some(date(2024, 1, 10)),
            status: RequestStatus::ManagerApproval,
            expected_delivery: Some(date(2024, 1, 25)),
            delay_reason: "supplier backlog".to_string(),
            purchase_order_number: Some("PO-9001".to_string()),
            priority: Priority::High,
            notes: "expedite via site warehouse".to_string(),
            lead_time_days: Some(15),
        }
    }

    #[test]
    fn missing_file_loads_as_empty_collection() {
        let dir = tempdir().expect("temp dir");
        let store = CsvRequestStore::new(dir.path().join("requests.csv"));

        assert!(store.load_all().expect("load").is_empty());
    }

    #[test]
    fn save_then_load_preserves_every_field() {
        let dir = tempdir().expect("temp dir");
        let store = CsvRequestStore::new(dir.path().join("requests.csv"));
        let requests = vec![request("a"), request("b")];

        store.save_all(&requests).expect("save");
        let loaded = store.load_all().expect("load");

        assert_eq!(loaded, requests);
    }

    #[test]
    fn save_rewrites_the_whole_file() {
        let dir = tempdir().expect("temp dir");
        let store = CsvRequestStore::new(dir.path().join("requests.csv"));

        store.save_all(&[request("a"), request("b")]).expect("first save");
        store.save_all(&[request("only")]).expect("second save");

        let loaded = store.load_all().expect("load");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id.0, "only");
    }

    #[test]
    fn malformed_dates_load_as_absent() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("requests.csv");
        let store = CsvRequestStore::new(path.clone());
        store.save_all(&[request("a")]).expect("seed file");

        let contents = fs::read_to_string(&path).expect("read file");
        let patched = contents.replace("2024-01-25", "25/01/2024").replace("2024-01-10", "soon");
        fs::write(&path, patched).expect("write patched file");

        let loaded = store.load_all().expect("lenient load");
        assert_eq!(loaded[0].requested_at, None);
        assert_eq!(loaded[0].expected_delivery, None);
    }

    #[test]
    fn unknown_status_token_fails_decode() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("requests.csv");
        let store = CsvRequestStore::new(path.clone());
        store.save_all(&[request("a")]).expect("seed file");

        let contents = fs::read_to_string(&path).expect("read file");
        fs::write(&path, contents.replace("manager-approval", "archived")).expect("write");

        let error = store.load_all().expect_err("corrupt status");
        assert!(matches!(error, StoreError::Decode(_)));
        assert!(error.to_string().contains("archived"));
    }

    #[test]
    fn empty_optional_cells_load_as_none() {
        let dir = tempdir().expect("temp dir");
        let store = CsvRequestStore::new(dir.path().join("requests.csv"));
        let mut bare = request("bare");
        bare.expected_delivery = None;
        bare.purchase_order_number = None;
        bare.lead_time_days = None;
        bare.delay_reason = String::new();

        store.save_all(&[bare.clone()]).expect("save");
        let loaded = store.load_all().expect("load");

        assert_eq!(loaded, vec![bare]);
    }

    #[test]
    fn header_row_matches_the_published_column_order() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("requests.csv");
        CsvRequestStore::new(path.clone()).save_all(&[request("a")]).expect("save");

        let contents = fs::read_to_string(&path).expect("read file");
        let header = contents.lines().next().expect("header row");
        assert_eq!(
            header,
            "id,requester_name,registration_number,work_order_number,request_code,\
             equipment_tag,description,kind,requested_at,status,expected_delivery,\
             delay_reason,purchase_order_number,priority,notes,lead_time_days"
        );
    }
}
