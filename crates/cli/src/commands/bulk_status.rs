use clap::Args;
use serde_json::json;
use tracing::info;

use expedite_core::config::AppConfig;
use expedite_core::domain::request::{RequestId, RequestStatus};
use expedite_core::errors::DomainError;
use expedite_core::lifecycle::{apply_update, UpdateCandidate};
use expedite_store::{CsvRequestStore, RequestStore};

use crate::commands::{domain_failure, store_failure, CommandResult};

#[derive(Debug, Args)]
pub struct BulkStatusArgs {
    /// Request ids to move.
    #[arg(required = true)]
    pub ids: Vec<String>,
    #[arg(long)]
    pub status: RequestStatus,
}

pub fn run(config: &AppConfig, args: &BulkStatusArgs) -> CommandResult {
    let store = CsvRequestStore::new(config.store.data_file.clone());
    run_with_store(&store, args)
}

/// All-or-nothing: one bad id or closed request aborts the pass and nothing
/// is written. Delivery estimates and delay reasons are left untouched, only
/// the status moves.
pub fn run_with_store(store: &dyn RequestStore, args: &BulkStatusArgs) -> CommandResult {
    let mut requests = match store.load_all() {
        Ok(requests) => requests,
        Err(error) => return store_failure("bulk-status", &error),
    };

    let mut updated_ids = Vec::with_capacity(args.ids.len());
    for raw_id in &args.ids {
        let id = RequestId(raw_id.clone());
        let Some(position) = requests.iter().position(|request| request.id == id) else {
            return domain_failure("bulk-status", &DomainError::NotFound(raw_id.clone()));
        };

        let record = &requests[position];
        let candidate = UpdateCandidate {
            expected_delivery: None,
            status: args.status,
            purchase_order_number: None,
            delay_reason: record.delay_reason.clone(),
        };

        match apply_update(record, &candidate) {
            Ok(updated) => {
                requests[position] = updated;
                updated_ids.push(raw_id.clone());
            }
            Err(error) => return domain_failure("bulk-status", &error),
        }
    }

    if let Err(error) = store.save_all(&requests) {
        return store_failure("bulk-status", &error);
    }

    info!(
        event_name = "request.bulk_status",
        count = updated_ids.len(),
        status = %args.status,
        "bulk status pass applied"
    );
    CommandResult::success_with_data(
        "bulk-status",
        format!("{} request(s) moved to {}", updated_ids.len(), args.status),
        json!({ "updated": updated_ids, "status": args.status }),
    )
}
