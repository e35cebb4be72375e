use chrono::NaiveDate;
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
pub struct UpdateArgs {
    /// Request id to update.
    pub id: String,
    /// New delivery estimate (YYYY-MM-DD); omit to keep the stored one.
    #[arg(long)]
    pub expected_delivery: Option<NaiveDate>,
    #[arg(long)]
    pub status: RequestStatus,
    /// Purchase-order number; only stored while the request sits in an approval route.
    #[arg(long)]
    pub po_number: Option<String>,
    /// Mandatory whenever the delivery estimate moves later.
    #[arg(long, default_value = "")]
    pub delay_reason: String,
}

pub fn run(config: &AppConfig, args: &UpdateArgs) -> CommandResult {
    let store = CsvRequestStore::new(config.store.data_file.clone());
    run_with_store(&store, args)
}

pub fn run_with_store(store: &dyn RequestStore, args: &UpdateArgs) -> CommandResult {
    let mut requests = match store.load_all() {
        Ok(requests) => requests,
        Err(error) => return store_failure("update", &error),
    };

    let id = RequestId(args.id.clone());
    let Some(position) = requests.iter().position(|request| request.id == id) else {
        return domain_failure("update", &DomainError::NotFound(args.id.clone()));
    };

    let candidate = UpdateCandidate {
        expected_delivery: args.expected_delivery,
        status: args.status,
        purchase_order_number: args.po_number.clone(),
        delay_reason: args.delay_reason.clone(),
    };

    let updated = match apply_update(&requests[position], &candidate) {
        Ok(updated) => updated,
        Err(error) => return domain_failure("update", &error),
    };

    requests[position] = updated.clone();
    if let Err(error) = store.save_all(&requests) {
        return store_failure("update", &error);
    }

    info!(
        event_name = "request.updated",
        request_id = %updated.id,
        status = %updated.status,
        "buyer update applied"
    );
    CommandResult::success_with_data(
        "update",
        format!("request {} now {}", updated.id, updated.status),
        json!(updated),
    )
}
