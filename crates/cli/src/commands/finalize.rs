use clap::Args;
use serde_json::json;
use tracing::info;

use expedite_core::config::AppConfig;
use expedite_core::domain::request::{Priority, RequestId};
use expedite_core::errors::DomainError;
use expedite_core::lifecycle::{finalize, Finalization};
use expedite_store::{CsvRequestStore, RequestStore};

use crate::commands::{domain_failure, store_failure, CommandResult};

#[derive(Debug, Args)]
pub struct FinalizeArgs {
    /// Request id to finalize.
    pub id: String,
    /// New priority; omit to keep the stored one.
    #[arg(long)]
    pub priority: Option<Priority>,
    /// Administrator notes; omit to keep the stored ones.
    #[arg(long)]
    pub notes: Option<String>,
    /// Mark the request completed and freeze its lead time.
    #[arg(long)]
    pub complete: bool,
}

pub fn run(config: &AppConfig, args: &FinalizeArgs) -> CommandResult {
    let store = CsvRequestStore::new(config.store.data_file.clone());
    run_with_store(&store, args)
}

pub fn run_with_store(store: &dyn RequestStore, args: &FinalizeArgs) -> CommandResult {
    let mut requests = match store.load_all() {
        Ok(requests) => requests,
        Err(error) => return store_failure("finalize", &error),
    };

    let id = RequestId(args.id.clone());
    let Some(position) = requests.iter().position(|request| request.id == id) else {
        return domain_failure("finalize", &DomainError::NotFound(args.id.clone()));
    };

    let record = &requests[position];
    let decision = Finalization {
        priority: args.priority.unwrap_or(record.priority),
        notes: args.notes.clone().unwrap_or_else(|| record.notes.clone()),
        mark_completed: args.complete,
    };

    let updated = finalize(record, &decision);
    requests[position] = updated.clone();
    if let Err(error) = store.save_all(&requests) {
        return store_failure("finalize", &error);
    }

    info!(
        event_name = "request.finalized",
        request_id = %updated.id,
        status = %updated.status,
        priority = %updated.priority,
        "administrator review applied"
    );
    let message = match updated.lead_time_days {
        Some(days) => format!("request {} completed, lead time {days} days", updated.id),
        None => format!("request {} reviewed", updated.id),
    };
    CommandResult::success_with_data("finalize", message, json!(updated))
}
