use clap::Args;
use serde_json::json;

use expedite_core::config::AppConfig;
use expedite_core::domain::request::{Priority, RequestKind, RequestStatus};
use expedite_store::{CsvRequestStore, RequestStore};

use crate::commands::{store_failure, CommandResult};

#[derive(Debug, Args)]
pub struct ListArgs {
    #[arg(long)]
    pub status: Option<RequestStatus>,
    #[arg(long)]
    pub kind: Option<RequestKind>,
    #[arg(long)]
    pub priority: Option<Priority>,
}

pub fn run(config: &AppConfig, args: &ListArgs) -> CommandResult {
    let store = CsvRequestStore::new(config.store.data_file.clone());
    run_with_store(&store, args)
}

pub fn run_with_store(store: &dyn RequestStore, args: &ListArgs) -> CommandResult {
    let requests = match store.load_all() {
        Ok(requests) => requests,
        Err(error) => return store_failure("list", &error),
    };

    let matching: Vec<_> = requests
        .into_iter()
        .filter(|request| args.status.map_or(true, |status| request.status == status))
        .filter(|request| args.kind.map_or(true, |kind| request.kind == kind))
        .filter(|request| args.priority.map_or(true, |priority| request.priority == priority))
        .collect();

    CommandResult::success_with_data(
        "list",
        format!("{} request(s)", matching.len()),
        json!(matching),
    )
}
