use clap::Args;
use serde_json::json;

use expedite_core::config::AppConfig;
use expedite_core::domain::request::RequestId;
use expedite_core::errors::DomainError;
use expedite_store::{find_by_id, CsvRequestStore, RequestStore};

use crate::commands::{domain_failure, store_failure, CommandResult};

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Request id to display.
    pub id: String,
}

pub fn run(config: &AppConfig, args: &ShowArgs) -> CommandResult {
    let store = CsvRequestStore::new(config.store.data_file.clone());
    run_with_store(&store, args)
}

pub fn run_with_store(store: &dyn RequestStore, args: &ShowArgs) -> CommandResult {
    let requests = match store.load_all() {
        Ok(requests) => requests,
        Err(error) => return store_failure("show", &error),
    };

    match find_by_id(&requests, &RequestId(args.id.clone())) {
        Some(request) => CommandResult::success_with_data(
            "show",
            format!("request {}", request.id),
            json!(request),
        ),
        None => domain_failure("show", &DomainError::NotFound(args.id.clone())),
    }
}
