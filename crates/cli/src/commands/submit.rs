use clap::Args;
use serde_json::json;
use tracing::info;

use expedite_core::clock::{Clock, SystemClock};
use expedite_core::config::AppConfig;
use expedite_core::domain::request::RequestKind;
use expedite_core::lifecycle::{create_request, RequestDraft};
use expedite_store::{CsvRequestStore, RequestStore};

use crate::commands::{domain_failure, store_failure, CommandResult};

#[derive(Debug, Args)]
pub struct SubmitArgs {
    #[arg(long)]
    pub requester_name: String,
    #[arg(long)]
    pub registration_number: String,
    #[arg(long)]
    pub work_order_number: String,
    #[arg(long)]
    pub request_code: String,
    #[arg(long)]
    pub equipment_tag: String,
    #[arg(long)]
    pub description: String,
    #[arg(long, help = "material or service")]
    pub kind: RequestKind,
}

pub fn run(config: &AppConfig, args: &SubmitArgs) -> CommandResult {
    let store = CsvRequestStore::new(config.store.data_file.clone());
    run_with_store(&store, &SystemClock, args)
}

pub fn run_with_store(
    store: &dyn RequestStore,
    clock: &dyn Clock,
    args: &SubmitArgs,
) -> CommandResult {
    let draft = RequestDraft {
        requester_name: args.requester_name.clone(),
        registration_number: args.registration_number.clone(),
        work_order_number: args.work_order_number.clone(),
        request_code: args.request_code.clone(),
        equipment_tag: args.equipment_tag.clone(),
        description: args.description.clone(),
        kind: args.kind,
    };

    let request = match create_request(draft, clock) {
        Ok(request) => request,
        Err(error) => return domain_failure("submit", &error),
    };

    let mut requests = match store.load_all() {
        Ok(requests) => requests,
        Err(error) => return store_failure("submit", &error),
    };
    requests.push(request.clone());
    if let Err(error) = store.save_all(&requests) {
        return store_failure("submit", &error);
    }

    info!(event_name = "request.submitted", request_id = %request.id, "request registered");
    CommandResult::success_with_data(
        "submit",
        format!("request {} registered", request.id),
        json!(request),
    )
}
