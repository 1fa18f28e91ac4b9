//! The two demo actions and their canned responses.

use soapenv::{CommonResponse, Content, ProcessARequest, ProcessAResponse, ProcessBRequest, ProcessBResponse};
use tracing::info;

use crate::{ActionRegistry, dispatch_handler};

pub const PROCESS_A: &str = "processA";
pub const PROCESS_B: &str = "processB";

pub fn process_a_response() -> ProcessAResponse {
    ProcessAResponse {
        common: CommonResponse::success(),
        id: "100".to_string(),
        process: "ProcessAResponse".to_string(),
    }
}

pub fn process_b_response() -> ProcessBResponse {
    ProcessBResponse {
        common: CommonResponse::success(),
        id: "100".to_string(),
        process: "ProcessBResponse".to_string(),
        amount: "10000".to_string(),
    }
}

fn request_id(request: Option<Content>) -> String {
    match request {
        Some(Content::ProcessARequest(r)) => r.request_id,
        Some(Content::ProcessBRequest(r)) => r.request_id,
        _ => String::new(),
    }
}

/// Registers `processA` and `processB`.
pub fn register_demo_actions(registry: &mut ActionRegistry) {
    registry.register(
        PROCESS_A,
        Some(ProcessARequest::default().into()),
        dispatch_handler!(|request| {
            info!(request_id = %request_id(request), "Running processA");
            Ok(process_a_response().into())
        }),
    );
    registry.register(
        PROCESS_B,
        Some(ProcessBRequest::default().into()),
        dispatch_handler!(|request| {
            info!(request_id = %request_id(request), "Running processB");
            Ok(process_b_response().into())
        }),
    );
}
