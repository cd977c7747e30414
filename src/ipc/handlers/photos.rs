use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::photos;
use log::warn;
use serde_json::json;
use std::path::Path;

/// Copies a local file into the workspace photo area and returns the
/// reference to store. Failures are recoverable: the caller keeps whatever
/// photoUrl the member already had and retries at will.
fn handle_photos_upload(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(workspace) = state.workspace.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let Some(source) = req.params.get("sourcePath").and_then(|v| v.as_str()) else {
        return err(&req.id, "bad_params", "missing sourcePath", None);
    };

    match photos::upload(workspace, Path::new(source)) {
        Ok(photo_url) => ok(&req.id, json!({ "photoUrl": photo_url })),
        Err(e) => {
            warn!("photo upload failed: {e:#}");
            err(&req.id, "upload_failed", e.to_string(), None)
        }
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "photos.upload" => Some(handle_photos_upload(state, req)),
        _ => None,
    }
}
