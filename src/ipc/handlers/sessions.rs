use crate::ipc::helpers::{get_optional_str, get_required_str, with_store, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::Session;
use crate::roster;
use crate::store::RecordStore;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

fn sessions_list(store: &dyn RecordStore) -> Result<serde_json::Value, HandlerErr> {
    let load = roster::load_sessions(store);
    Ok(json!({
        "sessions": load.records,
        "source": load.source.as_str()
    }))
}

fn sessions_create(
    store: &dyn RecordStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let session = Session {
        id: Uuid::new_v4().to_string(),
        name: get_required_str(params, "name")?,
        location: get_optional_str(params, "location").unwrap_or_default(),
        date: get_required_str(params, "date")?,
        start_time: get_optional_str(params, "startTime").unwrap_or_default(),
        end_time: get_optional_str(params, "endTime").unwrap_or_default(),
        notes: get_optional_str(params, "notes"),
        created_at: Utc::now().timestamp_millis(),
    };

    let session = roster::upsert_session(store, session)?;
    Ok(json!({ "session": session }))
}

fn sessions_update(
    store: &dyn RecordStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let session_id = get_required_str(params, "sessionId")?;
    let Some(mut session) = roster::get_session(store, &session_id) else {
        return Err(HandlerErr::new("not_found", "session not found"));
    };
    let empty = json!({});
    let patch = params.get("patch").unwrap_or(&empty);

    if let Some(v) = get_optional_str(patch, "name") {
        session.name = v;
    }
    if let Some(v) = patch.get("location").and_then(|v| v.as_str()) {
        session.location = v.trim().to_string();
    }
    if let Some(v) = get_optional_str(patch, "date") {
        session.date = v;
    }
    if let Some(v) = patch.get("startTime").and_then(|v| v.as_str()) {
        session.start_time = v.trim().to_string();
    }
    if let Some(v) = patch.get("endTime").and_then(|v| v.as_str()) {
        session.end_time = v.trim().to_string();
    }
    if let Some(v) = patch.get("notes") {
        session.notes = v.as_str().map(|s| s.to_string());
    }

    let session = roster::upsert_session(store, session)?;
    Ok(json!({ "session": session }))
}

fn sessions_delete(
    store: &dyn RecordStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let session_id = get_required_str(params, "sessionId")?;
    let removed = roster::delete_session(store, &session_id)?;
    Ok(json!({ "removed": removed }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "sessions.list" => Some(with_store(state, req, |s, _| sessions_list(s))),
        "sessions.create" => Some(with_store(state, req, sessions_create)),
        "sessions.update" => Some(with_store(state, req, sessions_update)),
        "sessions.delete" => Some(with_store(state, req, sessions_delete)),
        _ => None,
    }
}
