use crate::ipc::helpers::{get_optional_str, get_required_str, with_store, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::{AttendanceRecord, AttendanceStatus};
use crate::roster;
use crate::store::RecordStore;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

fn attendance_list_for_session(
    store: &dyn RecordStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let session_id = get_required_str(params, "sessionId")?;
    let load = roster::load_attendance(store);
    let records: Vec<_> = load
        .records
        .into_iter()
        .filter(|a| a.session_id == session_id)
        .collect();
    Ok(json!({
        "records": records,
        "source": load.source.as_str()
    }))
}

/// Writes one mark per (sessionId, memberId); a repeat mark replaces the
/// stored record whether or not the caller reused its id. Existence of the
/// session/member is not checked here; cascades on the delete side keep the
/// references sound.
fn attendance_mark(
    store: &dyn RecordStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let session_id = get_required_str(params, "sessionId")?;
    let member_id = get_required_str(params, "memberId")?;
    let status_raw = get_required_str(params, "status")?;
    let Some(status) = AttendanceStatus::parse(&status_raw) else {
        return Err(HandlerErr::new(
            "bad_params",
            "status must be PRESENT, ABSENT or LATE",
        ));
    };

    let record = AttendanceRecord {
        id: get_optional_str(params, "recordId").unwrap_or_else(|| Uuid::new_v4().to_string()),
        session_id,
        member_id,
        status,
        timestamp: Utc::now().timestamp_millis(),
    };

    let record = roster::mark_attendance(store, record)?;
    Ok(json!({ "record": record }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.listForSession" => {
            Some(with_store(state, req, attendance_list_for_session))
        }
        "attendance.mark" => Some(with_store(state, req, attendance_mark)),
        _ => None,
    }
}
