use crate::analytics;
use crate::ipc::helpers::{get_required_str, late_policy, with_store, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::roster;
use crate::store::RecordStore;
use serde_json::json;

const DEFAULT_TREND_LIMIT: usize = 5;

fn analytics_session_stats(
    store: &dyn RecordStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let session_id = get_required_str(params, "sessionId")?;
    if roster::get_session(store, &session_id).is_none() {
        return Err(HandlerErr::new("not_found", "session not found"));
    }

    let members = roster::load_members(store).records;
    let attendance = roster::load_attendance(store).records;
    let stats =
        analytics::session_stats(&session_id, &members, &attendance, late_policy(params));
    Ok(json!({ "stats": stats }))
}

fn analytics_member_stats(
    store: &dyn RecordStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let member_id = get_required_str(params, "memberId")?;
    if roster::get_member(store, &member_id).is_none() {
        return Err(HandlerErr::new("not_found", "member not found"));
    }

    let sessions = roster::load_sessions(store).records;
    let attendance = roster::load_attendance(store).records;
    let stats =
        analytics::member_stats(&member_id, &sessions, &attendance, late_policy(params));
    Ok(json!({ "stats": stats }))
}

fn analytics_overview(
    store: &dyn RecordStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let members = roster::load_members(store).records;
    let sessions = roster::load_sessions(store).records;
    let attendance = roster::load_attendance(store).records;
    let view = analytics::overview(&members, &sessions, &attendance, late_policy(params));
    Ok(json!({ "overview": view }))
}

fn analytics_trend(
    store: &dyn RecordStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let limit = params
        .get("limit")
        .and_then(|v| v.as_u64())
        .map(|v| v as usize)
        .unwrap_or(DEFAULT_TREND_LIMIT);

    let sessions = roster::load_sessions(store).records;
    let attendance = roster::load_attendance(store).records;
    let points = analytics::trend_series(limit, &sessions, &attendance, late_policy(params));
    Ok(json!({ "points": points }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "analytics.sessionStats" => Some(with_store(state, req, analytics_session_stats)),
        "analytics.memberStats" => Some(with_store(state, req, analytics_member_stats)),
        "analytics.overview" => Some(with_store(state, req, analytics_overview)),
        "analytics.trend" => Some(with_store(state, req, analytics_trend)),
        _ => None,
    }
}
