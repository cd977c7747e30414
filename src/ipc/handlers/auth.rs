use crate::auth;
use crate::ipc::helpers::{get_required_str, with_store, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::store::RecordStore;
use serde_json::json;

fn auth_login(
    store: &dyn RecordStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let secret = get_required_str(params, "secret")?;
    let authenticated = auth::login(store, &secret)
        .map_err(|e| HandlerErr::new("store_write_failed", e.to_string()))?;
    Ok(json!({ "authenticated": authenticated }))
}

fn auth_status(store: &dyn RecordStore) -> Result<serde_json::Value, HandlerErr> {
    Ok(json!({ "authenticated": auth::is_authenticated(store) }))
}

fn auth_logout(store: &dyn RecordStore) -> Result<serde_json::Value, HandlerErr> {
    auth::logout(store).map_err(|e| HandlerErr::new("store_write_failed", e.to_string()))?;
    Ok(json!({ "authenticated": false }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "auth.login" => Some(with_store(state, req, auth_login)),
        "auth.status" => Some(with_store(state, req, |s, _| auth_status(s))),
        "auth.logout" => Some(with_store(state, req, |s, _| auth_logout(s))),
        _ => None,
    }
}
