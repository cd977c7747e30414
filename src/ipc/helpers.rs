//! Shared handler plumbing: the per-request error shape, parameter
//! extraction, and the workspace/store guard every data method needs.

use crate::analytics::LatePolicy;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::roster::RosterError;
use crate::store::{RecordStore, SqliteRecordStore};

pub struct HandlerErr {
    pub code: &'static str,
    pub message: String,
    pub details: Option<serde_json::Value>,
}

impl HandlerErr {
    pub fn new(code: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn response(self, id: &str) -> serde_json::Value {
        err(id, self.code, self.message, self.details)
    }
}

impl From<RosterError> for HandlerErr {
    fn from(value: RosterError) -> Self {
        match value {
            RosterError::Validation(e) => HandlerErr::new("bad_params", e.to_string()),
            RosterError::DuplicateItsNumber(_) => {
                HandlerErr::new("duplicate_its_number", value.to_string())
            }
            RosterError::Store(e) => HandlerErr::new("store_write_failed", e.to_string()),
        }
    }
}

pub fn get_required_str(params: &serde_json::Value, key: &str) -> Result<String, HandlerErr> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| HandlerErr::new("bad_params", format!("missing {}", key)))
}

/// Absent, null, and blank all read as "not provided".
pub fn get_optional_str(params: &serde_json::Value, key: &str) -> Option<String> {
    params
        .get(key)
        .and_then(|v| v.as_str())
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

pub fn get_bool_or(params: &serde_json::Value, key: &str, default: bool) -> bool {
    params.get(key).and_then(|v| v.as_bool()).unwrap_or(default)
}

pub fn late_policy(params: &serde_json::Value) -> LatePolicy {
    if get_bool_or(params, "lateCountsAsPresent", false) {
        LatePolicy::LateCountsAsPresent
    } else {
        LatePolicy::PresentOnly
    }
}

/// Runs a handler against the selected workspace's store, mapping the
/// no-workspace case and handler errors into response frames.
pub fn with_store<F>(state: &AppState, req: &Request, f: F) -> serde_json::Value
where
    F: FnOnce(&dyn RecordStore, &serde_json::Value) -> Result<serde_json::Value, HandlerErr>,
{
    let Some(conn) = state.db.as_ref() else {
        return err(&req.id, "no_workspace", "select a workspace first", None);
    };
    let store = SqliteRecordStore::new(conn);
    match f(&store, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}
