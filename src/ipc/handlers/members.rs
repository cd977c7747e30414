use crate::ipc::helpers::{
    get_bool_or, get_optional_str, get_required_str, with_store, HandlerErr,
};
use crate::ipc::types::{AppState, Request};
use crate::model::Member;
use crate::roster;
use crate::store::RecordStore;
use chrono::Utc;
use serde_json::json;
use uuid::Uuid;

fn members_list(store: &dyn RecordStore) -> Result<serde_json::Value, HandlerErr> {
    let load = roster::load_members(store);
    Ok(json!({
        "members": load.records,
        "source": load.source.as_str()
    }))
}

fn members_get(
    store: &dyn RecordStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let member_id = get_required_str(params, "memberId")?;
    match roster::get_member(store, &member_id) {
        Some(member) => Ok(json!({ "member": member })),
        None => Err(HandlerErr::new("not_found", "member not found")),
    }
}

fn members_create(
    store: &dyn RecordStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let member = Member {
        id: Uuid::new_v4().to_string(),
        first_name: get_required_str(params, "firstName")?,
        surname: get_optional_str(params, "surname").unwrap_or_default(),
        its_number: get_required_str(params, "itsNumber")?,
        house_color: get_optional_str(params, "houseColor").unwrap_or_default(),
        address: get_optional_str(params, "address").unwrap_or_default(),
        mobile_number: get_optional_str(params, "mobileNumber").unwrap_or_default(),
        grade: get_optional_str(params, "grade").unwrap_or_default(),
        class_division: get_optional_str(params, "classDivision").unwrap_or_default(),
        photo_url: get_optional_str(params, "photoUrl"),
        is_active: get_bool_or(params, "isActive", true),
        created_at: Utc::now().timestamp_millis(),
    };

    let member = roster::create_member(store, member)?;
    Ok(json!({ "member": member }))
}

fn members_update(
    store: &dyn RecordStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let member_id = get_required_str(params, "memberId")?;
    let Some(mut member) = roster::get_member(store, &member_id) else {
        return Err(HandlerErr::new("not_found", "member not found"));
    };
    let empty = json!({});
    let patch = params.get("patch").unwrap_or(&empty);

    if let Some(v) = get_optional_str(patch, "firstName") {
        member.first_name = v;
    }
    if let Some(v) = patch.get("surname").and_then(|v| v.as_str()) {
        member.surname = v.trim().to_string();
    }
    if let Some(v) = patch.get("houseColor").and_then(|v| v.as_str()) {
        member.house_color = v.trim().to_string();
    }
    if let Some(v) = patch.get("address").and_then(|v| v.as_str()) {
        member.address = v.trim().to_string();
    }
    if let Some(v) = patch.get("mobileNumber").and_then(|v| v.as_str()) {
        member.mobile_number = v.trim().to_string();
    }
    if let Some(v) = patch.get("grade").and_then(|v| v.as_str()) {
        member.grade = v.trim().to_string();
    }
    if let Some(v) = patch.get("classDivision").and_then(|v| v.as_str()) {
        member.class_division = v.trim().to_string();
    }
    if let Some(v) = patch.get("photoUrl") {
        // Explicit null clears the photo reference; a string replaces it.
        member.photo_url = v.as_str().map(|s| s.to_string());
    }
    if let Some(v) = patch.get("isActive").and_then(|v| v.as_bool()) {
        member.is_active = v;
    }
    // The ITS number is frozen after creation; any value in the patch is
    // ignored and the stored one kept.

    let member = roster::upsert_member(store, member)?;
    Ok(json!({ "member": member }))
}

fn members_delete(
    store: &dyn RecordStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let member_id = get_required_str(params, "memberId")?;
    let removed = roster::delete_member(store, &member_id)?;
    Ok(json!({ "removed": removed }))
}

fn members_exists_by_its_number(
    store: &dyn RecordStore,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let its_number = get_required_str(params, "itsNumber")?;
    Ok(json!({
        "exists": roster::member_exists_by_its_number(store, &its_number)
    }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "members.list" => Some(with_store(state, req, |s, _| members_list(s))),
        "members.get" => Some(with_store(state, req, members_get)),
        "members.create" => Some(with_store(state, req, members_create)),
        "members.update" => Some(with_store(state, req, members_update)),
        "members.delete" => Some(with_store(state, req, members_delete)),
        "members.existsByItsNumber" => {
            Some(with_store(state, req, members_exists_by_its_number))
        }
        _ => None,
    }
}
