//! Domain operations over the record store: CRUD, cascade deletes, and the
//! composite-key dedup rule for attendance marks. Every mutation reads the
//! full collection, edits in memory and writes the whole thing back.

use crate::model::{AttendanceRecord, Member, Session, ValidationError};
use crate::store::{self, RecordStore, TypedLoad};
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
pub enum RosterError {
    Validation(ValidationError),
    DuplicateItsNumber(String),
    Store(anyhow::Error),
}

impl Display for RosterError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::DuplicateItsNumber(its) => {
                write!(f, "a member with ITS number {its} already exists")
            }
            Self::Store(err) => write!(f, "{err}"),
        }
    }
}

impl Error for RosterError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::DuplicateItsNumber(_) => None,
            Self::Store(err) => Some(err.as_ref()),
        }
    }
}

impl From<ValidationError> for RosterError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

pub fn load_members(store: &dyn RecordStore) -> TypedLoad<Member> {
    store::load_records(store, store::MEMBERS)
}

pub fn load_sessions(store: &dyn RecordStore) -> TypedLoad<Session> {
    store::load_records(store, store::SESSIONS)
}

pub fn load_attendance(store: &dyn RecordStore) -> TypedLoad<AttendanceRecord> {
    store::load_records(store, store::ATTENDANCE)
}

pub fn get_member(store: &dyn RecordStore, id: &str) -> Option<Member> {
    load_members(store).records.into_iter().find(|m| m.id == id)
}

pub fn get_session(store: &dyn RecordStore, id: &str) -> Option<Session> {
    load_sessions(store)
        .records
        .into_iter()
        .find(|s| s.id == id)
}

pub fn member_exists_by_its_number(store: &dyn RecordStore, its_number: &str) -> bool {
    load_members(store)
        .records
        .iter()
        .any(|m| m.its_number == its_number)
}

/// Create path: uniqueness of the ITS number is checked here, before any
/// write. Edits go through `upsert_member` directly and never re-check.
pub fn create_member(store: &dyn RecordStore, member: Member) -> Result<Member, RosterError> {
    member.validate()?;
    if member_exists_by_its_number(store, &member.its_number) {
        return Err(RosterError::DuplicateItsNumber(member.its_number));
    }
    upsert_member(store, member)
}

/// Replace in place when the id is already present (position preserved),
/// otherwise insert at the front so the newest member lists first.
pub fn upsert_member(store: &dyn RecordStore, member: Member) -> Result<Member, RosterError> {
    member.validate()?;
    let mut members = load_members(store).records;
    match members.iter().position(|m| m.id == member.id) {
        Some(idx) => members[idx] = member.clone(),
        None => members.insert(0, member.clone()),
    }
    store::save_records(store, store::MEMBERS, &members).map_err(RosterError::Store)?;
    Ok(member)
}

/// Removes the member, then unconditionally removes every attendance record
/// carrying that memberId. The two writes are not one transaction; the member
/// goes first so a crash in between leaves an orphaned-but-harmless
/// attendance record rather than a dangling member reference.
pub fn delete_member(store: &dyn RecordStore, id: &str) -> Result<bool, RosterError> {
    let mut members = load_members(store).records;
    let before = members.len();
    members.retain(|m| m.id != id);
    let removed = members.len() != before;
    store::save_records(store, store::MEMBERS, &members).map_err(RosterError::Store)?;

    let mut attendance = load_attendance(store).records;
    attendance.retain(|a| a.member_id != id);
    store::save_records(store, store::ATTENDANCE, &attendance).map_err(RosterError::Store)?;
    Ok(removed)
}

pub fn upsert_session(store: &dyn RecordStore, session: Session) -> Result<Session, RosterError> {
    session.validate()?;
    let mut sessions = load_sessions(store).records;
    match sessions.iter().position(|s| s.id == session.id) {
        Some(idx) => sessions[idx] = session.clone(),
        None => sessions.insert(0, session.clone()),
    }
    store::save_records(store, store::SESSIONS, &sessions).map_err(RosterError::Store)?;
    Ok(session)
}

pub fn delete_session(store: &dyn RecordStore, id: &str) -> Result<bool, RosterError> {
    let mut sessions = load_sessions(store).records;
    let before = sessions.len();
    sessions.retain(|s| s.id != id);
    let removed = sessions.len() != before;
    store::save_records(store, store::SESSIONS, &sessions).map_err(RosterError::Store)?;

    let mut attendance = load_attendance(store).records;
    attendance.retain(|a| a.session_id != id);
    store::save_records(store, store::ATTENDANCE, &attendance).map_err(RosterError::Store)?;
    Ok(removed)
}

/// At most one record may exist per (sessionId, memberId). An existing record
/// is replaced in place even when the caller supplied a fresh record id, so
/// toggling a mark can never pile up duplicates. Referential integrity is
/// kept by the cascade deletes, not checked here.
pub fn mark_attendance(
    store: &dyn RecordStore,
    record: AttendanceRecord,
) -> Result<AttendanceRecord, RosterError> {
    let mut records = load_attendance(store).records;
    let existing = records
        .iter()
        .position(|r| r.session_id == record.session_id && r.member_id == record.member_id);
    match existing {
        Some(idx) => records[idx] = record.clone(),
        None => records.push(record.clone()),
    }
    store::save_records(store, store::ATTENDANCE, &records).map_err(RosterError::Store)?;
    Ok(record)
}
