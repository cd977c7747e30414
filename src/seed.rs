//! First-run convenience roster. Loaded on request from the UI shell, never
//! implicitly.

use crate::model::Member;
use crate::roster;
use crate::store::{self, LoadSource, RecordStore};
use chrono::Utc;
use uuid::Uuid;

/// Populates the members collection with the demo roster, but only when it is
/// genuinely empty. A collection that failed to load (`Corrupt`) is left
/// alone: overwriting it would destroy whatever the user had.
///
/// Returns the number of members written (0 when seeding was skipped).
pub fn seed_members(store: &dyn RecordStore) -> anyhow::Result<usize> {
    let existing = roster::load_members(store);
    if existing.source == LoadSource::Corrupt || !existing.records.is_empty() {
        return Ok(0);
    }

    let members = demo_members();
    store::save_records(store, store::MEMBERS, &members)?;
    Ok(members.len())
}

fn demo_members() -> Vec<Member> {
    let now = Utc::now().timestamp_millis();
    let demo = |first: &str, last: &str, its: &str, house: &str, address: &str, mobile: &str,
                grade: &str, division: &str, is_active: bool| Member {
        id: Uuid::new_v4().to_string(),
        first_name: first.to_string(),
        surname: last.to_string(),
        its_number: its.to_string(),
        house_color: house.to_string(),
        address: address.to_string(),
        mobile_number: mobile.to_string(),
        grade: grade.to_string(),
        class_division: division.to_string(),
        photo_url: None,
        is_active,
        created_at: now,
    };

    vec![
        demo("Ali", "Hussain", "20304050", "Blue", "123 Main St", "555-0101", "A", "1", true),
        demo("Fatema", "Zahra", "20304051", "Green", "456 Oak Ln", "555-0102", "B", "2", true),
        demo("Hasan", "Rizvi", "20304052", "Red", "789 Pine Ave", "555-0103", "A", "1", true),
        demo("Zainab", "Abbas", "20304053", "Yellow", "321 Elm St", "555-0104", "C", "3", false),
    ]
}
