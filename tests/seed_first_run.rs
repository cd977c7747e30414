mod test_support;

use serde_json::json;
use test_support::{create_member, open_workspace};

#[test]
fn seed_fills_an_empty_roster_exactly_once() {
    let mut sidecar = open_workspace("rosterd-seed-empty");

    // Opening a workspace seeds nothing by itself.
    let listed = sidecar.request_ok("members.list", json!({}));
    assert_eq!(
        listed
            .get("members")
            .and_then(|v| v.as_array())
            .map(|v| v.len()),
        Some(0)
    );

    let seeded = sidecar.request_ok("seed.demo", json!({}));
    assert_eq!(seeded.get("seeded").and_then(|v| v.as_u64()), Some(4));

    let listed = sidecar.request_ok("members.list", json!({}));
    let members = listed
        .get("members")
        .and_then(|v| v.as_array())
        .expect("members");
    assert_eq!(members.len(), 4);
    assert_eq!(
        members[0].get("firstName").and_then(|v| v.as_str()),
        Some("Ali")
    );
    assert_eq!(
        members[3].get("isActive").and_then(|v| v.as_bool()),
        Some(false)
    );

    // A second invocation is a no-op.
    let seeded = sidecar.request_ok("seed.demo", json!({}));
    assert_eq!(seeded.get("seeded").and_then(|v| v.as_u64()), Some(0));
    let listed = sidecar.request_ok("members.list", json!({}));
    assert_eq!(
        listed
            .get("members")
            .and_then(|v| v.as_array())
            .map(|v| v.len()),
        Some(4)
    );

    sidecar.finish();
}

#[test]
fn seed_skips_a_roster_that_already_has_members() {
    let mut sidecar = open_workspace("rosterd-seed-nonempty");

    create_member(&mut sidecar, "Existing", "11112222");

    let seeded = sidecar.request_ok("seed.demo", json!({}));
    assert_eq!(seeded.get("seeded").and_then(|v| v.as_u64()), Some(0));

    let listed = sidecar.request_ok("members.list", json!({}));
    let members = listed
        .get("members")
        .and_then(|v| v.as_array())
        .expect("members");
    assert_eq!(members.len(), 1);
    assert_eq!(
        members[0].get("firstName").and_then(|v| v.as_str()),
        Some("Existing")
    );

    sidecar.finish();
}
