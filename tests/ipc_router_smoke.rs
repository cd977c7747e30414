mod test_support;

use serde_json::json;
use test_support::{create_member, create_session, open_workspace};

#[test]
fn router_dispatch_smoke_covers_handler_families() {
    let mut sidecar = open_workspace("rosterd-router-smoke");

    let health = sidecar.request_ok("health", json!({}));
    assert!(health
        .get("workspacePath")
        .and_then(|v| v.as_str())
        .is_some());

    let seeded = sidecar.request_ok("seed.demo", json!({}));
    assert_eq!(seeded.get("seeded").and_then(|v| v.as_u64()), Some(4));

    let member_id = create_member(&mut sidecar, "Smoke", "99887766");
    let _ = sidecar.request_ok("members.list", json!({}));
    let _ = sidecar.request_ok("members.get", json!({ "memberId": member_id }));
    let _ = sidecar.request_ok(
        "members.update",
        json!({ "memberId": member_id, "patch": { "surname": "Updated" } }),
    );
    let _ = sidecar.request_ok(
        "members.existsByItsNumber",
        json!({ "itsNumber": "99887766" }),
    );

    let session_id = create_session(&mut sidecar, "Smoke Session", "2024-03-01");
    let _ = sidecar.request_ok("sessions.list", json!({}));
    let _ = sidecar.request_ok(
        "sessions.update",
        json!({ "sessionId": session_id, "patch": { "location": "Annex" } }),
    );

    let _ = sidecar.request_ok(
        "attendance.mark",
        json!({ "sessionId": session_id, "memberId": member_id, "status": "PRESENT" }),
    );
    let _ = sidecar.request_ok(
        "attendance.listForSession",
        json!({ "sessionId": session_id }),
    );

    let _ = sidecar.request_ok("analytics.sessionStats", json!({ "sessionId": session_id }));
    let _ = sidecar.request_ok("analytics.memberStats", json!({ "memberId": member_id }));
    let _ = sidecar.request_ok("analytics.overview", json!({}));
    let _ = sidecar.request_ok("analytics.trend", json!({ "limit": 3 }));

    let _ = sidecar.request_ok("auth.status", json!({}));
    let _ = sidecar.request_ok("auth.login", json!({ "secret": "admin123" }));
    let _ = sidecar.request_ok("auth.logout", json!({}));

    let source = sidecar.workspace.join("smoke-photo.png");
    std::fs::write(&source, b"png bytes").expect("write photo source");
    let _ = sidecar.request_ok(
        "photos.upload",
        json!({ "sourcePath": source.to_string_lossy() }),
    );

    let _ = sidecar.request_ok("sessions.delete", json!({ "sessionId": session_id }));
    let _ = sidecar.request_ok("members.delete", json!({ "memberId": member_id }));

    let code = sidecar.request_err("no.such.method", json!({}));
    assert_eq!(code, "not_implemented");

    sidecar.finish();
}

#[test]
fn data_methods_require_a_workspace() {
    let (mut child, mut stdin, mut reader) = test_support::spawn_sidecar();

    let code = test_support::request_err(
        &mut stdin,
        &mut reader,
        "1",
        "members.list",
        json!({}),
    );
    assert_eq!(code, "no_workspace");

    drop(stdin);
    let _ = child.wait();
}
