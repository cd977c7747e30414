mod test_support;

use serde_json::json;
use test_support::{open_workspace, reopen_workspace};

#[test]
fn login_flag_survives_a_daemon_restart() {
    let mut sidecar = open_workspace("rosterd-auth-gate");

    let status = sidecar.request_ok("auth.status", json!({}));
    assert_eq!(
        status.get("authenticated").and_then(|v| v.as_bool()),
        Some(false)
    );

    // A wrong secret is a false result, not an error, and sets nothing.
    let login = sidecar.request_ok("auth.login", json!({ "secret": "letmein" }));
    assert_eq!(
        login.get("authenticated").and_then(|v| v.as_bool()),
        Some(false)
    );
    let status = sidecar.request_ok("auth.status", json!({}));
    assert_eq!(
        status.get("authenticated").and_then(|v| v.as_bool()),
        Some(false)
    );

    let login = sidecar.request_ok("auth.login", json!({ "secret": "admin123" }));
    assert_eq!(
        login.get("authenticated").and_then(|v| v.as_bool()),
        Some(true)
    );

    // The flag is durable: a fresh process over the same workspace still
    // reads logged-in.
    let workspace = sidecar.shutdown();
    let mut sidecar = reopen_workspace(&workspace);
    let status = sidecar.request_ok("auth.status", json!({}));
    assert_eq!(
        status.get("authenticated").and_then(|v| v.as_bool()),
        Some(true)
    );

    let logout = sidecar.request_ok("auth.logout", json!({}));
    assert_eq!(
        logout.get("authenticated").and_then(|v| v.as_bool()),
        Some(false)
    );
    let status = sidecar.request_ok("auth.status", json!({}));
    assert_eq!(
        status.get("authenticated").and_then(|v| v.as_bool()),
        Some(false)
    );

    sidecar.finish();
}
