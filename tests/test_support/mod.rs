#![allow(dead_code)]

use serde_json::json;
use std::io::{BufRead, BufReader, Write};
use std::path::PathBuf;
use std::process::{Child, ChildStdin, ChildStdout, Command, Stdio};
use std::time::{SystemTime, UNIX_EPOCH};

pub fn temp_dir(prefix: &str) -> PathBuf {
    let p = std::env::temp_dir().join(format!(
        "{}-{}-{}",
        prefix,
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock")
            .as_nanos()
    ));
    std::fs::create_dir_all(&p).expect("create temp dir");
    p
}

pub fn spawn_sidecar() -> (Child, ChildStdin, BufReader<ChildStdout>) {
    let exe = env!("CARGO_BIN_EXE_rosterd");
    let mut child = Command::new(exe)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .expect("spawn rosterd");
    let stdin = child.stdin.take().expect("child stdin");
    let stdout = child.stdout.take().expect("child stdout");
    (child, stdin, BufReader::new(stdout))
}

pub fn request(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let payload = json!({
        "id": id,
        "method": method,
        "params": params,
    });
    writeln!(stdin, "{}", payload).expect("write request");
    stdin.flush().expect("flush request");

    let mut line = String::new();
    reader.read_line(&mut line).expect("read response line");
    assert!(!line.trim().is_empty(), "empty response for {}", method);
    let value: serde_json::Value = serde_json::from_str(line.trim()).expect("parse response json");
    assert_eq!(value.get("id").and_then(|v| v.as_str()), Some(id));
    value
}

/// Sends a request that must succeed and returns its `result` payload.
pub fn request_ok(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> serde_json::Value {
    let value = request(stdin, reader, id, method, params);
    assert_eq!(
        value.get("ok").and_then(|v| v.as_bool()),
        Some(true),
        "request {} failed: {}",
        method,
        value
    );
    value.get("result").cloned().expect("result")
}

/// Sends a request that must fail and returns its error code.
pub fn request_err(
    stdin: &mut ChildStdin,
    reader: &mut BufReader<ChildStdout>,
    id: &str,
    method: &str,
    params: serde_json::Value,
) -> String {
    let value = request(stdin, reader, id, method, params);
    assert_eq!(
        value.get("ok").and_then(|v| v.as_bool()),
        Some(false),
        "request {} unexpectedly succeeded: {}",
        method,
        value
    );
    value
        .get("error")
        .and_then(|e| e.get("code"))
        .and_then(|v| v.as_str())
        .expect("error code")
        .to_string()
}

/// Spawns the sidecar and selects a fresh temp workspace in one step.
pub fn open_workspace(prefix: &str) -> Sidecar {
    let workspace = temp_dir(prefix);
    let (child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "ws",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    Sidecar {
        child,
        stdin,
        reader,
        workspace,
        next_id: 0,
    }
}

/// Re-spawns the sidecar against an existing workspace, as after an app
/// restart.
pub fn reopen_workspace(workspace: &PathBuf) -> Sidecar {
    let (child, mut stdin, mut reader) = spawn_sidecar();
    let _ = request_ok(
        &mut stdin,
        &mut reader,
        "ws",
        "workspace.select",
        json!({ "path": workspace.to_string_lossy() }),
    );
    Sidecar {
        child,
        stdin,
        reader,
        workspace: workspace.clone(),
        next_id: 0,
    }
}

pub struct Sidecar {
    pub child: Child,
    pub stdin: ChildStdin,
    pub reader: BufReader<ChildStdout>,
    pub workspace: PathBuf,
    next_id: u64,
}

impl Sidecar {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        self.next_id.to_string()
    }

    pub fn request_ok(&mut self, method: &str, params: serde_json::Value) -> serde_json::Value {
        let id = self.next_id();
        request_ok(&mut self.stdin, &mut self.reader, &id, method, params)
    }

    pub fn request_err(&mut self, method: &str, params: serde_json::Value) -> String {
        let id = self.next_id();
        request_err(&mut self.stdin, &mut self.reader, &id, method, params)
    }

    /// Closes stdin and waits for the process, keeping the workspace on disk.
    pub fn shutdown(mut self) -> PathBuf {
        drop(self.stdin);
        let _ = self.child.wait();
        self.workspace
    }

    /// Shuts down and deletes the workspace.
    pub fn finish(self) {
        let workspace = self.shutdown();
        let _ = std::fs::remove_dir_all(workspace);
    }
}

pub fn create_member(sidecar: &mut Sidecar, first_name: &str, its_number: &str) -> String {
    let result = sidecar.request_ok(
        "members.create",
        json!({ "firstName": first_name, "itsNumber": its_number }),
    );
    result
        .get("member")
        .and_then(|m| m.get("id"))
        .and_then(|v| v.as_str())
        .expect("member id")
        .to_string()
}

pub fn create_session(sidecar: &mut Sidecar, name: &str, date: &str) -> String {
    let result = sidecar.request_ok("sessions.create", json!({ "name": name, "date": date }));
    result
        .get("session")
        .and_then(|s| s.get("id"))
        .and_then(|v| v.as_str())
        .expect("session id")
        .to_string()
}

pub fn mark(sidecar: &mut Sidecar, session_id: &str, member_id: &str, status: &str) {
    let _ = sidecar.request_ok(
        "attendance.mark",
        json!({ "sessionId": session_id, "memberId": member_id, "status": status }),
    );
}
