//! Photo upload stub. There is no real upload backend: the file is copied
//! into the workspace under a content-hash name and the returned reference is
//! what gets stored on the member record. The rest of the system treats the
//! reference as an opaque string.

use anyhow::Context;
use sha2::{Digest, Sha256};
use std::path::Path;

pub const PHOTOS_DIR: &str = "photos";

/// Copies `source` into `<workspace>/photos/` and returns the
/// workspace-relative reference. Re-uploading identical bytes lands on the
/// same name, so duplicate uploads cost nothing.
pub fn upload(workspace: &Path, source: &Path) -> anyhow::Result<String> {
    let bytes = std::fs::read(source)
        .with_context(|| format!("failed to read upload source {}", source.to_string_lossy()))?;

    let digest = Sha256::digest(&bytes);
    let mut hash = String::with_capacity(digest.len() * 2);
    for byte in digest {
        hash.push_str(&format!("{:02x}", byte));
    }
    let ext = source
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_else(|| "bin".to_string());
    let file_name = format!("{hash}.{ext}");

    let dir = workspace.join(PHOTOS_DIR);
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.to_string_lossy()))?;
    let dest = dir.join(&file_name);
    std::fs::write(&dest, &bytes)
        .with_context(|| format!("failed to write {}", dest.to_string_lossy()))?;

    Ok(format!("{PHOTOS_DIR}/{file_name}"))
}
