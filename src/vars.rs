use crate::runner::{CommandRunner, SystemCommandRunner};
use crate::sops::{decrypt_sops_file_with, is_encrypted_sops_file};
use anyhow::{Context, Result};
use serde_yaml::Value;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Load a YAML vars file, transparently decrypting it when it turns out to
/// be SOPS-encrypted.
///
/// Plain files are parsed directly; encrypted files are routed through the
/// external `sops` binary. Passes back the decoded document to the caller's
/// vars loader.
pub fn load_vars_file(path: &Path) -> Result<Value> {
    load_vars_file_with(path, &SystemCommandRunner)
}

/// Load a YAML vars file using a caller-supplied command runner for the
/// decryption step.
pub fn load_vars_file_with(path: &Path, runner: &dyn CommandRunner) -> Result<Value> {
    let mut file = File::open(path)
        .with_context(|| format!("Failed to open vars file at {}", path.display()))?;

    if is_encrypted_sops_file(&mut file)? {
        debug!("vars file {} is SOPS-encrypted, decrypting", path.display());
        return Ok(decrypt_sops_file_with(path, runner)?);
    }

    let mut contents = String::new();
    file.read_to_string(&mut contents)
        .with_context(|| format!("Failed to read vars file at {}", path.display()))?;

    serde_yaml::from_str(&contents)
        .with_context(|| format!("Failed to parse YAML from vars file at {}", path.display()))
}
