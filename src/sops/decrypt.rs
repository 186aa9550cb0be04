use crate::error::{SopsError, SopsResult};
use crate::runner::{CommandRunner, SystemCommandRunner};
use serde_yaml::Value;
use std::ffi::OsStr;
use std::path::Path;
use tracing::debug;

/// Name of the external SOPS binary, resolved through PATH
pub const SOPS_BINARY: &str = "sops";

/// Decrypt a SOPS-encrypted vars file by shelling out to the `sops` binary
/// and parsing the decrypted YAML from its stdout.
///
/// Assumes the file at `path` is a valid SOPS-encrypted YAML file; use
/// [`is_encrypted_sops_file`](crate::is_encrypted_sops_file) to check first.
/// JSON files are not supported.
pub fn decrypt_sops_file(path: &Path) -> SopsResult<Value> {
    decrypt_sops_file_with(path, &SystemCommandRunner)
}

/// Decrypt a SOPS-encrypted vars file through a caller-supplied runner.
///
/// The runner seam exists so tests can script tool behavior, and so hosts
/// can wrap the invocation (e.g. with a deadline) without patching this
/// crate.
pub fn decrypt_sops_file_with(path: &Path, runner: &dyn CommandRunner) -> SopsResult<Value> {
    // Pass the path as OsStr so non-UTF-8 names reach sops unmangled
    let args = [
        OsStr::new("--input-type"),
        OsStr::new("yaml"),
        OsStr::new("--decrypt"),
        path.as_os_str(),
    ];

    let output = match runner.run(SOPS_BINARY, &args) {
        Ok(output) => output,
        Err(source) => {
            return Err(SopsError::ToolNotFound {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    if !output.status.success() {
        debug!(
            "sops exited with {:?} for {}: {}",
            output.status.code(),
            path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
        return Err(SopsError::DecryptionFailed {
            path: path.to_path_buf(),
            exit_code: output.status.code(),
        });
    }

    match serde_yaml::from_slice(&output.stdout) {
        Ok(value) => Ok(value),
        Err(source) => Err(SopsError::DecryptedContentNotYaml {
            path: path.to_path_buf(),
            source,
        }),
    }
}
