//! Support for SOPS-encrypted YAML vars files.
//!
//! A thin shim between a YAML parser and the external `sops` binary: the
//! detector decides whether an open file looks SOPS-encrypted without
//! disturbing its read position, and the decryptor shells out to `sops`
//! and parses the decrypted document from its stdout. The host
//! configuration loader is expected to call the detector first, then the
//! decryptor.
//!
//! No encryption, key management, or JSON secrets support; decrypted
//! output is never cached.

pub mod error;
pub mod runner;
pub mod sops;
pub mod vars;

pub use error::{SopsError, SopsResult};
pub use runner::{CommandRunner, SystemCommandRunner};
pub use sops::{
    SOPS_BINARY, decrypt_sops_file, decrypt_sops_file_with, is_encrypted_sops_file,
    is_encrypted_sops_file_at,
};
pub use vars::{load_vars_file, load_vars_file_with};
