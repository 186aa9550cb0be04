//! Detection and decryption of SOPS-encrypted vars files.
//!
//! SOPS encrypts values in place and attaches a metadata envelope under a
//! reserved top-level `sops` key; detection inspects that envelope, and
//! decryption shells out to the external `sops` binary.

mod decrypt;
mod detect;

pub use decrypt::{SOPS_BINARY, decrypt_sops_file, decrypt_sops_file_with};
pub use detect::{is_encrypted_sops_file, is_encrypted_sops_file_at};
