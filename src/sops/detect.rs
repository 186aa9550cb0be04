use serde::Deserialize;
use std::io::{Read, Seek, SeekFrom};
use tracing::trace;

/// All SOPS-encrypted vars files carry a top-level "sops" key holding the
/// encryption envelope. These subkeys are the minimum expected inside it.
#[derive(Debug, Deserialize)]
struct SopsMetadata {
    #[allow(dead_code)]
    lastmodified: serde_yaml::Value,
    #[allow(dead_code)]
    mac: serde_yaml::Value,
    #[allow(dead_code)]
    version: serde_yaml::Value,
}

/// Shape a SOPS-encrypted vars file must deserialize into. Unknown keys
/// (the encrypted vars themselves) are ignored; a non-mapping document or
/// a non-mapping "sops" value fails to deserialize and counts as negative.
#[derive(Debug, Deserialize)]
struct SopsEnvelope {
    #[allow(dead_code)]
    sops: SopsMetadata,
}

/// Check whether the given filehandle is likely a SOPS-encrypted vars file,
/// determined by the presence of a top-level 'sops' key with the expected
/// metadata subkeys.
///
/// Reads from the start of the stream and restores the stream position
/// before returning. Assumes the file is YAML; JSON files are not supported.
pub fn is_encrypted_sops_file<F: Read + Seek>(file: &mut F) -> std::io::Result<bool> {
    is_encrypted_sops_file_at(file, 0, None)
}

/// Check a window of the stream for the SOPS envelope, reading up to `count`
/// bytes starting at `start_pos` (to end of stream when `count` is None).
///
/// The stream position is restored on every exit path once it has been
/// captured, including when reading fails. I/O errors propagate to the
/// caller; YAML parse errors only make the verdict negative.
pub fn is_encrypted_sops_file_at<F: Read + Seek>(
    file: &mut F,
    start_pos: u64,
    count: Option<u64>,
) -> std::io::Result<bool> {
    let original_position = file.stream_position()?;

    let verdict = inspect_header(file, start_pos, count);
    let restore = file.seek(SeekFrom::Start(original_position));

    // An inspection I/O error is the proximate cause, report it first
    let verdict = verdict?;
    restore?;

    Ok(verdict)
}

fn inspect_header<F: Read + Seek>(
    file: &mut F,
    start_pos: u64,
    count: Option<u64>,
) -> std::io::Result<bool> {
    file.seek(SeekFrom::Start(start_pos))?;

    let mut header = Vec::new();
    match count {
        Some(limit) => {
            file.by_ref().take(limit).read_to_end(&mut header)?;
        }
        None => {
            file.read_to_end(&mut header)?;
        }
    }

    match serde_yaml::from_slice::<SopsEnvelope>(&header) {
        Ok(_) => Ok(true),
        Err(error) => {
            trace!("not a SOPS vars file: {}", error);
            Ok(false)
        }
    }
}
