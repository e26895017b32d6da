use sha2::Digest as _;

use crate::codec::RenderMode;

use super::state::QrSession;

const PREFIX: &str = "bbqr";
const EXTENSION: &str = "png";

/// Hex of the last 16 bytes of SHA-256 over `raw`.
pub fn content_fingerprint(raw: &[u8]) -> String {
    let digest = sha2::Sha256::digest(raw);
    let mut out = String::with_capacity(32);
    for b in &digest[digest.len() - 16..] {
        out.push_str(&format!("{b:02x}"));
    }
    out
}

/// `bbqr-<type>-<fingerprint>[-<frames>-<selector>].png`
///
/// The multiplicity suffix is only present for multi-frame sessions, where the animated and
/// stacked artifacts differ.
pub fn download_filename(session: &QrSession, selector: RenderMode) -> String {
    let fingerprint = content_fingerprint(&session.raw_bytes);
    let suffix = if session.frame_count() > 1 {
        let sel = match selector {
            RenderMode::Animated => "animated",
            RenderMode::Stacked => "stacked",
        };
        format!("-{}-{sel}", session.frame_count())
    } else {
        String::new()
    };
    format!(
        "{PREFIX}-{}-{fingerprint}{suffix}.{EXTENSION}",
        session.file_type
    )
}

#[cfg(test)]
#[path = "../../tests/unit/session/naming.rs"]
mod tests;
