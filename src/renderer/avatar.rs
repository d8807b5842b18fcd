//! Inlining of local avatar files as `data:` URIs
//!
//! Rasterizers do not fetch remote or relative images reliably, so avatars
//! that point at files on disk can be embedded into the document instead.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

use crate::model::Sponsorship;

/// MIME type for an avatar file, by extension
fn mime_for(path: &Path) -> Option<&'static str> {
    let ext = path.extension()?.to_str()?.to_ascii_lowercase();
    match ext.as_str() {
        "png" => Some("image/png"),
        "jpg" | "jpeg" => Some("image/jpeg"),
        "gif" => Some("image/gif"),
        "webp" => Some("image/webp"),
        "svg" => Some("image/svg+xml"),
        _ => None,
    }
}

/// Local path an avatar URL refers to, if any
fn local_path(url: &str, base_dir: &Path) -> Option<PathBuf> {
    if let Some(path) = url.strip_prefix("file://") {
        return Some(PathBuf::from(path));
    }
    if url.starts_with("data:") || url.contains("://") {
        return None;
    }
    let path = Path::new(url);
    if path.is_absolute() {
        Some(path.to_path_buf())
    } else {
        Some(base_dir.join(path))
    }
}

/// Encode `bytes` as a `data:` URI
pub fn data_uri(mime: &str, bytes: &[u8]) -> String {
    format!("data:{mime};base64,{}", STANDARD.encode(bytes))
}

/// Replace local avatar references with embedded `data:` URIs
///
/// Remote URLs and existing `data:` URIs are left alone. Unreadable files and
/// unknown extensions are logged and left as they were. Returns the number of
/// avatars embedded.
pub fn embed_local_avatars(sponsorships: &mut [Sponsorship], base_dir: &Path) -> usize {
    let mut embedded = 0;
    for sponsorship in sponsorships.iter_mut() {
        let sponsor = &mut sponsorship.sponsor;
        let Some(path) = local_path(&sponsor.avatar_url, base_dir) else {
            continue;
        };
        let Some(mime) = mime_for(&path) else {
            tracing::warn!(login = %sponsor.login, path = %path.display(), "unknown avatar image type");
            continue;
        };
        match std::fs::read(&path) {
            Ok(bytes) => {
                sponsor.avatar_url = data_uri(mime, &bytes);
                embedded += 1;
            }
            Err(err) => {
                tracing::warn!(login = %sponsor.login, path = %path.display(), "cannot read avatar: {err}");
            }
        }
    }
    tracing::debug!(embedded, "embedded local avatars");
    embedded
}
