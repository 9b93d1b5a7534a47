//! File intake: normalizes a candidate list into at most one accepted file.
//!
//! The extension filter is deliberately coarse; the processing service runs
//! the authoritative media check on its side.

use std::path::{Path, PathBuf};

use client_logging::client_warn;

const MEDIA_EXTENSIONS: &[&str] = &[
    "mp4", "mov", "mkv", "avi", "webm", "flv", "ts", "m4v", "mp3", "wav", "m4a", "aac", "flac",
    "ogg",
];

fn is_media_file(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            MEDIA_EXTENSIONS
                .iter()
                .any(|allowed| allowed.eq_ignore_ascii_case(ext))
        })
}

/// Picks the first media file from a drop/picker candidate list.
///
/// Additional files are ignored, not queued: one tracked task per session.
pub fn accept_first_media(candidates: &[PathBuf]) -> Option<PathBuf> {
    let mut accepted = candidates.iter().filter(|path| is_media_file(path));
    let first = accepted.next()?.clone();

    let skipped_media = accepted.count();
    let rejected = candidates.len() - skipped_media - 1;
    if skipped_media > 0 {
        client_warn!("Ignoring {skipped_media} extra media file(s); one task at a time");
    }
    if rejected > 0 {
        client_warn!("Rejected {rejected} non-media file(s)");
    }
    Some(first)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_first_media_file_only() {
        let candidates = vec![
            PathBuf::from("notes.txt"),
            PathBuf::from("lecture.MP4"),
            PathBuf::from("extra.mov"),
        ];
        assert_eq!(
            accept_first_media(&candidates),
            Some(PathBuf::from("lecture.MP4"))
        );
    }

    #[test]
    fn rejects_non_media_candidates() {
        let candidates = vec![PathBuf::from("slides.pdf"), PathBuf::from("readme.md")];
        assert_eq!(accept_first_media(&candidates), None);
    }

    #[test]
    fn empty_list_yields_nothing() {
        assert_eq!(accept_first_media(&[]), None);
    }
}
