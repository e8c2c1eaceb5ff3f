//! Concat manifest (`.clips`) reading and writing
//!
//! A manifest lists one clip per entry, in concatenation order:
//!
//! ```text
//! # <original input> <start>-<end>
//! file '<clip path>'
//! ```
//!
//! The comment is the only record of where a clip came from, so it is
//! written for every clip and parsed back when joining. `file` paths are
//! written relative to the manifest's own directory, which is where the
//! concat demuxer resolves them from.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::CLIP_COMMENT_RE;
use crate::ports::FsPort;
use crate::utils::path::{relative_to, resolve_from};
use crate::utils::shell;

/// Render `ledger` in the ffmpeg concat-demuxer grammar for a manifest in `manifest_dir`
pub fn render(ledger: &ClipLedger, manifest_dir: &Path) -> String {
    ledger
        .clips()
        .iter()
        .map(|clip| {
            format!(
                "# {} {}\nfile {}\n",
                clip.input.display(),
                clip.cut,
                shell::quote(&relative_to(&clip.output, manifest_dir).to_string_lossy())
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Parse a provenance comment into its input path and cut
pub fn parse_provenance(line: &str) -> Option<(PathBuf, Cut)> {
    let captures = CLIP_COMMENT_RE.captures(line)?;
    let cut = Cut::new(
        Timestamp::new_unchecked(&captures["start"]),
        Timestamp::new_unchecked(&captures["end"]),
    );
    Some((PathBuf::from(&captures["path"]), cut))
}

/// Result of re-reading a manifest
#[derive(Debug, Default)]
pub struct ParsedManifest {
    pub ledger: ClipLedger,
    pub warnings: Vec<ManifestWarning>,
}

/// Provenance comment waiting for its `file` line
struct PendingComment {
    line_number: usize,
    line: String,
    input: PathBuf,
    cut: Cut,
}

/// Rebuild a ledger from the text of a manifest that lives in `manifest_dir`
///
/// Entries whose clip file no longer exists are dropped and lines that fit
/// neither half of an entry are skipped; both are reported as warnings
/// rather than errors.
pub async fn parse(text: &str, manifest_dir: &Path, fs: &dyn FsPort) -> DomainResult<ParsedManifest> {
    let mut parsed = ParsedManifest::default();
    let mut pending: Option<PendingComment> = None;

    for (index, raw_line) in text.lines().enumerate() {
        let line_number = index + 1;
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if line.starts_with('#') {
            match parse_provenance(line) {
                Some((input, cut)) => {
                    let replaced = pending.replace(PendingComment {
                        line_number,
                        line: line.to_string(),
                        input,
                        cut,
                    });
                    if let Some(orphan) = replaced {
                        parsed.warn_orphan(orphan);
                    }
                }
                None => parsed.warn(ManifestWarning::MalformedLine {
                    line_number,
                    line: line.to_string(),
                }),
            }
            continue;
        }

        let clip_file = match shell::split(line).as_deref() {
            Some([keyword, path]) if keyword == "file" => resolve_from(Path::new(path), manifest_dir),
            _ => {
                parsed.warn(ManifestWarning::MalformedLine {
                    line_number,
                    line: line.to_string(),
                });
                continue;
            }
        };

        let Some(PendingComment { input, cut, .. }) = pending.take() else {
            parsed.warn(ManifestWarning::MalformedLine {
                line_number,
                line: line.to_string(),
            });
            continue;
        };

        if fs.file_exists(&clip_file).await? {
            parsed.ledger.append(input, cut, clip_file);
        } else {
            parsed.warn(ManifestWarning::StaleReference {
                line_number,
                path: clip_file,
            });
        }
    }

    if let Some(orphan) = pending {
        parsed.warn_orphan(orphan);
    }

    Ok(parsed)
}

impl ParsedManifest {
    fn warn(&mut self, warning: ManifestWarning) {
        warn!("{}", warning);
        self.warnings.push(warning);
    }

    /// A provenance comment that never got its `file` line
    fn warn_orphan(&mut self, comment: PendingComment) {
        self.warn(ManifestWarning::MalformedLine {
            line_number: comment.line_number,
            line: comment.line,
        });
    }
}
