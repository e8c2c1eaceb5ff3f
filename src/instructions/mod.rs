//! Instruction-file interpreters
//!
//! Two input formats turn into an ordered list of [`Instruction`]s:
//!
//! - text: a path line followed by one or more `start-end` lines, repeated;
//!   blank lines are ignored.
//! - clips: a concat manifest; each provenance comment
//!   `# <path> <start>-<end>` becomes its own single-cut instruction and
//!   every other line is ignored.
//!
//! Input paths must exist unless the run is a dry run.

use std::path::{Path, PathBuf};

use tracing::debug;

use crate::domain::errors::*;
use crate::domain::model::*;
use crate::domain::rules::match_cut_range;
use crate::manifest::parse_provenance;
use crate::ports::FsPort;

/// Interpret a text cut list
pub async fn interpret_text(text: &str, dry_run: bool, fs: &dyn FsPort) -> DomainResult<Vec<Instruction>> {
    let mut instructions: Vec<Instruction> = Vec::new();

    for raw_line in text.lines() {
        let line = raw_line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(cut) = match_cut_range(line) {
            let current = instructions.last_mut().ok_or_else(|| DomainError::MissingInput {
                line: line.to_string(),
            })?;
            current.cuts.push(cut);
        } else {
            let input = PathBuf::from(line);
            ensure_exists(&input, dry_run, fs).await?;
            instructions.push(Instruction::new(input));
        }
    }

    debug!("parsed {} instructions from text input", instructions.len());
    Ok(instructions)
}

/// Interpret the provenance comments of a clips manifest
pub async fn interpret_clips(text: &str, dry_run: bool, fs: &dyn FsPort) -> DomainResult<Vec<Instruction>> {
    let mut instructions = Vec::new();

    for raw_line in text.lines() {
        if let Some((input, cut)) = parse_provenance(raw_line.trim()) {
            ensure_exists(&input, dry_run, fs).await?;
            instructions.push(Instruction::with_cuts(input, vec![cut]));
        }
    }

    debug!("parsed {} instructions from clips input", instructions.len());
    Ok(instructions)
}

async fn ensure_exists(path: &Path, dry_run: bool, fs: &dyn FsPort) -> DomainResult<()> {
    if dry_run || fs.file_exists(path).await? {
        Ok(())
    } else {
        Err(DomainError::NotFound {
            path: path.to_path_buf(),
        })
    }
}

/// Human-readable echo of what was parsed
pub fn describe(instructions: &[Instruction]) -> String {
    let mut text = String::from("parsed input:");
    for instruction in instructions {
        text.push_str(&format!("\n    {}", instruction));
    }
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::MemoryFs;

    const TEXT: &str = "
        videos/first.mkv
        00:28:30.550-00:28:35.718
        00:28:57.711-00:29:03.068

        videos/second.mp4
        01:00.000-01:10.000
    ";

    fn fs() -> MemoryFs {
        MemoryFs::new()
            .with_file("videos/first.mkv", "x")
            .with_file("videos/second.mp4", "x")
    }

    #[tokio::test]
    async fn test_text_groups_cuts_under_paths() {
        let instructions = interpret_text(TEXT, false, &fs()).await.unwrap();
        assert_eq!(instructions.len(), 2);
        assert_eq!(instructions[0].input, Path::new("videos/first.mkv"));
        assert_eq!(
            instructions[0].cuts.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["00:28:30.550-00:28:35.718", "00:28:57.711-00:29:03.068"]
        );
        assert_eq!(instructions[1].to_string(), "videos/second.mp4 01:00.000-01:10.000");
    }

    #[tokio::test]
    async fn test_text_cut_before_path_is_missing_input() {
        let err = interpret_text("00:00:01.000-00:00:02.000\na.mp4\n", true, &MemoryFs::new())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::MissingInput { line } if line == "00:00:01.000-00:00:02.000"));
    }

    #[tokio::test]
    async fn test_text_missing_input_path() {
        let err = interpret_text(TEXT, false, &MemoryFs::new()).await.unwrap_err();
        assert!(matches!(err, DomainError::NotFound { path } if path == Path::new("videos/first.mkv")));
    }

    #[tokio::test]
    async fn test_dry_run_tolerates_missing_inputs() {
        let instructions = interpret_text(TEXT, true, &MemoryFs::new()).await.unwrap();
        assert_eq!(instructions.len(), 2);
    }

    #[tokio::test]
    async fn test_text_path_without_cuts_is_kept() {
        let instructions = interpret_text("a.mp4\n", true, &MemoryFs::new()).await.unwrap();
        assert_eq!(instructions, vec![Instruction::new("a.mp4")]);
    }

    #[tokio::test]
    async fn test_clips_makes_one_instruction_per_comment() {
        let text = "# videos/first.mkv 00:28:30.550-00:28:35.718\n\
                    file 'out-000.mp4'\n\
                    \n\
                    # videos/first.mkv 00:28:57.711-00:29:03.068\n\
                    file 'out-001.mp4'\n\
                    # videos/second.mp4 01:00.000-01:10.000\n";
        let instructions = interpret_clips(text, false, &fs()).await.unwrap();
        assert_eq!(instructions.len(), 3);
        assert!(instructions.iter().all(|i| i.cuts.len() == 1));
        assert_eq!(instructions[0].input, instructions[1].input);
        assert_eq!(instructions[2].cuts[0].to_string(), "01:00.000-01:10.000");
    }

    #[tokio::test]
    async fn test_clips_missing_input() {
        let text = "# gone.mkv 00:01.000-00:02.000\n";
        assert!(matches!(
            interpret_clips(text, false, &MemoryFs::new()).await,
            Err(DomainError::NotFound { .. })
        ));
        assert_eq!(interpret_clips(text, true, &MemoryFs::new()).await.unwrap().len(), 1);
    }

    #[test]
    fn test_describe() {
        let instructions = vec![Instruction::new("a.mp4"), Instruction::new("b.mp4")];
        assert_eq!(describe(&instructions), "parsed input:\n    a.mp4\n    b.mp4");
    }
}
