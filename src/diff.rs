//! Structured line diff between generated and expected output, with
//! colorized rendering.

use std::io::Write;
use std::path::PathBuf;

use difference::{Changeset, Difference};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

use crate::config::SuiteConfig;

/// Unchanged runs longer than this are elided when rendered.
const CROP_THRESHOLD: usize = 6;
/// Lines kept at each end of an elided unchanged run.
const CROP_CONTEXT: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HunkTag {
    Unchanged,
    Added,
    Removed,
}

/// A contiguous span of diff lines sharing one tag.
#[derive(Debug, Clone)]
pub struct Hunk {
    pub tag: HunkTag,
    pub lines: Vec<String>,
}

/// Line-level diff of one generated file against its expected counterpart.
///
/// The hunk sequence partitions both files: every expected line appears in an
/// Unchanged or Removed hunk, every generated line in an Unchanged or Added
/// one. Rendering may visually crop long unchanged runs but never drops
/// changed content.
#[derive(Debug)]
pub struct DiffResult {
    pub generated: PathBuf,
    pub expected: PathBuf,
    pub hunks: Vec<Hunk>,
}

impl DiffResult {
    pub fn compute(
        generated: PathBuf,
        expected: PathBuf,
        expected_text: &str,
        generated_text: &str,
    ) -> Self {
        let changeset = Changeset::new(expected_text, generated_text, "\n");
        let hunks = changeset
            .diffs
            .into_iter()
            .map(|diff| {
                let (tag, chunk) = match diff {
                    Difference::Same(chunk) => (HunkTag::Unchanged, chunk),
                    Difference::Add(chunk) => (HunkTag::Added, chunk),
                    Difference::Rem(chunk) => (HunkTag::Removed, chunk),
                };
                Hunk { tag, lines: chunk.split('\n').map(str::to_string).collect() }
            })
            .collect();
        Self { generated, expected, hunks }
    }

    /// True when the files match: no Added or Removed hunk anywhere.
    pub fn is_clean(&self) -> bool {
        self.hunks.iter().all(|h| h.tag == HunkTag::Unchanged)
    }
}

/// One renderable line of a diff block.
#[derive(Debug, PartialEq, Eq)]
pub enum DiffLine {
    Unchanged(String),
    Added(String),
    Removed(String),
    /// Elision marker for a cropped unchanged run.
    Cropped(usize),
}

/// Flattens hunks into renderable lines, cropping unchanged runs longer than
/// [`CROP_THRESHOLD`] down to [`CROP_CONTEXT`] lines at each end.
pub fn render_lines(result: &DiffResult) -> Vec<DiffLine> {
    let mut out = Vec::new();
    for hunk in &result.hunks {
        match hunk.tag {
            HunkTag::Added => {
                out.extend(hunk.lines.iter().map(|l| DiffLine::Added(l.clone())));
            }
            HunkTag::Removed => {
                out.extend(hunk.lines.iter().map(|l| DiffLine::Removed(l.clone())));
            }
            HunkTag::Unchanged if hunk.lines.len() > CROP_THRESHOLD => {
                let hidden = hunk.lines.len() - 2 * CROP_CONTEXT;
                for line in &hunk.lines[..CROP_CONTEXT] {
                    out.push(DiffLine::Unchanged(line.clone()));
                }
                out.push(DiffLine::Cropped(hidden));
                for line in &hunk.lines[hunk.lines.len() - CROP_CONTEXT..] {
                    out.push(DiffLine::Unchanged(line.clone()));
                }
            }
            HunkTag::Unchanged => {
                out.extend(hunk.lines.iter().map(|l| DiffLine::Unchanged(l.clone())));
            }
        }
    }
    out
}

/// Prints a full diff block: underlined file path, then tagged lines.
pub fn print_diff(result: &DiffResult, config: &SuiteConfig) {
    let choice = if config.use_colors { ColorChoice::Auto } else { ColorChoice::Never };
    let mut stdout = StandardStream::stdout(choice);

    let _ = stdout.set_color(ColorSpec::new().set_underline(true));
    let _ = writeln!(stdout, "\n{}\n", result.generated.display());
    let _ = stdout.reset();

    for line in render_lines(result) {
        match line {
            DiffLine::Added(text) => {
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Green)));
                let _ = writeln!(stdout, "+{text}");
            }
            DiffLine::Removed(text) => {
                let _ = stdout.set_color(ColorSpec::new().set_fg(Some(Color::Red)));
                let _ = writeln!(stdout, "-{text}");
            }
            DiffLine::Unchanged(text) => {
                let _ = stdout.reset();
                let _ = writeln!(stdout, " {text}");
            }
            DiffLine::Cropped(hidden) => {
                let _ = stdout.set_color(ColorSpec::new().set_dimmed(true));
                let _ = writeln!(stdout, "    ( cropped {hidden} lines )");
            }
        }
    }
    let _ = stdout.reset();
}
