//! Clear and check commands
//!
//! Files without `--lines` or `--stdout` go through the `clear-todos-file`
//! command. Everything else is loaded into a [`Buffer`] first so a line range
//! can act as the selection, then handed to `clear-todos`.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::Serialize;

use super::output::Output;
use crate::domain::count_completed;
use crate::plugin::{CommandRegistry, Workspace, CLEAR_TODOS, CLEAR_TODOS_FILE};
use crate::storage::{Buffer, FileSource, StreamSource, TextSource, WriteMode};

const STDIN_LABEL: &str = "<stdin>";

/// 1-based inclusive line range, written `START:END` or `LINE`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl FromStr for LineRange {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (start, end) = s.split_once(':').unwrap_or((s, s));

        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| format!("invalid line number '{}'", part))
        };

        let range = Self {
            start: parse(start)?,
            end: parse(end)?,
        };

        if range.start == 0 || range.start > range.end {
            return Err(format!("invalid line range '{}' (lines start at 1)", s));
        }

        Ok(range)
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

/// Options for `clear`
#[derive(Debug, Clone, Default)]
pub struct ClearOptions {
    /// Lines acting as the selection
    pub lines: Option<LineRange>,

    /// Report without writing
    pub dry_run: bool,

    /// Print results instead of writing files
    pub to_stdout: bool,

    /// Leave inputs with nothing to remove untouched
    pub skip_unchanged: bool,
}

impl ClearOptions {
    fn write_mode(&self) -> WriteMode {
        if self.dry_run || self.to_stdout {
            WriteMode::Never
        } else if self.skip_unchanged {
            WriteMode::IfChanged
        } else {
            WriteMode::Always
        }
    }
}

#[derive(Debug, Serialize)]
struct ClearReport {
    path: String,
    removed: usize,
    written: bool,
}

impl ClearReport {
    fn message(&self, dry_run: bool) -> String {
        if self.removed == 0 {
            format!("{}: nothing to clear", self.path)
        } else if dry_run {
            format!("{}: would remove {} completed item(s)", self.path, self.removed)
        } else {
            format!("{}: removed {} completed item(s)", self.path, self.removed)
        }
    }
}

#[derive(Debug, Serialize)]
struct CheckReport {
    path: String,
    completed: usize,
}

/// Clears completed items from files, or from stdin to stdout
pub fn clear(
    registry: &CommandRegistry,
    output: &Output,
    files: &[PathBuf],
    options: &ClearOptions,
) -> Result<()> {
    if options.lines.is_some() && files.len() > 1 {
        bail!("--lines needs a single input, got {} files", files.len());
    }

    if files.is_empty() {
        return clear_stream(registry, output, options);
    }

    let mut reports = Vec::new();
    let mut failed = 0;

    for path in files {
        output.verbose_ctx("clear", &format!("Processing {}", path.display()));

        match clear_file(registry, path, options) {
            Ok(report) => {
                output.verbose_ctx(
                    "clear",
                    &format!("{}: removed={}, written={}", report.path, report.removed, report.written),
                );
                if !options.to_stdout && !output.is_json() {
                    output.success(&report.message(options.dry_run));
                }
                reports.push(report);
            }
            Err(e) => {
                output.warn(&format!("{:#}", e));
                failed += 1;
            }
        }
    }

    if output.is_json() && !options.to_stdout {
        output.data(&reports);
    }

    if failed > 0 {
        bail!("{} of {} file(s) could not be cleared", failed, files.len());
    }

    Ok(())
}

fn clear_file(registry: &CommandRegistry, path: &Path, options: &ClearOptions) -> Result<ClearReport> {
    let mode = options.write_mode();
    let label = path.display().to_string();

    if options.lines.is_none() && !options.to_stdout {
        let mut workspace = Workspace::new().with_file(path).with_write_mode(mode);
        let outcome = registry.invoke(CLEAR_TODOS_FILE, &mut workspace)?;

        return Ok(ClearReport {
            path: label,
            removed: outcome.removed(),
            written: mode.writes(outcome.removed()),
        });
    }

    let mut source = FileSource::new(path);
    let buffer = load_buffer(source.read()?, options.lines)?;

    let (removed, buffer) = run_in_buffer(registry, buffer)?;

    let written = mode.writes(removed);
    if options.to_stdout {
        print!("{}", buffer.text());
    } else if written {
        source.write_back(buffer.text())?;
    }

    Ok(ClearReport {
        path: label,
        removed,
        written,
    })
}

fn clear_stream(registry: &CommandRegistry, output: &Output, options: &ClearOptions) -> Result<()> {
    let mut source = StreamSource::stdio();
    let buffer = load_buffer(source.read()?, options.lines)?;

    let (removed, buffer) = run_in_buffer(registry, buffer)?;
    output.verbose_ctx("clear", &format!("Removed {} completed item(s) from {}", removed, STDIN_LABEL));

    if options.dry_run {
        let report = ClearReport {
            path: STDIN_LABEL.to_string(),
            removed,
            written: false,
        };
        if output.is_json() {
            output.data(&report);
        } else {
            output.success(&report.message(true));
        }
        return Ok(());
    }

    // A pipe always gets the full document back, changed or not
    source.write_back(buffer.text())?;
    Ok(())
}

/// Runs `clear-todos` against a buffer and hands the buffer back
fn run_in_buffer(registry: &CommandRegistry, buffer: Buffer) -> Result<(usize, Buffer)> {
    let mut workspace = Workspace::new().with_buffer(buffer);
    let outcome = registry.invoke(CLEAR_TODOS, &mut workspace)?;

    let buffer = workspace
        .buffer
        .context("Command did not return the active document")?;

    Ok((outcome.removed(), buffer))
}

fn load_buffer(text: String, lines: Option<LineRange>) -> Result<Buffer> {
    let mut buffer = Buffer::new(text);

    if let Some(lines) = lines {
        let range = buffer
            .line_range(lines.start, lines.end)
            .with_context(|| format!("Cannot select lines {}", lines))?;
        buffer.select(range)?;
    }

    Ok(buffer)
}

/// Counts completed items without modifying anything
///
/// Fails if any completed item is found, so it can gate scripts.
pub fn check(output: &Output, files: &[PathBuf]) -> Result<()> {
    let mut reports = Vec::new();
    let mut failed = 0;

    if files.is_empty() {
        let text = StreamSource::stdio().read()?;
        reports.push(CheckReport {
            path: STDIN_LABEL.to_string(),
            completed: count_completed(&text),
        });
    }

    for path in files {
        match FileSource::new(path).read() {
            Ok(text) => reports.push(CheckReport {
                path: path.display().to_string(),
                completed: count_completed(&text),
            }),
            Err(e) => {
                output.warn(&format!("{:#}", anyhow::Error::from(e)));
                failed += 1;
            }
        }
    }

    if output.is_json() {
        output.data(&reports);
    } else {
        for report in &reports {
            output.success(&format!("{}: {} completed item(s)", report.path, report.completed));
        }
    }

    if failed > 0 {
        bail!("{} of {} file(s) could not be read", failed, files.len());
    }

    let total: usize = reports.iter().map(|r| r.completed).sum();
    if total > 0 {
        bail!("{} completed item(s) found", total);
    }

    Ok(())
}
