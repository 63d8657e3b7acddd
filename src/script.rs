//! Line-oriented replay of editor control events.
//!
//! ```text
//! # comments and blank lines are skipped
//! upload photo.jpg
//! size 480
//! thickness 25
//! rotate 90
//! overlay on
//! preview preview.png
//! download icon.png
//! reset
//! ```
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;

use crate::{
    editor::{prompt::Prompt, state::Editor},
    export::png::{DEFAULT_FILE_NAME, write_png},
    foundation::error::{IconRingError, IconRingResult},
};

/// One control event.
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptCommand {
    /// Load an image file.
    Upload(PathBuf),
    /// Thickness slider, percent.
    Thickness(f64),
    /// Size slider, pixel diameter.
    Size(f64),
    /// Rotation slider, degrees.
    Rotate(f64),
    /// Flip overlay visibility.
    ToggleOverlay,
    /// Force overlay visibility.
    Overlay(bool),
    /// Remove the image (asks for confirmation).
    Reset,
    /// Export without the overlay. `None` writes the default file name.
    Download(Option<PathBuf>),
    /// Write the canvas as shown, overlay included.
    Preview(PathBuf),
    /// Print the control values as JSON.
    State,
}

/// A parsed command with its 1-based source line.
#[derive(Clone, Debug, PartialEq)]
pub struct ScriptLine {
    /// 1-based line number.
    pub line: usize,
    /// The command on that line.
    pub command: ScriptCommand,
}

/// What a script run produced.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ScriptReport {
    /// Commands executed.
    pub executed: usize,
    /// Files written by `download` and `preview`.
    pub written: Vec<PathBuf>,
    /// Downloads refused because no image was loaded.
    pub refused_downloads: usize,
}

/// Parse a whole script. Relative paths resolve against `base_dir`.
pub fn parse_script(src: &str, base_dir: &Path) -> IconRingResult<Vec<ScriptLine>> {
    let mut out = Vec::new();
    for (idx, raw) in src.lines().enumerate() {
        let line = idx + 1;
        let text = strip_comment(raw).trim();
        if text.is_empty() {
            continue;
        }
        let command = parse_command(text, base_dir).map_err(|msg| IconRingError::script(line, msg))?;
        out.push(ScriptLine { line, command });
    }
    Ok(out)
}

/// Drop a `#` comment. Only a `#` at the start of the line or after whitespace opens one,
/// so paths like `my#photo.png` stay intact.
fn strip_comment(line: &str) -> &str {
    let mut prev_is_space = true;
    for (idx, ch) in line.char_indices() {
        if ch == '#' && prev_is_space {
            return &line[..idx];
        }
        prev_is_space = ch.is_whitespace();
    }
    line
}

fn parse_command(text: &str, base_dir: &Path) -> Result<ScriptCommand, String> {
    let (verb, rest) = match text.split_once(char::is_whitespace) {
        Some((v, r)) => (v, r.trim()),
        None => (text, ""),
    };

    let path_arg = |rest: &str| -> Result<PathBuf, String> {
        if rest.is_empty() {
            return Err(format!("`{verb}` needs a path"));
        }
        Ok(base_dir.join(rest))
    };
    let number_arg = |rest: &str| -> Result<f64, String> {
        let v: f64 = rest
            .parse()
            .map_err(|_| format!("`{verb}` needs a number, got `{rest}`"))?;
        if !v.is_finite() {
            return Err(format!("`{verb}` needs a finite number"));
        }
        Ok(v)
    };
    let no_arg = |cmd: ScriptCommand| -> Result<ScriptCommand, String> {
        if rest.is_empty() {
            Ok(cmd)
        } else {
            Err(format!("`{verb}` takes no argument"))
        }
    };

    match verb.to_ascii_lowercase().as_str() {
        "upload" => Ok(ScriptCommand::Upload(path_arg(rest)?)),
        "thickness" => Ok(ScriptCommand::Thickness(number_arg(rest)?)),
        "size" => Ok(ScriptCommand::Size(number_arg(rest)?)),
        "rotate" | "rotation" => Ok(ScriptCommand::Rotate(number_arg(rest)?)),
        "overlay" => match rest.to_ascii_lowercase().as_str() {
            "" | "toggle" => Ok(ScriptCommand::ToggleOverlay),
            "on" => Ok(ScriptCommand::Overlay(true)),
            "off" => Ok(ScriptCommand::Overlay(false)),
            other => Err(format!("`overlay` expects on, off or toggle, got `{other}`")),
        },
        "reset" => no_arg(ScriptCommand::Reset),
        "download" => Ok(ScriptCommand::Download(if rest.is_empty() {
            None
        } else {
            Some(base_dir.join(rest))
        })),
        "preview" => Ok(ScriptCommand::Preview(path_arg(rest)?)),
        "state" => no_arg(ScriptCommand::State),
        other => Err(format!("unknown command `{other}`")),
    }
}

/// Apply parsed commands to `editor` in order, each running to completion before the next.
///
/// `download` without a path writes the default file name into `out_dir`.
pub fn run_script(
    editor: &mut Editor,
    lines: &[ScriptLine],
    prompt: &mut dyn Prompt,
    out_dir: &Path,
    stdout: &mut dyn Write,
) -> IconRingResult<ScriptReport> {
    let mut report = ScriptReport::default();
    for l in lines {
        let _span = tracing::debug_span!("script", line = l.line).entered();
        let at_line = |e: IconRingError| match e {
            IconRingError::Script { .. } => e,
            other => IconRingError::script(l.line, other.to_string()),
        };

        match &l.command {
            ScriptCommand::Upload(path) => editor.upload_path(path).map_err(at_line)?,
            ScriptCommand::Thickness(t) => editor.set_thickness(*t),
            ScriptCommand::Size(s) => editor.set_size(*s),
            ScriptCommand::Rotate(deg) => {
                editor.set_rotation(*deg).map_err(at_line)?;
            }
            ScriptCommand::ToggleOverlay => {
                editor.toggle_overlay().map_err(at_line)?;
            }
            ScriptCommand::Overlay(visible) => {
                editor.set_overlay(*visible).map_err(at_line)?;
            }
            ScriptCommand::Reset => {
                editor.reset(prompt);
            }
            ScriptCommand::Download(path) => {
                let path = path.clone().unwrap_or_else(|| out_dir.join(DEFAULT_FILE_NAME));
                match editor.download(prompt, &path).map_err(at_line)? {
                    Some(written) => report.written.push(written),
                    None => report.refused_downloads += 1,
                }
            }
            ScriptCommand::Preview(path) => {
                let frame = editor.render().map_err(at_line)?;
                write_png(&frame, path).map_err(at_line)?;
                report.written.push(path.clone());
            }
            ScriptCommand::State => {
                let json = serde_json::to_string(&editor.snapshot())
                    .context("serialize editor state")
                    .map_err(|e| at_line(e.into()))?;
                writeln!(stdout, "{json}")
                    .context("write editor state")
                    .map_err(|e| at_line(e.into()))?;
            }
        }
        report.executed += 1;
    }
    Ok(report)
}

#[cfg(test)]
#[path = "../tests/unit/script/script.rs"]
mod tests;
