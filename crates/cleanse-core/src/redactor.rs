//! Line-preserving file redaction

use std::fmt;
use std::io::{self, ErrorKind};
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::debug;

use crate::banner::{Banner, DEFAULT_PLACEHOLDER};
use crate::{Error, Result};

/// What happened to a single target
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    Cleansed {
        path: PathBuf,
        lines_before: usize,
        lines_after: usize,
    },
    WouldCleanse {
        path: PathBuf,
        lines_before: usize,
        lines_after: usize,
    },
    NotFound {
        path: PathBuf,
    },
}

impl Outcome {
    pub fn path(&self) -> &Path {
        match self {
            Outcome::Cleansed { path, .. }
            | Outcome::WouldCleanse { path, .. }
            | Outcome::NotFound { path } => path,
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Outcome::NotFound { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Cleansed { path, .. } => write!(f, "cleansed {}", path.display()),
            Outcome::WouldCleanse { path, .. } => write!(f, "would cleanse {}", path.display()),
            Outcome::NotFound { path } => write!(f, "Couldn't find {}", path.display()),
        }
    }
}

/// Count lines with universal newlines: `\r\n`, a lone `\r` and `\n` each
/// end one line, and a trailing unterminated run counts as one more.
pub fn count_lines(content: &str) -> usize {
    let mut count = 0;
    let mut bytes = content.as_bytes().iter().peekable();

    while let Some(&b) = bytes.next() {
        match b {
            b'\n' => count += 1,
            b'\r' => {
                count += 1;
                let _ = bytes.next_if_eq(&&b'\n');
            }
            _ => {}
        }
    }

    match content.as_bytes().last() {
        None | Some(b'\n') | Some(b'\r') => count,
        Some(_) => count + 1,
    }
}

/// Overwrites files with a banner padded to the original line count
#[derive(Debug, Clone)]
pub struct Redactor {
    banner: Banner,
    placeholder: String,
    dry_run: bool,
}

impl Redactor {
    pub fn new(banner: Banner) -> Self {
        Self {
            banner,
            placeholder: DEFAULT_PLACEHOLDER.to_string(),
            dry_run: false,
        }
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    /// Compute outcomes without touching the files
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn banner(&self) -> &Banner {
        &self.banner
    }

    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Replacement lines for a file of `line_count` lines.
    ///
    /// The banner covers the front and the placeholder pads the rest. A file
    /// shorter than the banner comes back as the whole banner.
    pub fn overlay(&self, line_count: usize) -> Vec<&str> {
        let mut lines: Vec<&str> = self.banner.lines().iter().map(String::as_str).collect();
        if line_count > lines.len() {
            let padding = line_count - lines.len();
            lines.extend(std::iter::repeat_n(self.placeholder.as_str(), padding));
        }
        lines
    }

    /// Replacement text, newline-joined with a single trailing newline
    pub fn render(&self, line_count: usize) -> String {
        let mut text = self.overlay(line_count).join("\n");
        text.push('\n');
        text
    }

    /// Redact one file in place.
    ///
    /// A missing file yields `Outcome::NotFound` and nothing is written;
    /// whether that stops a batch is up to the caller.
    pub async fn redact(&self, path: impl AsRef<Path>) -> Result<Outcome> {
        let path = path.as_ref();

        let content = match tokio::fs::read(path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Ok(Outcome::NotFound {
                    path: path.to_path_buf(),
                });
            }
            Err(e) => return Err(Error::io(path, e)),
        };

        let text = std::str::from_utf8(&content)
            .map_err(|e| Error::io(path, io::Error::new(ErrorKind::InvalidData, e)))?;
        let lines_before = count_lines(text);
        drop(content);

        let replacement = self.render(lines_before);
        let lines_after = lines_before.max(self.banner.len());

        debug!(
            path = %path.display(),
            lines_before,
            lines_after,
            dry_run = self.dry_run,
            "redacting file"
        );

        if self.dry_run {
            return Ok(Outcome::WouldCleanse {
                path: path.to_path_buf(),
                lines_before,
                lines_after,
            });
        }

        tokio::fs::write(path, replacement)
            .await
            .map_err(|e| Error::io(path, e))?;

        Ok(Outcome::Cleansed {
            path: path.to_path_buf(),
            lines_before,
            lines_after,
        })
    }
}

impl Default for Redactor {
    fn default() -> Self {
        Self::new(Banner::default())
    }
}
