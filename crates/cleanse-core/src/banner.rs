//! Replacement notice written over redacted files

use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Marker used for every line past the banner
pub const DEFAULT_PLACEHOLDER: &str = "/**/";

const DEFAULT_LINES: [&str; 8] = [
    "/****************************************************",
    " * This file's contents have been stripped from the *",
    " * public mirror due to its sensitive nature. In    *",
    " * this repository files are considered sensitive   *",
    " * if they contain logic related to detection and   *",
    " * handling of scammers, spammers, and bots.        *",
    " ***************************************************/",
    "",
];

/// Ordered lines of the notice. Built once and shared by reference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Banner {
    lines: Vec<String>,
}

impl Banner {
    /// Create a banner from explicit lines. At least one line is required.
    pub fn new(lines: Vec<String>) -> Result<Self> {
        if lines.is_empty() {
            return Err(Error::InvalidBanner(
                "banner must have at least one line".to_string(),
            ));
        }
        if let Some(line) = lines.iter().find(|l| l.contains('\n')) {
            return Err(Error::InvalidBanner(format!(
                "banner line contains a newline: {:?}",
                line
            )));
        }
        Ok(Self { lines })
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl Default for Banner {
    fn default() -> Self {
        Self {
            lines: DEFAULT_LINES.iter().map(|l| l.to_string()).collect(),
        }
    }
}

impl TryFrom<Vec<String>> for Banner {
    type Error = Error;

    fn try_from(lines: Vec<String>) -> Result<Self> {
        Self::new(lines)
    }
}

impl From<Banner> for Vec<String> {
    fn from(banner: Banner) -> Self {
        banner.lines
    }
}
