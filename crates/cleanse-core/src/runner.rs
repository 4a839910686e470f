//! Sequential batch redaction

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::redactor::{Outcome, Redactor};
use crate::{Error, Result};

/// What a batch does when a target does not exist
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MissingPolicy {
    /// Report the missing file and move on to the next one
    #[default]
    Skip,
    /// Abort the remaining targets
    FailFast,
}

impl fmt::Display for MissingPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingPolicy::Skip => write!(f, "skip"),
            MissingPolicy::FailFast => write!(f, "fail-fast"),
        }
    }
}

/// Outcomes of a completed batch, in target order
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunReport {
    pub outcomes: Vec<Outcome>,
}

impl RunReport {
    pub fn cleansed(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, Outcome::Cleansed { .. } | Outcome::WouldCleanse { .. }))
            .count()
    }

    pub fn missing(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_not_found()).count()
    }
}

pub struct Runner {
    redactor: Redactor,
    policy: MissingPolicy,
}

impl Runner {
    pub fn new(redactor: Redactor, policy: MissingPolicy) -> Self {
        Self { redactor, policy }
    }

    pub fn policy(&self) -> MissingPolicy {
        self.policy
    }

    /// Redact every target in order, one at a time.
    ///
    /// `observe` sees each outcome as soon as it is known, so progress is
    /// visible even when a later target aborts the batch. I/O failures abort
    /// under either policy; files already processed stay redacted.
    pub async fn run<I, P, F>(&self, targets: I, mut observe: F) -> Result<RunReport>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
        F: FnMut(&Outcome),
    {
        let mut report = RunReport::default();

        for target in targets {
            let outcome = self.redactor.redact(target.as_ref()).await?;

            if outcome.is_not_found() {
                if self.policy == MissingPolicy::FailFast {
                    return Err(Error::NotFound(outcome.path().to_path_buf()));
                }
                debug!(path = %outcome.path().display(), "target not found, skipping");
            }

            observe(&outcome);
            report.outcomes.push(outcome);
        }

        info!(
            cleansed = report.cleansed(),
            missing = report.missing(),
            "batch complete"
        );

        Ok(report)
    }
}
