//! Deployment activation overrides
//!
//! Textual format `name:startTime:endTime[:startHeight:endHeight]`, accepted
//! only while a network profile is still being assembled. Malformed input is
//! a startup error naming the offending field, never a silent default.

use crate::consensus::params::{ConsensusParams, DeploymentId};
use thiserror::Error;

/// Rejected override string
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OverrideError {
    #[error("deployment override malformed, expecting deployment:start:end[:heightstart:heightend] (got \"{0}\")")]
    Malformed(String),
    #[error("unknown deployment \"{0}\"")]
    UnknownDeployment(String),
    #[error("invalid start time \"{0}\"")]
    InvalidStartTime(String),
    #[error("invalid timeout \"{0}\"")]
    InvalidTimeout(String),
    #[error("invalid start height \"{0}\"")]
    InvalidStartHeight(String),
    #[error("invalid timeout height \"{0}\"")]
    InvalidTimeoutHeight(String),
}

/// A parsed re-wiring of one deployment's activation thresholds
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeploymentOverride {
    pub id: DeploymentId,
    pub start_time: i64,
    pub timeout: i64,
    pub start_height: Option<i64>,
    pub timeout_height: Option<i64>,
}

impl DeploymentOverride {
    /// Parse an override string
    pub fn parse(s: &str) -> Result<Self, OverrideError> {
        let fields: Vec<&str> = s.split(':').collect();
        if fields.len() < 3 || fields.len() > 5 {
            return Err(OverrideError::Malformed(s.to_string()));
        }

        let id = DeploymentId::from_name(fields[0])
            .ok_or_else(|| OverrideError::UnknownDeployment(fields[0].to_string()))?;

        let start_time: i64 = fields[1]
            .parse()
            .map_err(|_| OverrideError::InvalidStartTime(fields[1].to_string()))?;
        let timeout: i64 = fields[2]
            .parse()
            .map_err(|_| OverrideError::InvalidTimeout(fields[2].to_string()))?;

        let start_height = match fields.get(3) {
            Some(f) => Some(
                f.parse()
                    .map_err(|_| OverrideError::InvalidStartHeight(f.to_string()))?,
            ),
            None => None,
        };
        let timeout_height = match fields.get(4) {
            Some(f) => Some(
                f.parse()
                    .map_err(|_| OverrideError::InvalidTimeoutHeight(f.to_string()))?,
            ),
            None => None,
        };

        Ok(Self {
            id,
            start_time,
            timeout,
            start_height,
            timeout_height,
        })
    }

    /// Re-wire the named deployment on a still-mutable rule variant
    pub(crate) fn apply(&self, params: &mut ConsensusParams) {
        let slot = params.deployment_mut(self.id);
        slot.start_time = self.start_time;
        slot.timeout = self.timeout;
        if let Some(h) = self.start_height {
            slot.start_height = h;
        }
        if let Some(h) = self.timeout_height {
            slot.timeout_height = h;
        }
        log::info!(
            "deployment {} re-wired: start={}, timeout={}, start_height={:?}, timeout_height={:?}",
            self.id.name(),
            self.start_time,
            self.timeout,
            self.start_height,
            self.timeout_height,
        );
    }
}
