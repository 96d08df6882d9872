//! Deployment status labels and their classification.
//!
//! The endpoint-status service reports a closed set of labels. Two states
//! are synthesized locally and never reported by the service: [`Inactive`]
//! (no endpoint exists, or the last query failed) and [`Unknown`] (the
//! service reported a label this crate does not recognize).
//!
//! [`Inactive`]: DeploymentStatus::Inactive
//! [`Unknown`]: DeploymentStatus::Unknown

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Deployment status of a model endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DeploymentStatus {
    /// Endpoint is being created.
    Creating,
    /// Endpoint configuration is being updated.
    Updating,
    /// The platform is applying a system-level update.
    SystemUpdating,
    /// A failed update is being rolled back.
    RollingBack,
    /// Endpoint is being deleted.
    Deleting,
    /// Endpoint is live and serving predictions.
    InService,
    /// Endpoint exists but is not serving.
    OutOfService,
    /// Endpoint creation or update failed.
    Failed,
    /// No endpoint exists, or the last status query failed.
    ///
    /// Synthesized locally; the service never reports this label.
    #[default]
    Inactive,
    /// The service reported a label this crate does not recognize.
    #[serde(other)]
    Unknown,
}

/// Severity class for presenting a status.
///
/// Every status maps to exactly one class. Unrecognized or absent status
/// maps to [`Neutral`], never to an error class.
///
/// [`Neutral`]: StatusSeverity::Neutral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusSeverity {
    /// An operation is underway and expected to settle.
    Pending,
    /// The endpoint is healthy.
    Positive,
    /// Something is wrong or being torn down.
    Negative,
    /// Nothing actionable to report.
    Neutral,
}

impl DeploymentStatus {
    /// All statuses the service can report, plus the synthesized ones.
    #[must_use]
    pub fn all() -> &'static [DeploymentStatus] {
        &[
            Self::Creating,
            Self::Updating,
            Self::SystemUpdating,
            Self::RollingBack,
            Self::Deleting,
            Self::InService,
            Self::OutOfService,
            Self::Failed,
            Self::Inactive,
            Self::Unknown,
        ]
    }

    /// Whether the backend is still processing a state change.
    ///
    /// A transient status means a watch session must keep polling; the
    /// transient set is `{Creating, Updating, SystemUpdating, RollingBack,
    /// Deleting}`.
    #[must_use]
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::Creating | Self::Updating | Self::SystemUpdating | Self::RollingBack | Self::Deleting
        )
    }

    /// Whether the backend has settled (or the watcher could not tell).
    ///
    /// Terminal is exactly the complement of transient: `InService`,
    /// `OutOfService`, `Failed`, `Inactive`, and `Unknown` all end a watch
    /// session.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        !self.is_transient()
    }

    /// Severity class for display purposes.
    #[must_use]
    pub fn severity(&self) -> StatusSeverity {
        match self {
            Self::Creating => StatusSeverity::Pending,
            Self::InService => StatusSeverity::Positive,
            Self::Updating | Self::Deleting | Self::OutOfService | Self::Failed => {
                StatusSeverity::Negative
            }
            Self::SystemUpdating | Self::RollingBack | Self::Inactive | Self::Unknown => {
                StatusSeverity::Neutral
            }
        }
    }

    /// The exact label string used on the wire.
    #[must_use]
    pub fn as_label(&self) -> &'static str {
        match self {
            Self::Creating => "Creating",
            Self::Updating => "Updating",
            Self::SystemUpdating => "SystemUpdating",
            Self::RollingBack => "RollingBack",
            Self::Deleting => "Deleting",
            Self::InService => "InService",
            Self::OutOfService => "OutOfService",
            Self::Failed => "Failed",
            Self::Inactive => "Inactive",
            Self::Unknown => "Unknown",
        }
    }

    /// Parse a service-reported label.
    ///
    /// Unlike [`FromStr`], this never fails: labels outside the closed set
    /// map to [`DeploymentStatus::Unknown`] so a new backend label degrades
    /// to a neutral display rather than an error.
    #[must_use]
    pub fn from_label(label: &str) -> Self {
        match label {
            "Creating" => Self::Creating,
            "Updating" => Self::Updating,
            "SystemUpdating" => Self::SystemUpdating,
            "RollingBack" => Self::RollingBack,
            "Deleting" => Self::Deleting,
            "InService" => Self::InService,
            "OutOfService" => Self::OutOfService,
            "Failed" => Self::Failed,
            "Inactive" => Self::Inactive,
            _ => Self::Unknown,
        }
    }
}

impl fmt::Display for DeploymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_label())
    }
}

impl FromStr for DeploymentStatus {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self::from_label(s))
    }
}

impl fmt::Display for StatusSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Pending => "pending",
            Self::Positive => "positive",
            Self::Negative => "negative",
            Self::Neutral => "neutral",
        };
        write!(f, "{s}")
    }
}
