//! Model identifiers and deployment references.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Unique identifier for a model on the platform.
///
/// The backend owns the id space; this crate treats the value as opaque
/// and only round-trips it through API calls and the clipboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(i64);

impl ModelId {
    /// Wrap a raw platform id.
    #[must_use]
    pub fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw id value.
    #[must_use]
    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for ModelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for ModelId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Ok(Self(s.parse()?))
    }
}

impl From<i64> for ModelId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Reference to a deployable unit: a model and, if it has ever been
/// deployed, the name of its endpoint.
///
/// An absent endpoint name means the model has never been deployed and is
/// defined to be `Inactive` without any query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelDeploymentRef {
    /// Platform id of the model.
    pub model_id: ModelId,
    /// Endpoint name, absent if the model has never been deployed.
    pub endpoint_name: Option<String>,
}

impl ModelDeploymentRef {
    /// Create a new deployment reference.
    ///
    /// An empty endpoint name is normalized to `None`; the platform sends
    /// `""` for models that have never been deployed.
    #[must_use]
    pub fn new(model_id: ModelId, endpoint_name: Option<String>) -> Self {
        Self {
            model_id,
            endpoint_name: endpoint_name.filter(|name| !name.is_empty()),
        }
    }

    /// Whether the model has an endpoint to query.
    #[must_use]
    pub fn has_endpoint(&self) -> bool {
        self.endpoint_name.is_some()
    }
}

impl std::fmt::Display for ModelDeploymentRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.endpoint_name {
            Some(endpoint) => write!(f, "model {} ({endpoint})", self.model_id),
            None => write!(f, "model {} (no endpoint)", self.model_id),
        }
    }
}

/// One model record as returned by the platform's model listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelSummary {
    /// Platform id.
    pub id: ModelId,
    /// Human-readable name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Whether the platform currently considers the model deployed.
    pub is_deployed: bool,
    /// Endpoint name, empty or absent if never deployed.
    #[serde(default)]
    pub endpoint_name: Option<String>,
}

impl ModelSummary {
    /// The deployment reference for this model.
    #[must_use]
    pub fn deployment_ref(&self) -> ModelDeploymentRef {
        ModelDeploymentRef::new(self.id, self.endpoint_name.clone())
    }
}
