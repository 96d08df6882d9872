//! Convenient re-exports for common usage.
//!
//! ```
//! use vigil::prelude::*;
//! ```

// Core types
pub use crate::error::{Result, VigilError};

// Status types
pub use crate::status::{DeploymentStatus, StatusSeverity};

// Model types
pub use crate::model::{ModelDeploymentRef, ModelId, ModelSummary};

// API types
pub use crate::api::{ApiAuth, ApiClient, PlatformApi};

// Watcher types
pub use crate::watcher::{
    DeploymentWatcher, RefreshFn, WatchSession, WatcherConfig, DEFAULT_POLL_INTERVAL,
};

// Clipboard types
pub use crate::clipboard::{Clipboard, CopyAcknowledgements, DEFAULT_COPIED_TTL};
#[cfg(feature = "clipboard")]
pub use crate::clipboard::SystemClipboard;
