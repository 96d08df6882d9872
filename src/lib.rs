// Clippy configuration for vigil crate
// Allow format string style choices
#![allow(clippy::uninlined_format_args)]
// Allow missing docs for internal items
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
// Allow pass-by-value for small types
#![allow(clippy::needless_pass_by_value)]
// Doc backticks optional
#![allow(clippy::doc_markdown)]

//! Vigil: Deployment Status Watcher
//!
//! Vigil watches the deployment status of ML model endpoints served by a
//! remote platform API. It performs one status query up front, keeps a
//! bounded polling session alive while the backend reports a transient
//! status (creating, updating, deleting, ...), and stops with a stable
//! terminal classification once the backend settles.
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use vigil::prelude::*;
//!
//! # async fn example() -> vigil::Result<()> {
//! let api: Arc<dyn PlatformApi> =
//!     Arc::new(ApiClient::new("https://platform.example.com")?);
//!
//! let model = ModelDeploymentRef::new(ModelId::new(7), Some("fraud-v2".to_string()));
//! let watcher = DeploymentWatcher::new(api, model)
//!     .with_on_refresh(|| println!("deployment settled, refresh the model list"));
//!
//! // One query now; a polling session starts automatically if the
//! // backend is still in flux.
//! let status = watcher.check_initial_status().await;
//! println!("current status: {status} [{}]", status.severity());
//! # Ok(())
//! # }
//! ```
//!
//! # Architecture
//!
//! - **Status** - closed enumeration of service labels with an explicit
//!   transient/terminal classification and a severity class for display
//! - **Watcher** - one [`DeploymentWatcher`](watcher::DeploymentWatcher)
//!   per model card, never more than one live
//!   [`WatchSession`](watcher::WatchSession) at a time
//! - **API** - the platform is a black box behind the
//!   [`PlatformApi`](api::PlatformApi) trait; the bundled client speaks
//!   its REST contract
//!
//! Query failures are folded into the `Inactive` status and logged rather
//! than raised: the worst case for a watcher is a stale label, never a
//! crashed process.

pub mod api;
pub mod cli;
pub mod clipboard;
pub mod error;
pub mod model;
pub mod prelude;
pub mod status;
pub mod watcher;

pub use error::{Result, VigilError};
pub use status::DeploymentStatus;
pub use watcher::DeploymentWatcher;
