//! Deployment status watcher.
//!
//! A [`DeploymentWatcher`] owns the lifecycle of "is this model's endpoint
//! ready": one status query up front, a polling [`WatchSession`] while the
//! backend reports a transient status, and a terminal classification once
//! it settles. One watcher exists per model card; it never holds more than
//! one live session.

use crate::api::PlatformApi;
use crate::error::{Result, VigilError};
use crate::model::ModelDeploymentRef;
use crate::status::DeploymentStatus;
use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{interval_at, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// Default interval between status polls.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(5000);

/// Callback invoked when a watch session ends in a terminal status.
///
/// Signals that upstream state (typically the model list) should be
/// re-fetched, since deployment completion may have changed fields such as
/// `is_deployed`.
pub type RefreshFn = Arc<dyn Fn() + Send + Sync>;

/// Configuration for a [`DeploymentWatcher`].
#[derive(Debug, Clone)]
pub struct WatcherConfig {
    /// Interval between status polls.
    pub poll_interval: Duration,
}

impl WatcherConfig {
    /// Create a config with the given poll interval.
    #[must_use]
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self::new(DEFAULT_POLL_INTERVAL)
    }
}

/// A live polling session for one model's deployment status.
///
/// Holds the cancellation token and join handle of the polling task.
/// Cancellation is synchronous: once [`cancel`](Self::cancel) returns, the
/// session publishes no further status and fires no callback.
#[derive(Debug)]
pub struct WatchSession {
    token: CancellationToken,
    handle: tokio::task::JoinHandle<()>,
}

impl WatchSession {
    /// Cancel the session.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Whether the polling task has exited.
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }
}

impl Drop for WatchSession {
    fn drop(&mut self) {
        self.token.cancel();
    }
}

/// Watches the deployment status of one model endpoint.
pub struct DeploymentWatcher {
    api: Arc<dyn PlatformApi>,
    model_ref: ModelDeploymentRef,
    config: WatcherConfig,
    status_tx: watch::Sender<DeploymentStatus>,
    session: Mutex<Option<WatchSession>>,
    on_refresh: RefreshFn,
}

impl DeploymentWatcher {
    /// Create a watcher for one model.
    ///
    /// The initial published status is [`DeploymentStatus::Inactive`].
    #[must_use]
    pub fn new(api: Arc<dyn PlatformApi>, model_ref: ModelDeploymentRef) -> Self {
        let (status_tx, _) = watch::channel(DeploymentStatus::Inactive);
        Self {
            api,
            model_ref,
            config: WatcherConfig::default(),
            status_tx,
            session: Mutex::new(None),
            on_refresh: Arc::new(|| {}),
        }
    }

    /// Set the polling configuration.
    #[must_use]
    pub fn with_config(mut self, config: WatcherConfig) -> Self {
        self.config = config;
        self
    }

    /// Set the refresh callback fired when a session ends terminally.
    #[must_use]
    pub fn with_on_refresh(mut self, on_refresh: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_refresh = Arc::new(on_refresh);
        self
    }

    /// The deployment reference this watcher observes.
    #[must_use]
    pub fn model_ref(&self) -> &ModelDeploymentRef {
        &self.model_ref
    }

    /// The most recently published status.
    #[must_use]
    pub fn status(&self) -> DeploymentStatus {
        *self.status_tx.borrow()
    }

    /// Subscribe to status updates.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<DeploymentStatus> {
        self.status_tx.subscribe()
    }

    /// Whether a session is live right now.
    #[must_use]
    pub fn is_watching(&self) -> bool {
        self.session
            .lock()
            .as_ref()
            .is_some_and(|session| !session.is_finished())
    }

    /// Determine the current status, starting a watch session if the
    /// backend is still in flux.
    ///
    /// A model without an endpoint is `Inactive` by definition: no network
    /// call is made and no session starts. A failed query is logged and
    /// folded into `Inactive`, also without a session; failure here is not
    /// an error to the caller.
    pub async fn check_initial_status(&self) -> DeploymentStatus {
        let Some(endpoint) = self.model_ref.endpoint_name.clone() else {
            self.status_tx.send_replace(DeploymentStatus::Inactive);
            return DeploymentStatus::Inactive;
        };

        match self.api.endpoint_status(&endpoint).await {
            Ok(status) => {
                self.status_tx.send_replace(status);
                if status.is_transient() {
                    debug!(endpoint = %endpoint, status = %status, "endpoint in flux, starting watch");
                    self.start_watch();
                }
                status
            }
            Err(err) => {
                warn!(endpoint = %endpoint, error = %err, "initial status query failed");
                self.status_tx.send_replace(DeploymentStatus::Inactive);
                DeploymentStatus::Inactive
            }
        }
    }

    /// Start a polling session, cancelling any prior session first.
    ///
    /// Each tick issues exactly one query; ticks are strictly sequential,
    /// so a slow response delays the next tick rather than overlapping it.
    /// A transient result keeps the session alive; a terminal result or a
    /// failed query ends it and fires the refresh callback once.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start_watch(&self) {
        self.stop();

        let token = CancellationToken::new();
        let handle = tokio::spawn(poll_loop(
            Arc::clone(&self.api),
            self.model_ref.endpoint_name.clone(),
            self.config.poll_interval,
            self.status_tx.clone(),
            Arc::clone(&self.on_refresh),
            token.clone(),
        ));

        *self.session.lock() = Some(WatchSession { token, handle });
    }

    /// Cancel the live session, if any.
    ///
    /// After this returns, no poll result from the old session is applied
    /// and its refresh callback cannot fire.
    pub fn stop(&self) {
        if let Some(session) = self.session.lock().take() {
            session.cancel();
        }
    }

    /// Deploy or withdraw the model, then watch the resulting transition.
    ///
    /// Any live session is cancelled first so stale polling cannot race
    /// the fresh command. A new session starts regardless of whether the
    /// command call succeeded: the expected immediate post-command status
    /// is `Creating` or `Deleting`, both transient, so the first polls
    /// re-synchronize even if the command had not been processed yet. The
    /// command's own error, if any, is returned to the caller.
    pub async fn toggle_deployment(&self, is_currently_deployed: bool) -> Result<()> {
        self.stop();

        let result = if is_currently_deployed {
            self.api.withdraw(self.model_ref.model_id).await
        } else {
            self.api.deploy(self.model_ref.model_id).await
        };

        if let Err(err) = &result {
            warn!(model = %self.model_ref, error = %err, "deployment command failed");
        }

        self.start_watch();
        result
    }
}

impl Drop for DeploymentWatcher {
    fn drop(&mut self) {
        self.stop();
    }
}

impl std::fmt::Debug for DeploymentWatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DeploymentWatcher")
            .field("model_ref", &self.model_ref)
            .field("config", &self.config)
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

/// The polling task body for one watch session.
///
/// The first poll fires one interval after the session starts, matching
/// the cadence of the command/initial query that preceded it.
async fn poll_loop(
    api: Arc<dyn PlatformApi>,
    endpoint_name: Option<String>,
    poll_interval: Duration,
    status_tx: watch::Sender<DeploymentStatus>,
    on_refresh: RefreshFn,
    token: CancellationToken,
) {
    let mut ticker = interval_at(Instant::now() + poll_interval, poll_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        let outcome = tokio::select! {
            () = token.cancelled() => return,
            outcome = async {
                ticker.tick().await;
                match endpoint_name.as_deref() {
                    Some(name) => api.endpoint_status(name).await,
                    None => Err(VigilError::MissingEndpoint),
                }
            } => outcome,
        };

        // Cancellation may have raced the query resolution; a cancelled
        // session must not publish or fire the callback.
        if token.is_cancelled() {
            return;
        }

        match outcome {
            Ok(status) if status.is_transient() => {
                debug!(status = %status, "endpoint still in flux");
                status_tx.send_replace(status);
            }
            Ok(status) => {
                debug!(status = %status, "endpoint settled, ending watch");
                status_tx.send_replace(status);
                on_refresh();
                return;
            }
            Err(err) => {
                warn!(error = %err, "status query failed, ending watch");
                status_tx.send_replace(DeploymentStatus::Inactive);
                on_refresh();
                return;
            }
        }
    }
}
