//! CLI command handlers.
//!
//! This module contains the business logic for CLI commands, separated
//! from argument parsing for testability.

use crate::api::PlatformApi;
use crate::error::{Result, VigilError};
use crate::model::{ModelId, ModelSummary};
use crate::status::DeploymentStatus;
use crate::watcher::{DeploymentWatcher, WatcherConfig};
use std::fmt::Write;
use std::sync::Arc;
use tokio::sync::watch;

/// Look up one model in the platform listing.
pub async fn find_model(api: &dyn PlatformApi, model_id: ModelId) -> Result<ModelSummary> {
    let models = api.list_models().await?;
    models
        .into_iter()
        .find(|m| m.id == model_id)
        .ok_or_else(|| VigilError::ModelNotFound(model_id.to_string()))
}

/// Watch a model until its deployment status settles.
///
/// Reports the initial status and every subsequent transition through
/// `on_transition`, and returns the terminal status.
pub async fn watch_model(
    api: Arc<dyn PlatformApi>,
    model_id: ModelId,
    config: WatcherConfig,
    mut on_transition: impl FnMut(DeploymentStatus),
) -> Result<DeploymentStatus> {
    let summary = find_model(api.as_ref(), model_id).await?;
    let watcher = DeploymentWatcher::new(api, summary.deployment_ref()).with_config(config);

    let initial = watcher.check_initial_status().await;
    on_transition(initial);
    if initial.is_terminal() {
        return Ok(initial);
    }

    let mut updates = watcher.subscribe();
    Ok(wait_for_settled(&watcher, &mut updates, &mut on_transition).await)
}

/// Deploy a model and watch the resulting transition.
pub async fn deploy_model(
    api: Arc<dyn PlatformApi>,
    model_id: ModelId,
    config: WatcherConfig,
    mut on_transition: impl FnMut(DeploymentStatus),
) -> Result<DeploymentStatus> {
    let summary = find_model(api.as_ref(), model_id).await?;
    let watcher = DeploymentWatcher::new(api, summary.deployment_ref()).with_config(config);
    let mut updates = watcher.subscribe();

    watcher.toggle_deployment(false).await?;
    Ok(wait_for_settled(&watcher, &mut updates, &mut on_transition).await)
}

/// Withdraw a model and watch the resulting transition.
pub async fn withdraw_model(
    api: Arc<dyn PlatformApi>,
    model_id: ModelId,
    config: WatcherConfig,
    mut on_transition: impl FnMut(DeploymentStatus),
) -> Result<DeploymentStatus> {
    let summary = find_model(api.as_ref(), model_id).await?;
    let watcher = DeploymentWatcher::new(api, summary.deployment_ref()).with_config(config);
    let mut updates = watcher.subscribe();

    watcher.toggle_deployment(true).await?;
    Ok(wait_for_settled(&watcher, &mut updates, &mut on_transition).await)
}

/// Drain status updates until the watcher publishes a terminal one.
async fn wait_for_settled(
    watcher: &DeploymentWatcher,
    updates: &mut watch::Receiver<DeploymentStatus>,
    on_transition: &mut impl FnMut(DeploymentStatus),
) -> DeploymentStatus {
    loop {
        if updates.changed().await.is_err() {
            return watcher.status();
        }
        let status = *updates.borrow_and_update();
        on_transition(status);
        if status.is_terminal() {
            return status;
        }
    }
}

/// Format a status line for display.
#[must_use]
pub fn format_status_line(endpoint_name: &str, status: DeploymentStatus) -> String {
    format!("{endpoint_name}: {status} [{}]", status.severity())
}

/// Format the model listing for display.
#[must_use]
pub fn format_model_list(models: &[ModelSummary]) -> String {
    let mut out = String::new();
    if models.is_empty() {
        out.push_str("(no models)\n");
        return out;
    }

    let _ = writeln!(out, "{:>6}  {:<24} {:<10} {:<28} Created", "ID", "Name", "Deployed", "Endpoint");
    for model in models {
        let endpoint = model.endpoint_name.as_deref().filter(|e| !e.is_empty());
        let _ = writeln!(
            out,
            "{:>6}  {:<24} {:<10} {:<28} {}",
            model.id,
            model.name,
            if model.is_deployed { "yes" } else { "no" },
            endpoint.unwrap_or("-"),
            model.created_at.format("%Y-%m-%d")
        );
    }
    out
}
