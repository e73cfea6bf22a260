// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use futures::StreamExt;
use kube::runtime::watcher::Event;
use kube::{Client, ResourceExt};
use kube_runtime::watcher::Config as WatcherConfig;
use tracing::{debug, info, warn};

use rhoas_operator::config::Config;
use rhoas_operator::kubernetes::CrdProvisioner;
use rhoas_operator::types::ManagedKafkaConnection;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting RHOAS operator");

    let config = Config::from_env()?;
    info!(
        "Configuration loaded: watch_namespace={}, strict_crd_check={}",
        config.watch_namespace.as_deref().unwrap_or("<all>"),
        config.strict_crd_check
    );

    let client = Client::try_default().await?;
    info!("Connected to Kubernetes cluster");

    let mut provisioner = CrdProvisioner::<ManagedKafkaConnection>::new(client)
        .with_strict_check(config.strict_crd_check);
    provisioner
        .initialize()
        .await
        .context("Failed to install ManagedKafkaConnection CRD")?;

    let connections = match config.watch_namespace.as_deref() {
        Some(ns) => provisioner.namespaced_operations(ns)?,
        None => provisioner.operations()?,
    };

    info!("Watching ManagedKafkaConnections...");
    let mut events = Box::pin(connections.watch(WatcherConfig::default()));
    while let Some(event) = events.next().await {
        let event = match event {
            Ok(event) => event,
            Err(e) => {
                warn!("ManagedKafkaConnection watch error: {}", e);
                continue;
            }
        };
        match event {
            Event::Apply(mkc) | Event::InitApply(mkc) => info!(
                "ManagedKafkaConnection {}/{} applied (ready={}, bootstrap={})",
                mkc.namespace().unwrap_or_default(),
                mkc.name_any(),
                mkc.is_ready(),
                mkc.bootstrap_server().unwrap_or("<pending>")
            ),
            Event::Delete(mkc) => info!(
                "ManagedKafkaConnection {}/{} deleted",
                mkc.namespace().unwrap_or_default(),
                mkc.name_any()
            ),
            Event::Init => debug!("Watch (re)started"),
            Event::InitDone => debug!("Initial listing complete"),
        }
    }

    // The watcher stream only ends if the API connection is torn down
    warn!("ManagedKafkaConnection watch stopped unexpectedly");
    Ok(())
}
