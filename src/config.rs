// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::{Context, Result};
use std::env;

/// Operator configuration loaded from environment variables
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Namespace to watch ManagedKafkaConnections in, all namespaces when unset
    pub watch_namespace: Option<String>,
    /// Fail startup when an existing CRD does not match the local resource type
    pub strict_crd_check: bool,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        let watch_namespace = env::var("WATCH_NAMESPACE")
            .ok()
            .filter(|ns| !ns.trim().is_empty());

        let strict_crd_check = match env::var("STRICT_CRD_CHECK") {
            Ok(v) => parse_bool(&v).context("STRICT_CRD_CHECK must be 'true' or 'false'")?,
            Err(_) => false,
        };

        Ok(Config {
            watch_namespace,
            strict_crd_check,
        })
    }
}

fn parse_bool(value: &str) -> Result<bool> {
    Ok(value.trim().to_ascii_lowercase().parse::<bool>()?)
}
