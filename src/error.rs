// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use thiserror::Error;

#[derive(Error, Debug)]
pub enum RhoasError {
    /// Listing or creating the CRD failed, or a custom resource call failed.
    #[error("Kubernetes API error: {0}")]
    KubeError(#[from] kube::Error),

    #[error("Watch error: {0}")]
    WatchError(#[from] kube::runtime::watcher::Error),

    #[error("Invalid resource type metadata: {0}")]
    ConfigurationError(String),

    #[error("CRD provisioner has not been initialized")]
    NotInitialized,

    #[error("Invalid CRD {0}")]
    InvalidCrd(String),

    #[error("CRD does not match local resource type: {0}")]
    CrdMismatch(String),

    #[error("No decoder registered for {0}")]
    UnregisteredKind(String),

    #[error("Failed to decode {kind}: {source}")]
    DecodeError {
        kind: String,
        #[source]
        source: serde_json::Error,
    },
}

pub type Result<T> = std::result::Result<T, RhoasError>;
