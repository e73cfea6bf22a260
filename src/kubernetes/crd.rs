// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Ensures a custom resource's CRD is installed and hands out typed clients for it.

use crate::constants::OPERATOR_NAME;
use crate::error::{RhoasError, Result};
use crate::kubernetes::context::CrdContext;
use crate::kubernetes::operations::ResourceOperations;
use crate::kubernetes::registry::KindRegistry;
use crate::types::metadata::{derive_api_version, HasTypeMetadata};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::{
    api::{ListParams, PostParams},
    Api, Client, CustomResourceExt, Resource,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// Installs the CRD for `K` once at startup and builds [`ResourceOperations`] for it.
///
/// Construction does no I/O. [`CrdProvisioner::initialize`] must succeed before any
/// operations handle can be obtained.
pub struct CrdProvisioner<K> {
    client: Client,
    registry: Arc<KindRegistry>,
    strict_check: bool,
    crd: Option<CustomResourceDefinition>,
    _kind: PhantomData<fn() -> K>,
}

impl<K> CrdProvisioner<K>
where
    K: CustomResourceExt
        + Resource<DynamicType = ()>
        + HasTypeMetadata
        + Serialize
        + DeserializeOwned
        + Clone
        + Debug
        + Send
        + Sync
        + 'static,
{
    pub fn new(client: Client) -> Self {
        Self {
            client,
            registry: Arc::new(KindRegistry::new()),
            strict_check: false,
            crd: None,
            _kind: PhantomData,
        }
    }

    /// Fail initialization when an existing CRD does not match `K`
    pub fn with_strict_check(mut self, strict: bool) -> Self {
        self.strict_check = strict;
        self
    }

    pub fn is_ready(&self) -> bool {
        self.crd.is_some()
    }

    /// The cached CRD, once initialized
    pub fn crd(&self) -> Option<&CustomResourceDefinition> {
        self.crd.as_ref()
    }

    pub fn registry(&self) -> &Arc<KindRegistry> {
        &self.registry
    }

    /// Find the CRD for `K` in the cluster, creating it if absent, and cache it.
    ///
    /// Errors from the API server are returned unchanged and leave the provisioner
    /// uninitialized.
    #[instrument(skip(self), fields(crd = %K::crd_name()))]
    pub async fn initialize(&mut self) -> Result<()> {
        if self.crd.is_some() {
            debug!("CRD already initialized");
            return Ok(());
        }

        info!("CRD provisioner init begun");
        let crd = self.find_or_create_crd().await?;
        self.crd = Some(crd);
        info!("CRD provisioner init ended");

        Ok(())
    }

    async fn find_or_create_crd(&self) -> Result<CustomResourceDefinition> {
        let crds: Api<CustomResourceDefinition> = Api::all(self.client.clone());
        let crd_name = K::crd_name();

        let existing = crds
            .list(&ListParams::default())
            .await?
            .items
            .into_iter()
            .find(|crd| crd.metadata.name.as_deref() == Some(crd_name));

        match existing {
            Some(crd) => {
                info!("Found {} CRD", K::kind(&()));
                self.check_compatibility(&crd)?;
                Ok(crd)
            }
            None => {
                info!("Creating {} CRD", K::kind(&()));
                let pp = PostParams {
                    field_manager: Some(OPERATOR_NAME.to_string()),
                    ..Default::default()
                };
                let created = crds.create(&pp, &K::crd()).await?;
                info!("{} CRD created", K::kind(&()));
                Ok(created)
            }
        }
    }

    /// Existing CRDs are matched by name only; report differences in group, kind
    /// or served versions.
    fn check_compatibility(&self, crd: &CustomResourceDefinition) -> Result<()> {
        let mismatches = crd_mismatches::<K>(crd);
        if mismatches.is_empty() {
            return Ok(());
        }

        let summary = format!("{}: {}", K::crd_name(), mismatches.join("; "));
        if self.strict_check {
            return Err(RhoasError::CrdMismatch(summary));
        }
        warn!("Reusing incompatible CRD {}", summary);
        Ok(())
    }

    /// Typed handle for `K` across all namespaces
    pub fn operations(&self) -> Result<ResourceOperations<K>> {
        self.build_operations(None)
    }

    /// Typed handle for `K` scoped to `namespace`
    pub fn namespaced_operations(&self, namespace: &str) -> Result<ResourceOperations<K>> {
        self.build_operations(Some(namespace))
    }

    fn build_operations(&self, namespace: Option<&str>) -> Result<ResourceOperations<K>> {
        let crd = self.crd.as_ref().ok_or(RhoasError::NotInitialized)?;

        if derive_api_version::<K>()?.is_none() {
            return Err(RhoasError::ConfigurationError(format!(
                "custom resource {} has no group and version",
                K::kind(&())
            )));
        }

        let meta = K::type_metadata();
        let context = CrdContext::from_crd_preferring(crd, meta.version.as_deref())?;
        if namespace.is_some() && !context.is_namespaced() {
            return Err(RhoasError::ConfigurationError(format!(
                "{} is cluster scoped and cannot be namespaced",
                context.name
            )));
        }

        // Objects come back stamped with the version the handle talks to
        self.registry
            .register::<K>(&context.api_version(), &context.kind);

        Ok(ResourceOperations::new(
            self.client.clone(),
            namespace,
            context,
            self.registry.clone(),
        ))
    }
}

fn crd_mismatches<K>(crd: &CustomResourceDefinition) -> Vec<String>
where
    K: Resource<DynamicType = ()> + HasTypeMetadata,
{
    let mut mismatches = Vec::new();
    let meta = K::type_metadata();

    if let Some(group) = meta.group {
        if crd.spec.group != group {
            mismatches.push(format!("group is {} instead of {}", crd.spec.group, group));
        }
    }

    let kind = K::kind(&());
    if crd.spec.names.kind != kind {
        mismatches.push(format!("kind is {} instead of {}", crd.spec.names.kind, kind));
    }

    if let Some(version) = meta.version {
        let served = crd
            .spec
            .versions
            .iter()
            .any(|v| v.served && v.name == version);
        if !served {
            mismatches.push(format!("version {} is not served", version));
        }
    }

    mismatches
}
