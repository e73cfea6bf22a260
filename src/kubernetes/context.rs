// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! API coordinates of a custom resource, derived from its CRD.

use crate::error::{RhoasError, Result};
use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinition;
use kube::core::GroupVersionKind;
use kube::discovery::ApiResource;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CrdContext {
    pub name: String,
    pub group: String,
    /// Version the client talks to
    pub version: String,
    pub kind: String,
    pub plural: String,
    pub scope: String,
}

impl CrdContext {
    /// Context for the CRD's storage version if served, otherwise its first served
    /// version.
    pub fn from_crd(crd: &CustomResourceDefinition) -> Result<Self> {
        Self::from_crd_preferring(crd, None)
    }

    /// Like [`CrdContext::from_crd`], but picks `preferred` whenever the CRD serves it.
    pub fn from_crd_preferring(
        crd: &CustomResourceDefinition,
        preferred: Option<&str>,
    ) -> Result<Self> {
        let Some(name) = crd.metadata.name.clone() else {
            return Err(RhoasError::InvalidCrd("without metadata.name".to_string()));
        };

        let versions = &crd.spec.versions;
        let version = versions
            .iter()
            .find(|v| v.served && Some(v.name.as_str()) == preferred)
            .or_else(|| versions.iter().find(|v| v.served && v.storage))
            .or_else(|| versions.iter().find(|v| v.served))
            .map(|v| v.name.clone())
            .ok_or_else(|| RhoasError::InvalidCrd(format!("{} serves no versions", name)))?;

        Ok(CrdContext {
            group: crd.spec.group.clone(),
            version,
            kind: crd.spec.names.kind.clone(),
            plural: crd.spec.names.plural.clone(),
            scope: crd.spec.scope.clone(),
            name,
        })
    }

    pub fn api_version(&self) -> String {
        format!("{}/{}", self.group, self.version)
    }

    pub fn is_namespaced(&self) -> bool {
        self.scope == "Namespaced"
    }

    pub fn api_resource(&self) -> ApiResource {
        let gvk = GroupVersionKind::gvk(&self.group, &self.version, &self.kind);
        ApiResource::from_gvk_with_plural(&gvk, &self.plural)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ManagedKafkaConnection;
    use k8s_openapi::apiextensions_apiserver::pkg::apis::apiextensions::v1::CustomResourceDefinitionVersion;
    use kube::CustomResourceExt;

    fn make_version(name: &str, served: bool, storage: bool) -> CustomResourceDefinitionVersion {
        CustomResourceDefinitionVersion {
            name: name.to_string(),
            served,
            storage,
            ..Default::default()
        }
    }

    #[test]
    fn test_from_generated_crd() {
        let context = CrdContext::from_crd(&ManagedKafkaConnection::crd()).unwrap();

        assert_eq!(context.name, "managedkafkaconnections.cloud.openshift.com");
        assert_eq!(context.api_version(), "cloud.openshift.com/v1alpha1");
        assert_eq!(context.kind, "ManagedKafkaConnection");
        assert_eq!(context.plural, "managedkafkaconnections");
        assert!(context.is_namespaced());
    }

    #[test]
    fn test_api_resource_uses_crd_plural() {
        let context = CrdContext::from_crd(&ManagedKafkaConnection::crd()).unwrap();
        let ar = context.api_resource();

        assert_eq!(ar.api_version, "cloud.openshift.com/v1alpha1");
        assert_eq!(ar.plural, "managedkafkaconnections");
        assert_eq!(ar.kind, "ManagedKafkaConnection");
    }

    #[test]
    fn test_prefers_storage_version() {
        let mut crd = ManagedKafkaConnection::crd();
        crd.spec.versions = vec![
            make_version("v1alpha1", true, false),
            make_version("v1beta1", true, true),
        ];

        let context = CrdContext::from_crd(&crd).unwrap();
        assert_eq!(context.version, "v1beta1");
    }

    #[test]
    fn test_falls_back_to_first_served_version() {
        let mut crd = ManagedKafkaConnection::crd();
        crd.spec.versions = vec![
            make_version("v1", false, true),
            make_version("v1alpha1", true, false),
        ];

        let context = CrdContext::from_crd(&crd).unwrap();
        assert_eq!(context.version, "v1alpha1");
    }

    #[test]
    fn test_preferred_version_wins_over_storage() {
        let mut crd = ManagedKafkaConnection::crd();
        crd.spec.versions = vec![
            make_version("v1alpha1", true, false),
            make_version("v1beta1", true, true),
        ];

        let context = CrdContext::from_crd_preferring(&crd, Some("v1alpha1")).unwrap();
        assert_eq!(context.version, "v1alpha1");
    }

    #[test]
    fn test_unserved_preferred_version_falls_back_to_storage() {
        let mut crd = ManagedKafkaConnection::crd();
        crd.spec.versions = vec![
            make_version("v1alpha1", false, false),
            make_version("v1beta1", true, true),
        ];

        let context = CrdContext::from_crd_preferring(&crd, Some("v1alpha1")).unwrap();
        assert_eq!(context.version, "v1beta1");
    }

    #[test]
    fn test_no_served_version_is_invalid() {
        let mut crd = ManagedKafkaConnection::crd();
        crd.spec.versions = vec![make_version("v1alpha1", false, true)];

        assert!(matches!(
            CrdContext::from_crd(&crd),
            Err(RhoasError::InvalidCrd(_))
        ));
    }

    #[test]
    fn test_missing_name_is_invalid() {
        let mut crd = ManagedKafkaConnection::crd();
        crd.metadata.name = None;

        assert!(matches!(
            CrdContext::from_crd(&crd),
            Err(RhoasError::InvalidCrd(_))
        ));
    }
}
