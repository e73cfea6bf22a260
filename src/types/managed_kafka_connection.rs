// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use crate::constants::conditions;
use crate::types::metadata::{HasTypeMetadata, ResourceTypeMetadata};
use kube::CustomResource;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(CustomResource, Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[kube(
    group = "cloud.openshift.com",
    version = "v1alpha1",
    kind = "ManagedKafkaConnection",
    shortname = "mkc"
)]
#[kube(namespaced)]
#[kube(status = "ManagedKafkaConnectionStatus")]
#[serde(rename_all = "camelCase")]
pub struct ManagedKafkaConnectionSpec {
    pub kafka_id: String,
    pub access_token_secret_name: String,
    pub credentials: Credentials,
}

impl HasTypeMetadata for ManagedKafkaConnection {
    fn type_metadata() -> ResourceTypeMetadata {
        ResourceTypeMetadata::of::<Self>()
    }
}

impl ManagedKafkaConnection {
    /// Check if this connection is ready based on its status conditions
    pub fn is_ready(&self) -> bool {
        self.status
            .as_ref()
            .and_then(|s| s.conditions.as_ref())
            .is_some_and(|conds| {
                conds
                    .iter()
                    .any(|c| c.condition_type == conditions::READY && c.status == "True")
            })
    }

    /// Bootstrap server host reported by the service, if any
    pub fn bootstrap_server(&self) -> Option<&str> {
        self.status
            .as_ref()
            .and_then(|s| s.bootstrap_server_host.as_deref())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub service_account_secret_name: String,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ManagedKafkaConnectionStatus {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bootstrap_server_host: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_account_secret_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub conditions: Option<Vec<Condition>>,
    /// Links into the cloud console, keyed by purpose
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadata: Option<BTreeMap<String, String>>,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, schemars::JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct Condition {
    #[serde(rename = "type")]
    pub condition_type: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}
