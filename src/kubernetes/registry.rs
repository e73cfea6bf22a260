// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Mapping from `(apiVersion, kind)` to a typed decoder for custom resources.

use crate::error::{RhoasError, Result};
use kube::api::DynamicObject;
use serde::de::{DeserializeOwned, Error as _};
use std::any::{type_name, Any};
use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};
use tracing::debug;

type Decoder = fn(serde_json::Value) -> serde_json::Result<Box<dyn Any + Send>>;

fn decode_as<K>(value: serde_json::Value) -> serde_json::Result<Box<dyn Any + Send>>
where
    K: DeserializeOwned + Send + 'static,
{
    Ok(Box::new(serde_json::from_value::<K>(value)?))
}

/// Registry of decoders for custom kinds.
///
/// Registration is idempotent; registering the same key twice keeps a single entry
/// and the latest type wins.
#[derive(Default)]
pub struct KindRegistry {
    decoders: RwLock<HashMap<(String, String), Decoder>>,
}

impl KindRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register `K` as the decoded representation of `apiVersion` + `kind`.
    pub fn register<K>(&self, api_version: &str, kind: &str)
    where
        K: DeserializeOwned + Send + 'static,
    {
        let mut decoders = self.decoders.write().unwrap_or_else(PoisonError::into_inner);
        let key = (api_version.to_string(), kind.to_string());
        if decoders.insert(key, decode_as::<K>).is_none() {
            debug!("Registered {} for {}/{}", type_name::<K>(), api_version, kind);
        }
    }

    pub fn is_registered(&self, api_version: &str, kind: &str) -> bool {
        self.decoders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains_key(&(api_version.to_string(), kind.to_string()))
    }

    pub fn len(&self) -> usize {
        self.decoders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Decode a raw object into `K` using the decoder registered for its type.
    pub fn decode<K: 'static>(&self, obj: DynamicObject) -> Result<K> {
        let Some(types) = obj.types.as_ref() else {
            return Err(RhoasError::UnregisteredKind(
                "object without apiVersion/kind".to_string(),
            ));
        };
        let gvk = format!("{}/{}", types.api_version, types.kind);
        let kind = types.kind.clone();

        let decoder = self
            .decoders
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&(types.api_version.clone(), types.kind.clone()))
            .copied()
            .ok_or_else(|| RhoasError::UnregisteredKind(gvk))?;

        let value = serde_json::to_value(&obj).map_err(|source| RhoasError::DecodeError {
            kind: kind.clone(),
            source,
        })?;
        let decoded = decoder(value).map_err(|source| RhoasError::DecodeError {
            kind: kind.clone(),
            source,
        })?;

        decoded
            .downcast::<K>()
            .map(|k| *k)
            .map_err(|_| RhoasError::DecodeError {
                source: serde_json::Error::custom(format!(
                    "{} is registered for a type other than {}",
                    kind,
                    type_name::<K>()
                )),
                kind,
            })
    }
}
