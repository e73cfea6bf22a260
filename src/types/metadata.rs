// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Static group/version metadata attached to resource types.

use crate::error::{RhoasError, Result};
use kube::Resource;
use std::borrow::Cow;

/// Group and version coordinates declared for a resource type.
///
/// Either both are set (custom resources) or neither is (core types without a
/// custom group). Setting exactly one is a configuration error that surfaces when
/// the apiVersion is derived.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResourceTypeMetadata {
    pub group: Option<Cow<'static, str>>,
    pub version: Option<Cow<'static, str>>,
}

impl ResourceTypeMetadata {
    pub const fn new(group: Option<&'static str>, version: Option<&'static str>) -> Self {
        let group = match group {
            Some(g) => Some(Cow::Borrowed(g)),
            None => None,
        };
        let version = match version {
            Some(v) => Some(Cow::Borrowed(v)),
            None => None,
        };
        Self { group, version }
    }

    /// Read group and version from the `#[kube(...)]` attributes of `K`.
    ///
    /// Empty values are treated as absent, so core types come back with a version
    /// but no group.
    pub fn of<K: Resource<DynamicType = ()>>() -> Self {
        fn non_empty(value: Cow<'_, str>) -> Option<Cow<'static, str>> {
            (!value.is_empty()).then(|| Cow::Owned(value.into_owned()))
        }
        Self {
            group: non_empty(K::group(&())),
            version: non_empty(K::version(&())),
        }
    }

    /// Compute the `group/version` apiVersion string.
    ///
    /// Returns `Ok(None)` when neither group nor version is declared.
    pub fn api_version(&self) -> Result<Option<String>> {
        match (&self.group, &self.version) {
            (Some(group), Some(version)) => Ok(Some(format!("{}/{}", group, version))),
            (None, None) => Ok(None),
            _ => Err(RhoasError::ConfigurationError(
                "both group and version must be specified together".to_string(),
            )),
        }
    }
}

/// Resource types carrying static group/version metadata.
pub trait HasTypeMetadata {
    fn type_metadata() -> ResourceTypeMetadata;
}

/// Derive the apiVersion of `K` from its static metadata.
pub fn derive_api_version<K: HasTypeMetadata>() -> Result<Option<String>> {
    K::type_metadata().api_version()
}
