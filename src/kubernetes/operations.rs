// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Typed operations on instances of a provisioned custom resource.

use crate::error::{RhoasError, Result};
use crate::kubernetes::context::CrdContext;
use crate::kubernetes::registry::KindRegistry;
use futures::{Stream, StreamExt};
use kube::{
    api::{DeleteParams, DynamicObject, ListParams, PostParams, TypeMeta},
    runtime::{watcher, watcher::Event, WatchStreamExt},
    Api, Client,
};
use serde::{de::DeserializeOwned, Serialize};
use std::fmt::Debug;
use std::marker::PhantomData;
use std::sync::Arc;
use tracing::instrument;

/// Handle for list/get/create/update/delete/watch on one custom resource kind.
///
/// Requests go to the endpoints described by the bound [`CrdContext`]; payloads
/// are decoded into `K` through the [`KindRegistry`].
pub struct ResourceOperations<K> {
    api: Api<DynamicObject>,
    context: CrdContext,
    namespace: Option<String>,
    registry: Arc<KindRegistry>,
    _kind: PhantomData<fn() -> K>,
}

impl<K> Clone for ResourceOperations<K> {
    fn clone(&self) -> Self {
        Self {
            api: self.api.clone(),
            context: self.context.clone(),
            namespace: self.namespace.clone(),
            registry: self.registry.clone(),
            _kind: PhantomData,
        }
    }
}

impl<K> ResourceOperations<K>
where
    K: Serialize + DeserializeOwned + Clone + Debug + Send + Sync + 'static,
{
    pub(crate) fn new(
        client: Client,
        namespace: Option<&str>,
        context: CrdContext,
        registry: Arc<KindRegistry>,
    ) -> Self {
        let ar = context.api_resource();
        let api = match namespace {
            Some(ns) => Api::namespaced_with(client, ns, &ar),
            None => Api::all_with(client, &ar),
        };

        Self {
            api,
            context,
            namespace: namespace.map(str::to_string),
            registry,
            _kind: PhantomData,
        }
    }

    pub fn context(&self) -> &CrdContext {
        &self.context
    }

    /// Namespace the handle is scoped to, `None` for all namespaces
    pub fn namespace(&self) -> Option<&str> {
        self.namespace.as_deref()
    }

    #[instrument(skip(self, lp), fields(kind = %self.context.kind))]
    pub async fn list(&self, lp: &ListParams) -> Result<Vec<K>> {
        let list = self.api.list(lp).await?;
        list.items
            .into_iter()
            .map(|obj| decode_object(&self.registry, &self.context, obj))
            .collect()
    }

    #[instrument(skip(self), fields(kind = %self.context.kind))]
    pub async fn get(&self, name: &str) -> Result<K> {
        let obj = self.api.get(name).await?;
        decode_object(&self.registry, &self.context, obj)
    }

    #[instrument(skip(self), fields(kind = %self.context.kind))]
    pub async fn get_opt(&self, name: &str) -> Result<Option<K>> {
        match self.api.get_opt(name).await? {
            Some(obj) => decode_object(&self.registry, &self.context, obj).map(Some),
            None => Ok(None),
        }
    }

    #[instrument(skip(self, pp, obj), fields(kind = %self.context.kind))]
    pub async fn create(&self, pp: &PostParams, obj: &K) -> Result<K> {
        let created = self.api.create(pp, &self.encode(obj)?).await?;
        decode_object(&self.registry, &self.context, created)
    }

    /// Replace (update) the named object
    #[instrument(skip(self, pp, obj), fields(kind = %self.context.kind))]
    pub async fn replace(&self, name: &str, pp: &PostParams, obj: &K) -> Result<K> {
        let replaced = self.api.replace(name, pp, &self.encode(obj)?).await?;
        decode_object(&self.registry, &self.context, replaced)
    }

    #[instrument(skip(self, dp), fields(kind = %self.context.kind))]
    pub async fn delete(&self, name: &str, dp: &DeleteParams) -> Result<()> {
        self.api.delete(name, dp).await?;
        Ok(())
    }

    /// Watch the bound resource, decoding every object in the event stream.
    ///
    /// Errors are yielded to the caller; the stream backs off before reconnecting.
    pub fn watch(&self, wc: watcher::Config) -> impl Stream<Item = Result<Event<K>>> + Send {
        let registry = self.registry.clone();
        let context = self.context.clone();

        watcher(self.api.clone(), wc)
            .default_backoff()
            .map(move |event| -> Result<Event<K>> {
                let decode = |obj: DynamicObject| decode_object::<K>(&registry, &context, obj);
                Ok(match event? {
                    Event::Apply(obj) => Event::Apply(decode(obj)?),
                    Event::Delete(obj) => Event::Delete(decode(obj)?),
                    Event::Init => Event::Init,
                    Event::InitApply(obj) => Event::InitApply(decode(obj)?),
                    Event::InitDone => Event::InitDone,
                })
            })
    }

    fn encode(&self, obj: &K) -> Result<DynamicObject> {
        let value = serde_json::to_value(obj).map_err(|source| RhoasError::DecodeError {
            kind: self.context.kind.clone(),
            source,
        })?;
        let mut dynamic: DynamicObject =
            serde_json::from_value(value).map_err(|source| RhoasError::DecodeError {
                kind: self.context.kind.clone(),
                source,
            })?;
        dynamic.types = Some(type_meta(&self.context));
        Ok(dynamic)
    }
}

fn type_meta(context: &CrdContext) -> TypeMeta {
    TypeMeta {
        api_version: context.api_version(),
        kind: context.kind.clone(),
    }
}

/// List items come back without apiVersion/kind; fill them in from the context.
fn decode_object<K: 'static>(
    registry: &KindRegistry,
    context: &CrdContext,
    mut obj: DynamicObject,
) -> Result<K> {
    if obj.types.is_none() {
        obj.types = Some(type_meta(context));
    }
    registry.decode(obj)
}
