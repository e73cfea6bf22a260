// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! CRD provisioning, kind registration and typed custom resource clients.

pub mod context;
pub mod crd;
pub mod operations;
pub mod registry;

pub use context::CrdContext;
pub use crd::CrdProvisioner;
pub use operations::ResourceOperations;
pub use registry::KindRegistry;
