// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

//! Custom resource types and their static API metadata.

pub mod managed_kafka_connection;
pub mod metadata;

pub use managed_kafka_connection::{ManagedKafkaConnection, ManagedKafkaConnectionSpec};
pub use metadata::{derive_api_version, HasTypeMetadata, ResourceTypeMetadata};
