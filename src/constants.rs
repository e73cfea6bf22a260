// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0

/// The operator name, used as field manager on writes
pub const OPERATOR_NAME: &str = "rhoas-operator";

/// Condition types reported on ManagedKafkaConnection status
pub mod conditions {
    pub const READY: &str = "Ready";
}
