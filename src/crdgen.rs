// Copyright 2026, Jeroen van Erp <jeroen@geeko.me>
// SPDX-License-Identifier: Apache-2.0
use anyhow::Result;
use kube::CustomResourceExt;

use rhoas_operator::types::ManagedKafkaConnection;

fn main() -> Result<()> {
    let crd = serde_yaml::to_string(&ManagedKafkaConnection::crd())?;
    println!("---\n{crd}");
    Ok(())
}
