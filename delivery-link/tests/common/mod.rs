//! Shared test helpers for link resolution tests.

#![allow(dead_code)]

use delivery_types::{Resource, SharedResource, Sys};
use serde_json::json;
use std::rc::Rc;

/// Minimal entry resource.
#[derive(Debug)]
pub struct TestEntry {
    pub sys: Sys,
    pub name: String,
}

impl Resource for TestEntry {
    fn sys(&self) -> &Sys {
        &self.sys
    }
}

/// Minimal asset resource.
#[derive(Debug)]
pub struct TestAsset {
    pub sys: Sys,
}

impl Resource for TestAsset {
    fn sys(&self) -> &Sys {
        &self.sys
    }
}

pub fn sys(resource_type: &str, id: &str) -> Sys {
    Sys::from_resource(&json!({
        "sys": {
            "id": id,
            "type": resource_type,
            "createdAt": "2022-05-01T12:00:00Z",
            "updatedAt": "2022-05-01T12:00:00Z"
        }
    }))
    .expect("valid test sys")
}

pub fn entry(id: &str, name: &str) -> Rc<TestEntry> {
    Rc::new(TestEntry {
        sys: sys("Entry", id),
        name: name.to_string(),
    })
}

pub fn shared_entry(id: &str) -> SharedResource {
    entry(id, id)
}

pub fn shared_asset(id: &str) -> SharedResource {
    Rc::new(TestAsset {
        sys: sys("Asset", id),
    })
}

pub fn ids(resources: &[SharedResource]) -> Vec<String> {
    resources.iter().map(|r| r.id().to_string()).collect()
}

/// Routes `tracing` output through the test harness. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
