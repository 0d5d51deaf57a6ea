use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::accounting::CustomerSpace;

/// One supplier the node holds a contract with.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SupplierEntry {
    pub id: String,
    pub online: bool,
}

/// Totals of the node's backup catalog.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogSummary {
    pub files: u64,
    pub folders: u64,
    pub items: u64,
    pub bytes_used: u64,
    pub bytes_indexed: u64,
}

/// Peer and catalog state the node daemon writes out after each sync.
/// Every field is optional in the file; absent sections read as empty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NodeState {
    pub suppliers: Vec<SupplierEntry>,
    pub customers: Vec<CustomerSpace>,
    pub catalog: CatalogSummary,
}

impl NodeState {
    pub fn suppliers_total(&self) -> u64 {
        self.suppliers.len() as u64
    }

    pub fn suppliers_online(&self) -> u64 {
        self.suppliers.iter().filter(|s| s.online).count() as u64
    }

    pub fn customers_total(&self) -> u64 {
        self.customers.len() as u64
    }
}

/// Read the state file. None when it is missing or unparsable, which
/// callers treat the same as a node that has not synced yet.
pub fn load_from(path: &Path) -> Option<NodeState> {
    let json = fs::read_to_string(path).ok()?;
    serde_json::from_str(&json).ok()
}
