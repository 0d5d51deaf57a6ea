use std::path::PathBuf;

use serde::Deserialize;
use tracing::warn;

use crate::diskspace;

pub const DEFAULT_NEEDED_BYTES: u64 = 100 * 1024 * 1024;
pub const DEFAULT_DONATED_BYTES: u64 = 8 * 1024 * 1024 * 1024;

fn data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("statline")
}

// ---------------------------------------------------------------------------
// StorageConfig
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct StorageConfig {
    /// Space we ask suppliers to keep for us.
    pub needed_bytes: u64,
    /// Space we offer to customers.
    pub donated_bytes: u64,
    pub max_suppliers: u64,
    pub backups_dir: PathBuf,
    pub customers_dir: PathBuf,
    pub temp_dir: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        let data = data_dir();
        Self {
            needed_bytes: DEFAULT_NEEDED_BYTES,
            donated_bytes: DEFAULT_DONATED_BYTES,
            max_suppliers: 4,
            backups_dir: data.join("backups"),
            customers_dir: data.join("customers"),
            temp_dir: data.join("temp"),
        }
    }
}

// ---------------------------------------------------------------------------
// FooterConfig
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct FooterConfig {
    pub show_consumed: bool,
    pub show_suppliers: bool,
    pub show_donated: bool,
    pub show_customers: bool,
    pub update_interval_secs: u64,
}

impl Default for FooterConfig {
    fn default() -> Self {
        Self {
            show_consumed: true,
            show_suppliers: true,
            show_donated: true,
            show_customers: true,
            update_interval_secs: 3,
        }
    }
}

// ---------------------------------------------------------------------------
// NodeConfig
// ---------------------------------------------------------------------------

#[derive(Clone, Debug)]
pub struct NodeConfig {
    /// Where the node daemon drops its peer state after each sync.
    pub state_file: PathBuf,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            state_file: data_dir().join("node.json"),
        }
    }
}

// ---------------------------------------------------------------------------
// Config (top-level)
// ---------------------------------------------------------------------------

#[derive(Clone, Debug, Default)]
pub struct Config {
    pub storage: StorageConfig,
    pub footer: FooterConfig,
    pub node: NodeConfig,
}

impl Config {
    pub fn load() -> Self {
        let path = dirs::config_dir()
            .map(|d| d.join("statline").join("config.toml"))
            .unwrap_or_default();

        let content = match std::fs::read_to_string(&path) {
            Ok(c) => c,
            Err(_) => return Self::default(),
        };

        let raw: RawConfig = match toml::from_str(&content) {
            Ok(r) => r,
            Err(e) => {
                warn!("invalid config at {}: {}", path.display(), e);
                return Self::default();
            }
        };

        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Self {
        let mut config = Self::default();

        // Storage
        if let Some(s) = raw.storage {
            if let Some(v) = s.needed {
                match diskspace::bytes_from_string(&v) {
                    Some(bytes) => config.storage.needed_bytes = bytes,
                    None => warn!("unreadable storage.needed {:?}, keeping default", v),
                }
            }
            if let Some(v) = s.donated {
                match diskspace::bytes_from_string(&v) {
                    Some(bytes) => config.storage.donated_bytes = bytes,
                    None => warn!("unreadable storage.donated {:?}, keeping default", v),
                }
            }
            if let Some(v) = s.max_suppliers {
                config.storage.max_suppliers = v;
            }
            if let Some(v) = s.backups_dir {
                config.storage.backups_dir = v;
            }
            if let Some(v) = s.customers_dir {
                config.storage.customers_dir = v;
            }
            if let Some(v) = s.temp_dir {
                config.storage.temp_dir = v;
            }
        }

        // Footer
        if let Some(f) = raw.footer {
            if let Some(v) = f.show_consumed {
                config.footer.show_consumed = v;
            }
            if let Some(v) = f.show_suppliers {
                config.footer.show_suppliers = v;
            }
            if let Some(v) = f.show_donated {
                config.footer.show_donated = v;
            }
            if let Some(v) = f.show_customers {
                config.footer.show_customers = v;
            }
            if let Some(v) = f.update_interval_secs {
                config.footer.update_interval_secs = v;
            }
        }

        // Node
        if let Some(n) = raw.node {
            if let Some(v) = n.state_file {
                config.node.state_file = v;
            }
        }

        config
    }
}

// ---------------------------------------------------------------------------
// Raw TOML structs (all-optional for merge)
// ---------------------------------------------------------------------------

#[derive(Deserialize, Default)]
struct RawConfig {
    storage: Option<RawStorage>,
    footer: Option<RawFooter>,
    node: Option<RawNode>,
}

#[derive(Deserialize, Default)]
struct RawStorage {
    needed: Option<String>,
    donated: Option<String>,
    max_suppliers: Option<u64>,
    backups_dir: Option<PathBuf>,
    customers_dir: Option<PathBuf>,
    temp_dir: Option<PathBuf>,
}

#[derive(Deserialize, Default)]
struct RawFooter {
    show_consumed: Option<bool>,
    show_suppliers: Option<bool>,
    show_donated: Option<bool>,
    show_customers: Option<bool>,
    update_interval_secs: Option<u64>,
}

#[derive(Deserialize, Default)]
struct RawNode {
    state_file: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
