use std::fs;
use std::path::Path;
use std::time::Duration;

use chrono::Utc;
use tracing::{debug, warn};

use crate::accounting::{ConsumedReport, DonatedReport, LocalReport};
use crate::config::Config;
use crate::diskspace;
use crate::node::{self, NodeState};
use crate::stats::{SharedStats, StatsSnapshot};

/// Total bytes under a directory tree. Missing or unreadable entries
/// count as zero; symlinks are not followed.
pub fn dir_size(path: &Path) -> u64 {
    let entries = match fs::read_dir(path) {
        Ok(e) => e,
        Err(_) => return 0,
    };
    let mut total = 0u64;
    for entry in entries.flatten() {
        if let Ok(meta) = entry.metadata() {
            if meta.is_dir() {
                total += dir_size(&entry.path());
            } else {
                total += meta.len();
            }
        }
    }
    total
}

/// (available, total) bytes of the disk holding `path`, picked by the
/// longest matching mount point. (0, 0) when no disk matches.
pub fn disk_space_for(path: &Path) -> (u64, u64) {
    let disks = sysinfo::Disks::new_with_refreshed_list();
    let mut best: Option<&sysinfo::Disk> = None;
    for disk in disks.list() {
        if !path.starts_with(disk.mount_point()) {
            continue;
        }
        let better = match best {
            Some(b) => disk.mount_point().as_os_str().len() > b.mount_point().as_os_str().len(),
            None => true,
        };
        if better {
            best = Some(disk);
        }
    }
    match best {
        Some(disk) => (disk.available_space(), disk.total_space()),
        None => (0, 0),
    }
}

// ---------------------------------------------------------------------------
// Measurements
// ---------------------------------------------------------------------------

/// Everything one refresh reads from the machine: node state, the sizes
/// of our directories, and the capacity of the disk holding the donated
/// space.
pub struct Measurements {
    pub node: NodeState,
    pub backups_bytes: u64,
    pub customers_bytes: u64,
    pub temp_bytes: u64,
    pub diskfree: u64,
    pub disktotal: u64,
}

impl Measurements {
    pub fn take(config: &Config) -> Self {
        let node = match node::load_from(&config.node.state_file) {
            Some(state) => state,
            None => {
                debug!("no node state at {}", config.node.state_file.display());
                NodeState::default()
            }
        };
        let (diskfree, disktotal) = disk_space_for(&config.storage.customers_dir);
        if disktotal == 0 {
            warn!("no disk found for {}", config.storage.customers_dir.display());
        }
        Self {
            node,
            backups_bytes: dir_size(&config.storage.backups_dir),
            customers_bytes: dir_size(&config.storage.customers_dir),
            temp_bytes: dir_size(&config.storage.temp_dir),
            diskfree,
            disktotal,
        }
    }
}

/// Fold one set of measurements into the snapshot the footer consumes.
pub fn assemble(config: &Config, m: &Measurements, timestamp: f64) -> StatsSnapshot {
    let suppliers = m.node.suppliers_total();
    let bytes_used_total = m.node.catalog.bytes_used;
    let bytes_used_supplier = if suppliers == 0 {
        0
    } else {
        bytes_used_total / suppliers
    };
    StatsSnapshot {
        bytes_donated: config.storage.donated_bytes,
        bytes_indexed: m.node.catalog.bytes_indexed,
        bytes_needed: config.storage.needed_bytes,
        bytes_used_supplier,
        bytes_used_total,
        customers: m.node.customers_total(),
        files_count: m.node.catalog.files,
        folders_count: m.node.catalog.folders,
        items_count: m.node.catalog.items,
        max_suppliers: config.storage.max_suppliers,
        online_suppliers: m.node.suppliers_online(),
        suppliers,
        timestamp,
        value_donated: diskspace::bytes_to_string(config.storage.donated_bytes),
        value_needed: diskspace::bytes_to_string(config.storage.needed_bytes),
        value_used_total: diskspace::bytes_to_string(bytes_used_total),
    }
}

/// The three accounting reports from one set of measurements.
pub fn reports(
    config: &Config,
    m: &Measurements,
) -> (ConsumedReport, DonatedReport, LocalReport) {
    (
        ConsumedReport::build(
            config.storage.needed_bytes,
            m.node.catalog.bytes_used,
            m.node.suppliers_total(),
        ),
        DonatedReport::build(config.storage.donated_bytes, &m.node.customers),
        LocalReport::build(
            m.backups_bytes,
            m.customers_bytes,
            m.temp_bytes,
            m.diskfree,
            m.disktotal,
        ),
    )
}

/// Unix seconds with fractional precision.
pub fn now_timestamp() -> f64 {
    Utc::now().timestamp_micros() as f64 / 1_000_000.0
}

pub fn start_collector(shared: SharedStats, config: Config, interval_secs: u64) {
    tokio::spawn(async move {
        let interval = Duration::from_secs(interval_secs.max(1));

        loop {
            let measurements = Measurements::take(&config);
            let snapshot = assemble(&config, &measurements, now_timestamp());

            debug!(
                suppliers = snapshot.suppliers,
                online = snapshot.online_suppliers,
                customers = snapshot.customers,
                used = %snapshot.value_used_total,
                "stats refreshed"
            );

            if !shared.publish(snapshot) {
                break;
            }

            tokio::time::sleep(interval).await;
        }
    });
}
