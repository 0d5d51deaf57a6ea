use serde::{Deserialize, Serialize};

use crate::diskspace;

// ------------------------------------------------------------------
// Customer rows
// ------------------------------------------------------------------

/// Space a single customer was granted and how much of it they occupy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CustomerSpace {
    pub id: String,
    pub allocated: u64,
    pub used: u64,
}

// ------------------------------------------------------------------
// Consumed: our allowance spread across suppliers
// ------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ConsumedReport {
    pub suppliers_num: u64,
    pub needed: u64,
    pub needed_str: String,
    pub used: u64,
    pub used_str: String,
    pub used_percent: String,
    pub available: u64,
    pub available_str: String,
    pub needed_per_supplier: u64,
    pub needed_per_supplier_str: String,
    pub used_per_supplier: u64,
    pub used_per_supplier_str: String,
    pub available_per_supplier: u64,
    pub available_per_supplier_str: String,
}

impl ConsumedReport {
    pub fn build(needed: u64, used: u64, suppliers_num: u64) -> Self {
        let available = needed.saturating_sub(used);
        let needed_per_supplier = share(needed, suppliers_num);
        let used_per_supplier = share(used, suppliers_num);
        let available_per_supplier = share(available, suppliers_num);
        Self {
            suppliers_num,
            needed,
            needed_str: diskspace::bytes_to_string(needed),
            used,
            used_str: diskspace::bytes_to_string(used),
            used_percent: diskspace::percent_string(used, needed),
            available,
            available_str: diskspace::bytes_to_string(available),
            needed_per_supplier,
            needed_per_supplier_str: diskspace::bytes_to_string(needed_per_supplier),
            used_per_supplier,
            used_per_supplier_str: diskspace::bytes_to_string(used_per_supplier),
            available_per_supplier,
            available_per_supplier_str: diskspace::bytes_to_string(available_per_supplier),
        }
    }
}

fn share(total: u64, suppliers: u64) -> u64 {
    if suppliers == 0 {
        0
    } else {
        total / suppliers
    }
}

// ------------------------------------------------------------------
// Donated: the space we grant to customers
// ------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct DonatedReport {
    pub customers_num: u64,
    pub donated: u64,
    pub donated_str: String,
    /// Sum of all customer allocations.
    pub consumed: u64,
    pub consumed_str: String,
    pub consumed_percent: String,
    /// Sum of what customers actually occupy.
    pub used: u64,
    pub used_str: String,
    pub used_percent: String,
    pub free: u64,
    pub free_str: String,
    pub customers: Vec<CustomerSpace>,
}

impl DonatedReport {
    pub fn build(donated: u64, customers: &[CustomerSpace]) -> Self {
        let consumed: u64 = customers.iter().map(|c| c.allocated).sum();
        let used: u64 = customers.iter().map(|c| c.used).sum();
        let free = donated.saturating_sub(consumed);
        Self {
            customers_num: customers.len() as u64,
            donated,
            donated_str: diskspace::bytes_to_string(donated),
            consumed,
            consumed_str: diskspace::bytes_to_string(consumed),
            consumed_percent: diskspace::percent_string(consumed, donated),
            used,
            used_str: diskspace::bytes_to_string(used),
            used_percent: diskspace::percent_string(used, donated),
            free,
            free_str: diskspace::bytes_to_string(free),
            customers: customers.to_vec(),
        }
    }
}

// ------------------------------------------------------------------
// Local: what our own directories take on this machine
// ------------------------------------------------------------------

#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct LocalReport {
    pub backups: u64,
    pub backups_str: String,
    pub customers: u64,
    pub customers_str: String,
    pub temp: u64,
    pub temp_str: String,
    pub total: u64,
    pub total_str: String,
    pub total_percent: String,
    pub diskfree: u64,
    pub diskfree_str: String,
    pub diskfree_percent: String,
    pub disktotal: u64,
    pub disktotal_str: String,
}

impl LocalReport {
    pub fn build(backups: u64, customers: u64, temp: u64, diskfree: u64, disktotal: u64) -> Self {
        let total = backups + customers + temp;
        Self {
            backups,
            backups_str: diskspace::bytes_to_string(backups),
            customers,
            customers_str: diskspace::bytes_to_string(customers),
            temp,
            temp_str: diskspace::bytes_to_string(temp),
            total,
            total_str: diskspace::bytes_to_string(total),
            total_percent: diskspace::percent_string(total, disktotal),
            diskfree,
            diskfree_str: diskspace::bytes_to_string(diskfree),
            diskfree_percent: diskspace::percent_string(diskfree, disktotal),
            disktotal,
            disktotal_str: diskspace::bytes_to_string(disktotal),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_customers() -> Vec<CustomerSpace> {
        vec![
            CustomerSpace {
                id: "alice@node-a".to_string(),
                allocated: 2147483648,
                used: 1073741824,
            },
            CustomerSpace {
                id: "bob@node-b".to_string(),
                allocated: 1073741824,
                used: 0,
            },
        ]
    }

    // --- consumed ---

    #[test]
    fn test_consumed_report() {
        let report = ConsumedReport::build(104857600, 16276824, 4);
        assert_eq!(report.suppliers_num, 4);
        assert_eq!(report.needed_str, "100 MB");
        assert_eq!(report.used_str, "15.52 MB");
        assert_eq!(report.used_percent, "15.52%");
        assert_eq!(report.available, 88580776);
        assert_eq!(report.available_str, "84.48 MB");
        assert_eq!(report.needed_per_supplier, 26214400);
        assert_eq!(report.needed_per_supplier_str, "25 MB");
        assert_eq!(report.used_per_supplier, 4069206);
        assert_eq!(report.available_per_supplier, 22145194);
    }

    #[test]
    fn test_consumed_report_without_suppliers() {
        let report = ConsumedReport::build(104857600, 0, 0);
        assert_eq!(report.needed_per_supplier, 0);
        assert_eq!(report.used_per_supplier, 0);
        assert_eq!(report.available_per_supplier, 0);
        assert_eq!(report.used_percent, "0%");
    }

    #[test]
    fn test_consumed_report_overdrawn_clamps_available() {
        let report = ConsumedReport::build(100, 250, 2);
        assert_eq!(report.available, 0);
        assert_eq!(report.used_percent, "250%");
    }

    // --- donated ---

    #[test]
    fn test_donated_report() {
        let report = DonatedReport::build(8589934592, &make_customers());
        assert_eq!(report.customers_num, 2);
        assert_eq!(report.donated_str, "8 GB");
        assert_eq!(report.consumed, 3221225472);
        assert_eq!(report.consumed_str, "3 GB");
        assert_eq!(report.consumed_percent, "37.5%");
        assert_eq!(report.used, 1073741824);
        assert_eq!(report.used_str, "1024 MB");
        assert_eq!(report.used_percent, "12.5%");
        assert_eq!(report.free, 5368709120);
        assert_eq!(report.free_str, "5 GB");
        assert_eq!(report.customers, make_customers());
    }

    #[test]
    fn test_donated_report_without_customers() {
        let report = DonatedReport::build(8589934592, &[]);
        assert_eq!(report.customers_num, 0);
        assert_eq!(report.consumed, 0);
        assert_eq!(report.free, 8589934592);
        assert_eq!(report.consumed_percent, "0%");
        assert!(report.customers.is_empty());
    }

    #[test]
    fn test_donated_report_overcommitted_clamps_free() {
        let customers = vec![CustomerSpace {
            id: "alice@node-a".to_string(),
            allocated: 200,
            used: 10,
        }];
        let report = DonatedReport::build(100, &customers);
        assert_eq!(report.free, 0);
        assert_eq!(report.consumed_percent, "200%");
    }

    // --- local ---

    #[test]
    fn test_local_report() {
        let report = LocalReport::build(86955072, 16277514, 48981, 103865696256, 471890181120);
        assert_eq!(report.total, 103281567);
        assert_eq!(report.total_str, "98.5 MB");
        assert_eq!(report.total_percent, "0.02%");
        assert_eq!(report.backups_str, "82.93 MB");
        assert_eq!(report.customers_str, "15.52 MB");
        assert_eq!(report.temp_str, "47.83 KB");
        assert_eq!(report.diskfree_str, "96.73 GB");
        assert_eq!(report.diskfree_percent, "22.01%");
        assert_eq!(report.disktotal_str, "439.48 GB");
    }

    #[test]
    fn test_local_report_unknown_disk() {
        let report = LocalReport::build(10, 20, 30, 0, 0);
        assert_eq!(report.total, 60);
        assert_eq!(report.total_percent, "0%");
        assert_eq!(report.diskfree_percent, "0%");
    }

    #[test]
    fn test_reports_serialize_to_json() {
        let consumed =
            serde_json::to_value(ConsumedReport::build(104857600, 16276824, 4)).unwrap();
        assert_eq!(consumed["needed_str"], "100 MB");
        assert_eq!(consumed["used_percent"], "15.52%");

        let donated =
            serde_json::to_value(DonatedReport::build(8589934592, &make_customers())).unwrap();
        assert_eq!(donated["customers"][0]["id"], "alice@node-a");
        assert_eq!(donated["free_str"], "5 GB");

        let local = serde_json::to_value(LocalReport::build(
            86955072,
            16277514,
            48981,
            103865696256,
            471890181120,
        ))
        .unwrap();
        assert_eq!(local["diskfree_percent"], "22.01%");
        assert_eq!(local["total_str"], "98.5 MB");
    }
}
