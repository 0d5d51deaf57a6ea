use crate::config::FooterConfig;
use crate::stats::StatsProvider;

/// Renders the one-line status summary from the latest snapshot.
///
/// Every query is read-only and answers from whatever the provider holds
/// right now; until a snapshot exists each section falls back to its
/// "?" placeholder.
pub struct Footer<P: StatsProvider> {
    provider: P,
    config: FooterConfig,
}

impl<P: StatsProvider> Footer<P> {
    pub fn new(provider: P, config: FooterConfig) -> Self {
        Self { provider, config }
    }

    /// Whether the node has produced a real reading yet. A zero timestamp
    /// counts as uninitialized.
    pub fn initialized(&self) -> bool {
        match self.provider.stats() {
            Some(snapshot) => snapshot.timestamp != 0.0,
            None => false,
        }
    }

    /// "consumed: 10 of 100", or "consumed: ?" before the first reading.
    pub fn used_space_info(&self) -> String {
        match self.provider.stats() {
            Some(snapshot) => format!(
                "consumed: {} of {}",
                snapshot.value_used_total, snapshot.value_needed
            ),
            None => "consumed: ?".to_string(),
        }
    }

    /// "suppliers: 3 of 5, 2 online", or "suppliers: ?".
    pub fn suppliers_info(&self) -> String {
        match self.provider.stats() {
            Some(snapshot) => format!(
                "suppliers: {} of {}, {} online",
                snapshot.suppliers, snapshot.max_suppliers, snapshot.online_suppliers
            ),
            None => "suppliers: ?".to_string(),
        }
    }

    /// "donated: 7", or "donated: ?".
    pub fn donated_space_info(&self) -> String {
        match self.provider.stats() {
            Some(snapshot) => format!("donated: {}", snapshot.value_donated),
            None => "donated: ?".to_string(),
        }
    }

    /// "customers: 4", or "customers: ?".
    pub fn customers_info(&self) -> String {
        match self.provider.stats() {
            Some(snapshot) => format!("customers: {}", snapshot.customers),
            None => "customers: ?".to_string(),
        }
    }

    /// The enabled sections, in fixed order.
    pub fn parts(&self) -> Vec<String> {
        let mut parts = Vec::new();
        if self.config.show_consumed {
            parts.push(self.used_space_info());
        }
        if self.config.show_suppliers {
            parts.push(self.suppliers_info());
        }
        if self.config.show_donated {
            parts.push(self.donated_space_info());
        }
        if self.config.show_customers {
            parts.push(self.customers_info());
        }
        parts
    }

    pub fn line(&self) -> String {
        self.parts().join(" │ ")
    }
}
