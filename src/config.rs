use into_static_str::IntoStaticStr;
use log::LevelFilter;
use serde::{Deserialize, Serialize};

/// Order of native removals when several entries go at once.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, IntoStaticStr)]
#[serde(rename_all = "camelCase")]
pub enum RemovalOrder {
    /// Bubble-phase entries first, then capture-phase entries, each in
    /// insertion order.
    #[default]
    PhaseGrouped,
    Insertion,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegistryOptions {
    pub removal_order: RemovalOrder,
    /// Maximum level forwarded to the browser console.
    pub log_level: LevelFilter,
}

impl Default for RegistryOptions {
    fn default() -> Self {
        Self {
            removal_order: RemovalOrder::default(),
            log_level: LevelFilter::Warn,
        }
    }
}

impl RegistryOptions {
    pub fn removal_order(mut self, order: RemovalOrder) -> Self {
        self.removal_order = order;
        self
    }
}
