//! Supply-Chain Ledger
//!
//! In-memory store of the static actor records and batch trails that back
//! every dashboard. Nothing here is ever mutated after startup.

pub mod map;
pub mod records;
pub mod seed;
pub mod timeline;

pub use map::{farm_map, lookup_location, MapView};
pub use records::*;
pub use seed::DEMO_BATCH_ID;
pub use timeline::{Timeline, TimelineEntry};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ledger {
    #[serde(default)]
    pub farmers: BTreeMap<String, FarmerRecord>,
    #[serde(default)]
    pub collectors: BTreeMap<String, CollectorRecord>,
    #[serde(default)]
    pub distributors: BTreeMap<String, DistributorRecord>,
    #[serde(default)]
    pub manufacturers: BTreeMap<String, ManufacturerRecord>,
    #[serde(default)]
    pub batches: BTreeMap<String, BatchTrail>,
}

impl Ledger {
    /// Built-in demo records
    pub fn seeded() -> Self {
        seed::demo_ledger()
    }

    /// Load a JSON snapshot shaped like the serialized `Ledger`.
    pub async fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read ledger snapshot {}", path.display()))?;
        let ledger: Ledger = serde_json::from_str(&raw)
            .with_context(|| format!("Malformed ledger snapshot {}", path.display()))?;

        info!(
            "Loaded ledger snapshot from {}: {} batches, {} actors",
            path.display(),
            ledger.batches.len(),
            ledger.actor_count()
        );
        Ok(ledger)
    }

    pub fn farmer(&self, id: &str) -> Option<&FarmerRecord> {
        self.farmers.get(id)
    }

    pub fn collector(&self, id: &str) -> Option<&CollectorRecord> {
        self.collectors.get(id)
    }

    pub fn distributor(&self, id: &str) -> Option<&DistributorRecord> {
        self.distributors.get(id)
    }

    pub fn manufacturer(&self, id: &str) -> Option<&ManufacturerRecord> {
        self.manufacturers.get(id)
    }

    pub fn batch(&self, id: &str) -> Option<&BatchTrail> {
        self.batches.get(id)
    }

    /// All batch trails in id order
    pub fn batches(&self) -> impl Iterator<Item = &BatchTrail> {
        self.batches.values()
    }

    pub fn actor_count(&self) -> usize {
        self.farmers.len()
            + self.collectors.len()
            + self.distributors.len()
            + self.manufacturers.len()
    }

    /// Display name and proof of an actor, regardless of role
    pub(crate) fn actor(&self, role: Role, id: &str) -> Option<(&str, &BlockchainProof)> {
        match role {
            Role::Farmer => self
                .farmer(id)
                .map(|r| (r.profile.name.as_str(), &r.blockchain)),
            Role::Collector => self
                .collector(id)
                .map(|r| (r.profile.name.as_str(), &r.blockchain)),
            Role::Distributor => self
                .distributor(id)
                .map(|r| (r.profile.name.as_str(), &r.blockchain)),
            Role::Manufacturer => self
                .manufacturer(id)
                .map(|r| (r.profile.name.as_str(), &r.blockchain)),
        }
    }
}

/// Simulated herb prediction shown on the farmer dashboard
pub fn predict(farmer: &FarmerRecord) -> String {
    format!("{} Detected ✅", farmer.crop.name)
}
