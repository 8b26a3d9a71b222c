//! Transaction timeline for one batch.

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::warn;

use super::{Ledger, Role};

const DISPLAY_FORMAT: &str = "%-d %B %Y, %I:%M %p UTC";

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TimelineEntry {
    pub id: String,
    pub role: Role,
    pub name: String,
    pub action: String,
    pub location: String,
    pub timestamp: DateTime<Utc>,
    pub display_time: String,
    /// Dashboard route, e.g. `/farmer/farmer-001`
    pub route: String,
    pub transaction_hash: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Timeline {
    pub batch_id: String,
    pub herb_name: String,
    pub entries: Vec<TimelineEntry>,
    pub summary: String,
}

impl Ledger {
    /// Ordered hand-offs for a batch, oldest first
    pub fn timeline(&self, batch_id: &str) -> Option<Timeline> {
        let trail = self.batch(batch_id)?;

        let mut entries: Vec<TimelineEntry> = trail
            .stages
            .iter()
            .filter_map(|stage| {
                let Some((name, proof)) = self.actor(stage.role, &stage.actor_id) else {
                    warn!(
                        "Batch {} references missing {} record {}",
                        trail.batch_id,
                        stage.role.slug(),
                        stage.actor_id
                    );
                    return None;
                };

                Some(TimelineEntry {
                    id: stage.actor_id.clone(),
                    role: stage.role,
                    name: name.to_string(),
                    action: stage.action.clone(),
                    location: stage.location.clone(),
                    timestamp: proof.timestamp,
                    display_time: proof.timestamp.format(DISPLAY_FORMAT).to_string(),
                    route: format!("/{}/{}", stage.role.slug(), stage.actor_id),
                    transaction_hash: proof.transaction_hash.clone(),
                })
            })
            .collect();

        entries.sort_by_key(|e| e.timestamp);

        Some(Timeline {
            batch_id: trail.batch_id.clone(),
            herb_name: trail.herb_name.clone(),
            summary: format!(
                "This herb has been verified through {} blockchain transactions, ensuring complete traceability from farm to your hands.",
                entries.len()
            ),
            entries,
        })
    }
}
