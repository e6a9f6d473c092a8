//! Label-based export of a memory for diagnostics.
//!
//! Handles are replaced by labels so a snapshot reads on its own.

use crate::store::Memory;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InteractionRecord {
    pub label: String,
    pub valence: i32,
    pub weight: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meaning: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub post: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub experiment: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outcome: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternatives: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperimentRecord {
    pub label: String,
    pub is_abstract: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intended: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub enacted: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MemorySnapshot {
    pub interactions: Vec<InteractionRecord>,
    pub experiments: Vec<ExperimentRecord>,
    pub outcomes: Vec<String>,
}

impl MemorySnapshot {
    pub fn to_json_pretty(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn interaction(&self, label: &str) -> Option<&InteractionRecord> {
        self.interactions.iter().find(|r| r.label == label)
    }
}

impl Memory {
    pub fn snapshot(&self) -> MemorySnapshot {
        let name = |id| self.label(id).to_string();

        let interactions = self
            .interactions()
            .map(|i| InteractionRecord {
                label: i.label().to_string(),
                valence: i.valence(),
                weight: i.weight(),
                meaning: i.meaning().map(str::to_string),
                pre: i.pre().map(name),
                post: i.post().map(name),
                experiment: i.experiment().map(|e| self.experiment(e).label().to_string()),
                outcome: i.outcome().map(|o| self.outcome(o).label().to_string()),
                alternatives: i.alternatives().iter().copied().map(name).collect(),
            })
            .collect();

        let experiments = self
            .experiments()
            .map(|e| ExperimentRecord {
                label: e.label().to_string(),
                is_abstract: e.is_abstract(),
                intended: e.intended().map(name),
                enacted: e.enacted().iter().copied().map(name).collect(),
            })
            .collect();

        let outcomes = self.outcomes().map(|o| o.label().to_string()).collect();

        MemorySnapshot {
            interactions,
            experiments,
            outcomes,
        }
    }
}
