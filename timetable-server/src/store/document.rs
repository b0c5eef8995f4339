//! Store document schema.

use serde::{Deserialize, Serialize};

use crate::domain::{StationConfig, StationTimetables};

/// The whole persisted store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreDocument {
    #[serde(default)]
    pub stations: Vec<StationRecord>,
}

impl StoreDocument {
    /// A document with an empty record for each configured station.
    pub fn seeded(stations: &[StationConfig]) -> Self {
        Self {
            stations: stations.iter().map(StationRecord::from_config).collect(),
        }
    }

    pub fn station(&self, id: &str) -> Option<&StationRecord> {
        self.stations.iter().find(|s| s.id == id)
    }

    /// The record for `config`, appended from its metadata if missing.
    pub fn station_mut_or_insert(&mut self, config: &StationConfig) -> &mut StationRecord {
        let index = match self.stations.iter().position(|s| s.id == config.id) {
            Some(index) => index,
            None => {
                self.stations.push(StationRecord::from_config(config));
                self.stations.len() - 1
            }
        };
        &mut self.stations[index]
    }
}

/// One station as published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationRecord {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub line_name: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub timetables: StationTimetables,
}

impl StationRecord {
    /// An empty record carrying the config's display metadata.
    pub fn from_config(config: &StationConfig) -> Self {
        Self {
            id: config.id.clone(),
            name: config.name.clone(),
            line_name: config.line_name.clone(),
            color: config.color.clone(),
            timetables: StationTimetables::default(),
        }
    }
}
