//! Station configuration.

use serde::{Deserialize, Serialize};

/// One travel direction served from a station.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Direction {
    /// Human-readable label, e.g. "for Tokyo"
    pub label: String,
    /// Upstream direction identifier, used in the page locator
    pub external_direction_id: String,
}

impl Direction {
    pub fn new(label: impl Into<String>, external_direction_id: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            external_direction_id: external_direction_id.into(),
        }
    }
}

/// Static configuration for one station.
///
/// `name`, `line_name` and `color` are only used to seed a store record the
/// first time the station is updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StationConfig {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub line_name: String,
    #[serde(default)]
    pub color: String,
    pub external_station_id: String,
    pub directions: Vec<Direction>,
}

impl StationConfig {
    /// Create a config with no presentation metadata.
    pub fn new(
        id: impl Into<String>,
        external_station_id: impl Into<String>,
        directions: Vec<Direction>,
    ) -> Self {
        let id = id.into();
        Self {
            name: id.clone(),
            id,
            line_name: String::new(),
            color: String::new(),
            external_station_id: external_station_id.into(),
            directions,
        }
    }

    /// Set display name, line name and color.
    pub fn with_display(
        mut self,
        name: impl Into<String>,
        line_name: impl Into<String>,
        color: impl Into<String>,
    ) -> Self {
        self.name = name.into();
        self.line_name = line_name.into();
        self.color = color.into();
        self
    }
}

/// The built-in station table.
pub fn default_stations() -> Vec<StationConfig> {
    vec![
        StationConfig::new(
            "kichijoji",
            "22449",
            vec![
                Direction::new("東京方面", "1"),
                Direction::new("高尾方面", "2"),
            ],
        )
        .with_display("吉祥寺", "JR中央線", "#f15a22"),
        StationConfig::new(
            "mitaka",
            "22672",
            vec![
                Direction::new("東京方面", "1"),
                Direction::new("高尾方面", "2"),
            ],
        )
        .with_display("三鷹", "JR中央線", "#f15a22"),
        StationConfig::new(
            "inokashira-koen",
            "22316",
            vec![
                Direction::new("渋谷方面", "1"),
                Direction::new("吉祥寺方面", "2"),
            ],
        )
        .with_display("井の頭公園", "京王井の頭線", "#8f76d6"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_config_json() {
        let json = r#"[{
            "id": "kichijoji",
            "externalStationId": "22449",
            "directions": [{"label": "東京方面", "externalDirectionId": "1"}]
        }]"#;
        let configs: Vec<StationConfig> = serde_json::from_str(json).unwrap();
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].external_station_id, "22449");
        assert_eq!(configs[0].directions[0].external_direction_id, "1");
        assert!(configs[0].name.is_empty());
    }

    #[test]
    fn default_table_is_well_formed() {
        let stations = default_stations();
        assert!(!stations.is_empty());
        for s in &stations {
            assert!(!s.external_station_id.is_empty());
            assert!(!s.directions.is_empty());
        }

        let mut ids: Vec<_> = stations.iter().map(|s| s.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), stations.len(), "station ids must be unique");
    }

    #[test]
    fn new_defaults_name_to_id() {
        let config = StationConfig::new("a", "1", vec![]);
        assert_eq!(config.name, "a");
    }
}
