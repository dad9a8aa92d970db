//! Bus routing configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// A named bus: the role tags it accepts and its static gain.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BusConfig {
    /// Bus identifier, also the key of its output tap.
    pub id: String,
    /// Display name.
    #[serde(default)]
    pub name: String,
    /// Role tags routed to this bus.
    #[serde(default)]
    pub roles: BTreeSet<String>,
    /// Bus gain in decibels.
    #[serde(default)]
    pub gain_db: f64,
    /// Effects preset id. Not consumed by the compiler.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fx_preset: Option<String>,
}

impl BusConfig {
    /// Create a bus with no roles and unity gain.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            roles: BTreeSet::new(),
            gain_db: 0.0,
            fx_preset: None,
        }
    }

    /// Accept an additional role tag.
    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.roles.insert(role.into());
        self
    }

    /// Accept several role tags.
    pub fn with_roles<I, S>(mut self, roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.roles.extend(roles.into_iter().map(Into::into));
        self
    }

    /// Set the bus gain.
    pub fn with_gain(mut self, gain_db: f64) -> Self {
        self.gain_db = gain_db;
        self
    }
}

/// Ordered buses plus the master gain.
///
/// Bus order matters: routing tests buses in declared order and the first
/// bus is the fallback for unmatched roles.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MixGraph {
    /// Buses in declared order.
    #[serde(default)]
    pub buses: Vec<BusConfig>,
    /// Master gain in decibels.
    #[serde(default)]
    pub master_gain_db: f64,
}

impl MixGraph {
    /// Create an empty graph at unity master gain.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a bus.
    pub fn with_bus(mut self, bus: BusConfig) -> Self {
        self.buses.push(bus);
        self
    }

    /// Set the master gain.
    pub fn with_master_gain(mut self, gain_db: f64) -> Self {
        self.master_gain_db = gain_db;
        self
    }

    /// Look up a bus by id.
    pub fn bus(&self, id: &str) -> Option<&BusConfig> {
        self.buses.iter().find(|b| b.id == id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_keeps_declared_order() {
        let graph = MixGraph::new()
            .with_bus(BusConfig::new("bus_drums", "Drums").with_role("drums"))
            .with_bus(BusConfig::new("bus_keys", "Keys").with_roles(["keys", "piano"]))
            .with_master_gain(-1.5);
        let ids: Vec<&str> = graph.buses.iter().map(|b| b.id.as_str()).collect();
        assert_eq!(ids, ["bus_drums", "bus_keys"]);
        assert_eq!(graph.bus("bus_keys").map(|b| b.roles.len()), Some(2));
        assert_eq!(graph.master_gain_db, -1.5);
    }

    #[test]
    fn deserializes_from_json() {
        let graph: MixGraph = serde_json::from_str(
            r#"{"buses": [{"id": "fx", "roles": ["sfx"], "gain_db": -3}], "master_gain_db": 0.5}"#,
        )
        .unwrap();
        assert_eq!(graph.buses[0].gain_db, -3.0);
        assert!(graph.buses[0].roles.contains("sfx"));
    }
}
