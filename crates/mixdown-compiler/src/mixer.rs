//! Bus summation.

use mixdown_config::MasteringPreset;
use mixdown_core::{BusConfig, Filter, FilterGraph, Gain, Pad};

use crate::plan::BusMetadata;

/// A bus that received at least one chain.
#[derive(Debug, Clone, PartialEq)]
pub(crate) struct BusOutput {
    pub bus_id: String,
    pub pad: Pad,
    pub metadata: BusMetadata,
}

/// Pad label base for a bus: the id with anything outside `[A-Za-z0-9_]`
/// replaced, so arbitrary ids cannot break the bracket syntax.
pub(crate) fn bus_label(id: &str) -> String {
    let label: String = id
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();
    if label.is_empty() {
        "bus".to_string()
    } else {
        label
    }
}

/// Sum each bus's chains and apply its gain.
///
/// `assigned[i]` holds the chain outputs routed to `buses[i]`. Buses with
/// no chains produce nothing.
pub(crate) fn mix_buses(
    graph: &mut FilterGraph,
    buses: &[BusConfig],
    assigned: Vec<Vec<Pad>>,
    preset: &MasteringPreset,
) -> Vec<BusOutput> {
    let mut outputs = Vec::new();
    for (bus, chains) in buses.iter().zip(assigned) {
        if chains.is_empty() {
            tracing::debug!(bus = %bus.id, "bus has no content, dropped");
            continue;
        }

        let label = bus_label(&bus.id);
        let count = chains.len();
        let mut pad = graph.emit(chains, Filter::Mix { inputs: count }, &label);
        if bus.gain_db != 0.0 {
            pad = graph.emit(
                vec![pad],
                Filter::Volume(Gain::Db(bus.gain_db)),
                &format!("{label}_gain"),
            );
        }
        tracing::debug!(bus = %bus.id, chains = count, output = %pad, "mixed bus");

        let mut roles: Vec<String> = bus.roles.iter().cloned().collect();
        roles.sort();
        outputs.push(BusOutput {
            bus_id: bus.id.clone(),
            pad,
            metadata: BusMetadata::new(bus.id.clone(), roles, bus.gain_db, preset),
        });
    }
    outputs
}
