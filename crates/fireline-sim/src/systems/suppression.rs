//! Suppression system: discharging extinguishers within a burning site's
//! effective radius report agent contact at the current time.

use hecs::World;
use tracing::trace;

use fireline_core::components::Extinguisher;
use fireline_core::events::FireEvent;
use fireline_core::types::{FireId, Position};

use crate::coordinator::FireCoordinator;

/// Run before site updates so contact made this tick counts this tick.
pub fn run(world: &World, coordinator: &mut FireCoordinator, now: f64, events: &mut Vec<FireEvent>) {
    let nozzles: Vec<Position> = world
        .query::<(&Position, &Extinguisher)>()
        .iter()
        .filter(|(_, (_, ext))| ext.discharging)
        .map(|(_, (pos, _))| *pos)
        .collect();
    if nozzles.is_empty() {
        return;
    }

    let in_reach: Vec<FireId> = coordinator
        .fires()
        .filter(|fire| fire.is_burning())
        .filter(|fire| {
            let radius = fire.config().effective_radius;
            nozzles
                .iter()
                .any(|nozzle| nozzle.range_to(&fire.position()) <= radius)
        })
        .map(|fire| fire.id())
        .collect();

    for id in in_reach {
        if let Ok(true) = coordinator.report_suppression_contact(id, now, events) {
            trace!("{} in extinguisher reach at {:.2}s", id, now);
        }
    }
}
