//! Alarm system: on while at least one site burns.

use tracing::info;

use fireline_core::events::FireEvent;

use crate::coordinator::FireCoordinator;

/// Compare the burning count against the latched alarm and emit on edges.
pub fn run(coordinator: &FireCoordinator, alarm_active: &mut bool, events: &mut Vec<FireEvent>) {
    let active = coordinator.burning_count() > 0;
    if active != *alarm_active {
        *alarm_active = active;
        info!("Alarm {}", if active { "sounding" } else { "silenced" });
        events.push(FireEvent::AlarmChanged { active });
    }
}
