//! Scripted trainee: carries one extinguisher to the nearest burning fire
//! and sprays until nothing burns.

use fireline_core::commands::DrillCommand;
use fireline_core::state::{DrillSnapshot, ExtinguisherView, FireView};
use fireline_core::types::{ExtinguisherId, Position};

/// Walking pace while carrying an extinguisher (m/s).
pub const DEFAULT_WALK_SPEED: f64 = 3.0;

/// Distance from a fire at which the trainee stops and opens the valve (m).
pub const DEFAULT_NOZZLE_REACH: f64 = 2.0;

#[derive(Debug, Clone)]
pub struct Trainee {
    pub extinguisher_id: ExtinguisherId,
    pub walk_speed: f64,
    pub nozzle_reach: f64,
}

impl Trainee {
    pub fn new(extinguisher_id: ExtinguisherId) -> Self {
        Self {
            extinguisher_id,
            walk_speed: DEFAULT_WALK_SPEED,
            nozzle_reach: DEFAULT_NOZZLE_REACH,
        }
    }

    /// Commands for the next tick, given the latest snapshot and the time
    /// that will pass before the trainee acts again.
    pub fn act(&self, snapshot: &DrillSnapshot, dt: f64) -> Vec<DrillCommand> {
        let Some(ext) = snapshot
            .extinguishers
            .iter()
            .find(|e| e.extinguisher_id == self.extinguisher_id)
        else {
            return Vec::new();
        };

        let Some(target) = nearest_burning(&snapshot.fires, &ext.position) else {
            return self.set_valve(ext, false);
        };

        let distance = ext.position.range_to(&target.position);
        if distance <= self.nozzle_reach {
            return self.set_valve(ext, true);
        }

        let mut commands = self.set_valve(ext, false);
        commands.push(DrillCommand::MoveExtinguisher {
            extinguisher_id: self.extinguisher_id,
            position: step_toward(
                &ext.position,
                &target.position,
                self.walk_speed * dt.max(0.0),
                self.nozzle_reach / 2.0,
            ),
        });
        commands
    }

    fn set_valve(&self, ext: &ExtinguisherView, open: bool) -> Vec<DrillCommand> {
        if ext.discharging == open {
            Vec::new()
        } else {
            vec![DrillCommand::SetDischarge {
                extinguisher_id: self.extinguisher_id,
                discharging: open,
            }]
        }
    }
}

fn nearest_burning<'a>(fires: &'a [FireView], from: &Position) -> Option<&'a FireView> {
    fires
        .iter()
        .filter(|f| f.state.is_burning())
        .min_by(|a, b| {
            from.range_to(&a.position)
                .total_cmp(&from.range_to(&b.position))
        })
}

/// Move up to `max_step` toward `to`, stopping `stand_off` short of it.
fn step_toward(from: &Position, to: &Position, max_step: f64, stand_off: f64) -> Position {
    let (start, end) = (from.to_vec3(), to.to_vec3());
    let distance = start.distance(end);
    let travel = (distance - stand_off).clamp(0.0, max_step);
    if distance <= f64::EPSILON || travel <= 0.0 {
        return *from;
    }
    Position::from_vec3(start.lerp(end, travel / distance))
}
