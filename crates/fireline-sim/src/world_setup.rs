//! Scene setup: turns a `ScenarioConfig` into hecs entities and hazard sites.

use hecs::{Entity, World};

use fireline_core::components::Extinguisher;
use fireline_core::config::{ExtinguisherConfig, ScenarioConfig};
use fireline_core::error::SimError;
use fireline_core::types::ExtinguisherId;
use fireline_hazard::FireInstance;

use crate::coordinator::FireCoordinator;

/// Clear the world, spawn the layout's extinguishers, and build a
/// coordinator holding one dormant site per configured fire.
pub fn setup_scene(world: &mut World, config: &ScenarioConfig) -> Result<FireCoordinator, SimError> {
    config.validate()?;
    world.clear();

    for ext in &config.extinguishers {
        spawn_extinguisher(world, ext);
    }

    let mut coordinator = FireCoordinator::new(0.0);
    for site in &config.fires {
        coordinator.register(FireInstance::new(site.id, site.position, site.config))?;
    }
    Ok(coordinator)
}

/// Spawn one extinguisher with its valve closed.
pub fn spawn_extinguisher(world: &mut World, config: &ExtinguisherConfig) -> Entity {
    world.spawn((config.id, config.position, Extinguisher::default()))
}

/// Look up the entity carrying a given extinguisher id.
pub fn find_extinguisher(world: &World, id: ExtinguisherId) -> Option<Entity> {
    world
        .query::<&ExtinguisherId>()
        .iter()
        .find(|(_, ext_id)| **ext_id == id)
        .map(|(entity, _)| entity)
}
