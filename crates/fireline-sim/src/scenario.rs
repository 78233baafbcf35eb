//! Scenario library: prebuilt training layouts.
//!
//! Positions are meters from the room's extinguisher station (x = East,
//! y = North, z = Up).

use fireline_core::config::{
    AutoIgnition, ExtinguisherConfig, FireConfig, FireSiteConfig, ScenarioConfig,
};
use fireline_core::enums::ScenarioId;
use fireline_core::types::{ExtinguisherId, FireId, Position};

/// Build the layout for a prebuilt scenario.
pub fn build_scenario(scenario: ScenarioId) -> ScenarioConfig {
    match scenario {
        ScenarioId::ElectricalPanel => build_electrical_panel(),
        ScenarioId::Workshop => build_workshop(),
        ScenarioId::Warehouse => build_warehouse(),
    }
}

/// "Electrical Panel": one sparking panel, default 5-15 s countdown.
fn build_electrical_panel() -> ScenarioConfig {
    ScenarioConfig {
        name: "Electrical Panel".into(),
        fires: vec![site(1, Position::new(4.0, 0.0, 1.2), FireConfig::default())],
        extinguishers: vec![station(1, Position::new(0.0, 0.0, 0.0))],
    }
}

/// "Workshop": a bench grinder that sparks into a fire and a fuel store
/// that only ignites if something touches it.
fn build_workshop() -> ScenarioConfig {
    let grinder = FireConfig {
        auto_ignition: Some(AutoIgnition {
            min_delay_secs: 5.0,
            max_delay_secs: 10.0,
        }),
        ..FireConfig::default()
    };
    let fuel_store = FireConfig {
        extinguish_time: 8.0,
        ..FireConfig::contact_only()
    };

    ScenarioConfig {
        name: "Workshop".into(),
        fires: vec![
            site(1, Position::new(6.0, 2.0, 1.0), grinder),
            site(2, Position::new(-5.0, 8.0, 0.5), fuel_store),
        ],
        extinguishers: vec![station(1, Position::new(0.0, 0.0, 0.0))],
    }
}

/// "Warehouse": four racks on staggered timers, two stations. Racks sit
/// far enough apart that one nozzle never covers two of them.
fn build_warehouse() -> ScenarioConfig {
    let rack = |min: f64, max: f64| FireConfig {
        effective_radius: 6.0,
        auto_ignition: Some(AutoIgnition {
            min_delay_secs: min,
            max_delay_secs: max,
        }),
        ..FireConfig::default()
    };

    ScenarioConfig {
        name: "Warehouse".into(),
        fires: vec![
            site(1, Position::new(10.0, 0.0, 2.0), rack(5.0, 8.0)),
            site(2, Position::new(25.0, 0.0, 2.0), rack(10.0, 15.0)),
            site(3, Position::new(10.0, 20.0, 2.0), rack(18.0, 24.0)),
            site(4, Position::new(25.0, 20.0, 2.0), rack(25.0, 30.0)),
        ],
        extinguishers: vec![
            station(1, Position::new(0.0, 0.0, 0.0)),
            station(2, Position::new(35.0, 20.0, 0.0)),
        ],
    }
}

fn site(id: u32, position: Position, config: FireConfig) -> FireSiteConfig {
    FireSiteConfig {
        id: FireId(id),
        position,
        config,
    }
}

fn station(id: u32, position: Position) -> ExtinguisherConfig {
    ExtinguisherConfig {
        id: ExtinguisherId(id),
        position,
    }
}
