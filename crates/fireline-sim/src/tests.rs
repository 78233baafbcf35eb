//! Tests for the simulation engine, the fire coordinator, and scene systems.

use approx::assert_relative_eq;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use fireline_core::commands::DrillCommand;
use fireline_core::components::Extinguisher;
use fireline_core::config::*;
use fireline_core::enums::*;
use fireline_core::error::SimError;
use fireline_core::events::FireEvent;
use fireline_core::state::DrillSnapshot;
use fireline_core::types::{ExtinguisherId, FireId, Position};
use fireline_hazard::FireInstance;

use crate::coordinator::FireCoordinator;
use crate::engine::{SimConfig, SimulationEngine};
use crate::scenario;

// ---- Helpers ----

/// Layout with sites spaced far apart and one extinguisher out of reach.
fn layout(fires: Vec<(u32, FireConfig)>) -> ScenarioConfig {
    ScenarioConfig {
        name: "Test Room".into(),
        fires: fires
            .into_iter()
            .map(|(id, config)| FireSiteConfig {
                id: FireId(id),
                position: Position::new(100.0 * id as f64, 0.0, 0.0),
                config,
            })
            .collect(),
        extinguishers: vec![ExtinguisherConfig {
            id: ExtinguisherId(1),
            position: Position::new(-50.0, 0.0, 0.0),
        }],
    }
}

/// Engine with the layout loaded and the drill started (one tick run).
fn started(config: ScenarioConfig) -> SimulationEngine {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(DrillCommand::LoadCustomScenario { config });
    engine.queue_command(DrillCommand::StartScenario);
    engine.tick();
    engine
}

/// Run `n` ticks (n >= 1), returning the last snapshot and every event seen.
fn run_ticks(engine: &mut SimulationEngine, n: usize) -> (DrillSnapshot, Vec<FireEvent>) {
    let mut events = Vec::new();
    let mut snapshot = engine.tick();
    events.extend(snapshot.events.drain(..));
    for _ in 1..n {
        snapshot = engine.tick();
        events.extend(snapshot.events.drain(..));
    }
    (snapshot, events)
}

fn completions(events: &[FireEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, FireEvent::ScenarioCompleted { .. }))
        .count()
}

fn contact_only() -> FireConfig {
    FireConfig::contact_only()
}

fn pending_forever() -> FireConfig {
    FireConfig {
        auto_ignition: Some(AutoIgnition::after(1000.0)),
        ..FireConfig::default()
    }
}

// ---- Determinism ----

#[test]
fn test_determinism_same_seed() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 12345,
        ..Default::default()
    });

    for engine in [&mut engine_a, &mut engine_b] {
        engine.queue_command(DrillCommand::LoadScenario {
            scenario: ScenarioId::Warehouse,
        });
        engine.queue_command(DrillCommand::StartScenario);
    }

    for _ in 0..600 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_determinism_different_seeds() {
    let mut engine_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    });
    let mut engine_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    });

    for engine in [&mut engine_a, &mut engine_b] {
        engine.queue_command(DrillCommand::LoadScenario {
            scenario: ScenarioId::Warehouse,
        });
        engine.queue_command(DrillCommand::StartScenario);
    }

    // Auto-ignition deadlines are drawn at start, so the countdowns differ.
    let mut diverged = false;
    for _ in 0..60 {
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        if json_a != json_b {
            diverged = true;
            break;
        }
    }
    assert!(diverged, "Different seeds should produce divergent output");
}

// ---- Drill phase ----

#[test]
fn test_start_requires_loaded_scenario() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(DrillCommand::StartScenario);
    let snap = engine.tick();
    assert_eq!(snap.phase, DrillPhase::Setup);
    assert!(snap.scenario.is_none());
    assert_eq!(snap.time.tick, 0);
}

#[test]
fn test_load_waits_in_setup() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(DrillCommand::LoadScenario {
        scenario: ScenarioId::ElectricalPanel,
    });
    let snap = engine.tick();
    assert_eq!(snap.phase, DrillPhase::Setup);
    assert_eq!(snap.scenario.as_deref(), Some("Electrical Panel"));
    assert_eq!(snap.fires.len(), 1);
    assert_eq!(snap.fires[0].state, FireState::Dormant);
    assert_eq!(snap.time.tick, 0);

    engine.queue_command(DrillCommand::StartScenario);
    let snap = engine.tick();
    assert_eq!(snap.phase, DrillPhase::Active);
    assert_eq!(snap.fires[0].state, FireState::AutoIgnitionPending);
    assert_eq!(snap.time.tick, 1);
}

#[test]
fn test_pause_freezes_clock_and_fires() {
    let mut engine = started(layout(vec![(1, contact_only())]));
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(1) });
    engine.queue_command(DrillCommand::ReportSuppressionContact {
        fire_id: FireId(1),
        timestamp: None,
    });
    engine.tick();

    engine.queue_command(DrillCommand::Pause);
    let paused = engine.tick();
    assert_eq!(paused.phase, DrillPhase::Paused);
    let progress = paused.fires[0].progress;

    let (snap, _) = run_ticks(&mut engine, 30);
    assert_eq!(snap.time.tick, paused.time.tick);
    assert_eq!(snap.fires[0].progress, progress);

    engine.queue_command(DrillCommand::Resume);
    let snap = engine.tick();
    assert_eq!(snap.phase, DrillPhase::Active);
    assert!(snap.time.tick > paused.time.tick);
}

#[test]
fn test_time_scale_clamped_and_validated() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(DrillCommand::SetTimeScale { scale: 10.0 });
    engine.tick();
    assert_relative_eq!(engine.time_scale(), 4.0);

    engine.queue_command(DrillCommand::SetTimeScale { scale: f64::NAN });
    engine.tick();
    assert_relative_eq!(engine.time_scale(), 4.0);

    engine.queue_command(DrillCommand::SetTimeScale { scale: -1.0 });
    engine.tick();
    assert_eq!(engine.time_scale(), 0.0);
}

#[test]
fn test_custom_scenario_rejected_on_duplicate_ids() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let config = layout(vec![(1, contact_only()), (1, contact_only())]);
    match engine.load_scenario(config) {
        Err(SimError::DuplicateFire(id)) => assert_eq!(id, FireId(1)),
        other => panic!("expected DuplicateFire, got {other:?}"),
    }
    assert!(engine.scenario_name().is_none());
}

// ---- Scenario resolution ----

#[test]
fn test_resolves_with_contact_only_site_untouched() {
    let mut engine = started(layout(vec![
        (1, contact_only()),
        (2, contact_only()),
        (3, contact_only()),
    ]));
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(1) });
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(2) });
    engine.tick();

    engine.queue_command(DrillCommand::ForceExtinguish { fire_id: FireId(1) });
    engine.queue_command(DrillCommand::ForceExtinguish { fire_id: FireId(2) });
    let (snap, events) = run_ticks(&mut engine, 6);

    assert_eq!(completions(&events), 1);
    assert_eq!(snap.phase, DrillPhase::Complete);
    let summary = snap.summary.expect("scenario should be resolved");
    assert_eq!(summary.fires_completed, 2);
    assert_eq!(summary.total_score, 300);
    assert_relative_eq!(summary.average_score.unwrap(), 150.0);
    assert!(summary.total_elapsed_secs > 0.0);

    // The report also goes out as scenario-wide status text.
    assert!(events.iter().any(|e| matches!(
        e,
        FireEvent::StatusChanged { fire_id: None, message }
            if message.starts_with("ALL FIRES COMPLETELY EXTINGUISHED!")
    )));
}

#[test]
fn test_pending_site_blocks_resolution() {
    let mut engine = started(layout(vec![
        (1, contact_only()),
        (2, contact_only()),
        (3, pending_forever()),
    ]));
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(1) });
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(2) });
    engine.tick();

    engine.queue_command(DrillCommand::ForceExtinguish { fire_id: FireId(1) });
    engine.queue_command(DrillCommand::ForceExtinguish { fire_id: FireId(2) });
    let (snap, events) = run_ticks(&mut engine, 30);

    assert_eq!(completions(&events), 0);
    assert_eq!(snap.phase, DrillPhase::Active);
    assert!(snap.summary.is_none());
    assert_eq!(snap.score.fires_completed, 2);
    assert_eq!(snap.fires[2].state, FireState::AutoIgnitionPending);
}

#[test]
fn test_disabling_last_countdown_resolves() {
    let mut engine = started(layout(vec![(1, contact_only()), (2, pending_forever())]));
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(1) });
    engine.tick();
    engine.queue_command(DrillCommand::ForceExtinguish { fire_id: FireId(1) });
    let (_, events) = run_ticks(&mut engine, 10);
    assert_eq!(completions(&events), 0);

    engine.queue_command(DrillCommand::SetAutoIgnition {
        fire_id: FireId(2),
        auto_ignition: None,
    });
    let (snap, events) = run_ticks(&mut engine, 5);
    assert_eq!(completions(&events), 1);
    assert_eq!(snap.phase, DrillPhase::Complete);
    assert_eq!(snap.fires[1].state, FireState::Dormant);
}

#[test]
fn test_settle_delay_before_resolution() {
    let mut engine = started(layout(vec![(1, contact_only())]));
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(1) });
    engine.tick();

    engine.queue_command(DrillCommand::ForceExtinguish { fire_id: FireId(1) });
    let first = engine.tick();
    assert!(first.summary.is_none());
    assert_eq!(first.fires[0].state, FireState::CompletelyExtinguished);
    let second = engine.tick();
    assert!(second.summary.is_none());
    let third = engine.tick();
    assert!(third.summary.is_some(), "check runs three ticks after completion");
    assert_eq!(completions(&third.events), 1);
}

#[test]
fn test_idle_drill_never_resolves() {
    let mut engine = started(layout(vec![(1, contact_only()), (2, contact_only())]));
    let (snap, events) = run_ticks(&mut engine, 120);
    assert_eq!(completions(&events), 0);
    assert_eq!(snap.phase, DrillPhase::Active);

    let mut empty = started(layout(Vec::new()));
    let (snap, events) = run_ticks(&mut empty, 120);
    assert_eq!(completions(&events), 0);
    assert!(snap.summary.is_none());
}

#[test]
fn test_force_extinguish_twice_keeps_totals() {
    let mut engine = started(layout(vec![(1, contact_only()), (2, pending_forever())]));
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(1) });
    engine.tick();
    engine.queue_command(DrillCommand::ForceExtinguish { fire_id: FireId(1) });
    let before = engine.tick().score;

    engine.queue_command(DrillCommand::ForceExtinguish { fire_id: FireId(1) });
    let after = engine.tick().score;
    assert_eq!(after.total_score, before.total_score);
    assert_eq!(after.fires_completed, 1);
}

// ---- Extinguisher proximity ----

#[test]
fn test_discharging_extinguisher_puts_fire_out() {
    let config = ScenarioConfig {
        name: "Panel".into(),
        fires: vec![FireSiteConfig {
            id: FireId(1),
            position: Position::new(3.0, 0.0, 0.0),
            config: contact_only(),
        }],
        extinguishers: vec![ExtinguisherConfig {
            id: ExtinguisherId(1),
            position: Position::new(0.0, 0.0, 0.0),
        }],
    };
    let mut engine = started(config);
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(1) });
    engine.queue_command(DrillCommand::SetDischarge {
        extinguisher_id: ExtinguisherId(1),
        discharging: true,
    });
    let (snap, events) = run_ticks(&mut engine, 200);

    assert_eq!(snap.fires[0].state, FireState::CompletelyExtinguished);
    assert_eq!(snap.fires[0].score, Some(125));
    assert!(snap.extinguishers[0].discharging);
    assert_eq!(snap.phase, DrillPhase::Complete);
    assert_eq!(completions(&events), 1);

    let alarms: Vec<bool> = events
        .iter()
        .filter_map(|e| match e {
            FireEvent::AlarmChanged { active } => Some(*active),
            _ => None,
        })
        .collect();
    assert_eq!(alarms, vec![true, false]);
    assert!(!snap.alarm_active);
}

#[test]
fn test_extinguisher_out_of_reach_until_moved() {
    let mut engine = started(layout(vec![(1, contact_only())]));
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(1) });
    engine.queue_command(DrillCommand::SetDischarge {
        extinguisher_id: ExtinguisherId(1),
        discharging: true,
    });
    let (snap, _) = run_ticks(&mut engine, 60);
    assert_eq!(snap.fires[0].state, FireState::Burning);
    assert_eq!(snap.fires[0].progress, 0.0);

    engine.queue_command(DrillCommand::MoveExtinguisher {
        extinguisher_id: ExtinguisherId(1),
        position: Position::new(98.0, 0.0, 0.0),
    });
    let (snap, _) = run_ticks(&mut engine, 30);
    assert_eq!(snap.fires[0].state, FireState::Suppressing);
    assert!(snap.fires[0].progress > 0.15);
    assert_eq!(snap.extinguishers[0].position, Position::new(98.0, 0.0, 0.0));

    // Closing the valve lets suppression lapse.
    engine.queue_command(DrillCommand::SetDischarge {
        extinguisher_id: ExtinguisherId(1),
        discharging: false,
    });
    let (snap, _) = run_ticks(&mut engine, 30);
    assert_eq!(snap.fires[0].state, FireState::Burning);
}

#[test]
fn test_unknown_ids_rejected_without_side_effects() {
    let mut engine = started(layout(vec![(1, contact_only())]));
    engine.queue_command(DrillCommand::StartFire {
        fire_id: FireId(99),
    });
    engine.queue_command(DrillCommand::SetDischarge {
        extinguisher_id: ExtinguisherId(7),
        discharging: true,
    });
    let snap = engine.tick();
    assert!(snap.events.is_empty());
    assert_eq!(snap.phase, DrillPhase::Active);
    assert_eq!(snap.fires[0].state, FireState::Dormant);
    assert!(!snap.extinguishers[0].discharging);
}

#[test]
fn test_extinguisher_entities_spawned() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine
        .load_scenario(scenario::build_scenario(ScenarioId::Warehouse))
        .unwrap();
    let count = {
        let mut q = engine.world().query::<(&ExtinguisherId, &Extinguisher)>();
        q.iter().count()
    };
    assert_eq!(count, 2);
}

// ---- Resets ----

#[test]
fn test_reset_scenario_reopens_drill() {
    let mut engine = started(layout(vec![(1, contact_only())]));
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(1) });
    engine.tick();
    engine.queue_command(DrillCommand::ForceExtinguish { fire_id: FireId(1) });
    let (snap, _) = run_ticks(&mut engine, 5);
    assert_eq!(snap.phase, DrillPhase::Complete);

    engine.queue_command(DrillCommand::ResetScenario);
    let snap = engine.tick();
    assert_eq!(snap.phase, DrillPhase::Active);
    assert!(snap.summary.is_none());
    assert_eq!(snap.score.total_score, 0);
    assert_eq!(snap.score.fires_completed, 0);
    assert_eq!(snap.fires[0].state, FireState::Dormant);
    assert!(!snap.fires[0].has_ever_started);

    // A second run resolves again with fresh totals.
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(1) });
    engine.tick();
    engine.queue_command(DrillCommand::ForceExtinguish { fire_id: FireId(1) });
    let (snap, events) = run_ticks(&mut engine, 5);
    assert_eq!(completions(&events), 1);
    assert_eq!(snap.summary.unwrap().fires_completed, 1);
}

#[test]
fn test_reset_fire_allows_burning_again() {
    let mut engine = started(layout(vec![(1, contact_only()), (2, pending_forever())]));
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(1) });
    engine.tick();
    engine.queue_command(DrillCommand::ForceExtinguish { fire_id: FireId(1) });
    engine.tick();

    engine.queue_command(DrillCommand::ResetFire { fire_id: FireId(1) });
    let snap = engine.tick();
    assert!(!snap.fires[0].has_ever_started);
    assert_eq!(snap.fires[0].state, FireState::Dormant);

    engine.queue_command(DrillCommand::ReportContact { fire_id: FireId(1) });
    let snap = engine.tick();
    assert_eq!(snap.fires[0].state, FireState::Burning);
    assert!(snap.fires[0].has_ever_started);
    assert!(snap.alarm_active);
}

#[test]
fn test_reset_fire_after_resolution_resolves_again() {
    let mut engine = started(layout(vec![(1, contact_only())]));
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(1) });
    engine.tick();
    engine.queue_command(DrillCommand::ForceExtinguish { fire_id: FireId(1) });
    let (snap, _) = run_ticks(&mut engine, 5);
    assert_eq!(snap.phase, DrillPhase::Complete);

    engine.queue_command(DrillCommand::ResetFire { fire_id: FireId(1) });
    let snap = engine.tick();
    assert_eq!(snap.phase, DrillPhase::Active);
    assert!(snap.summary.is_none());

    // Nothing left that can burn by itself: the check runs again.
    let (snap, events) = run_ticks(&mut engine, 5);
    assert_eq!(completions(&events), 1);
    assert_eq!(snap.phase, DrillPhase::Complete);
    assert_eq!(snap.summary.unwrap().fires_completed, 1);
}

#[test]
fn test_setup_completion_counts_after_start() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine
        .load_scenario(layout(vec![(1, contact_only())]))
        .unwrap();
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(1) });
    engine.queue_command(DrillCommand::ForceExtinguish { fire_id: FireId(1) });
    let snap = engine.tick();
    assert_eq!(snap.phase, DrillPhase::Setup);
    assert_eq!(snap.score.fires_completed, 1);

    engine.queue_command(DrillCommand::StartScenario);
    let (snap, events) = run_ticks(&mut engine, 5);
    assert_eq!(completions(&events), 1);
    assert_eq!(snap.phase, DrillPhase::Complete);
    let summary = snap.summary.expect("drill should resolve");
    assert_eq!(summary.fires_completed, 1);
    assert_eq!(summary.total_score, 150);
}

// ---- Auto-ignition through the engine ----

#[test]
fn test_electrical_panel_auto_ignites() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(DrillCommand::LoadScenario {
        scenario: ScenarioId::ElectricalPanel,
    });
    engine.queue_command(DrillCommand::StartScenario);
    let first = engine.tick();
    let ignites_in = first.fires[0].ignites_in_secs.unwrap();
    assert!((4.9..=15.0).contains(&ignites_in), "ignites in {ignites_in}");

    // 16 s covers the whole window.
    let (snap, events) = run_ticks(&mut engine, 16 * 30);
    assert!(snap.fires[0].has_ever_started);
    assert_eq!(snap.fires[0].state, FireState::Burning);
    assert!(snap.alarm_active);
    assert!(events.contains(&FireEvent::AlarmChanged { active: true }));
}

#[test]
fn test_workshop_resolves_without_touching_fuel_store() {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: 7,
        ..Default::default()
    });
    engine.queue_command(DrillCommand::LoadScenario {
        scenario: ScenarioId::Workshop,
    });
    engine.queue_command(DrillCommand::StartScenario);
    let (snap, _) = run_ticks(&mut engine, 11 * 30);
    assert_eq!(snap.fires[0].state, FireState::Burning);
    assert_eq!(snap.fires[1].state, FireState::Dormant);

    engine.queue_command(DrillCommand::ForceExtinguish { fire_id: FireId(1) });
    let (snap, events) = run_ticks(&mut engine, 5);
    assert_eq!(completions(&events), 1);
    assert_eq!(snap.phase, DrillPhase::Complete);
    assert_eq!(snap.summary.unwrap().fires_completed, 1);
}

// ---- Notifications ----

#[test]
fn test_subscriber_receives_events_in_order() {
    let mut engine = started(layout(vec![(1, contact_only())]));
    let rx = engine.subscribe();
    let dropped = engine.subscribe();
    drop(dropped);

    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(1) });
    let snap = engine.tick();

    let received: Vec<FireEvent> = rx.try_iter().collect();
    assert_eq!(received, snap.events);
    assert_eq!(
        received[0],
        FireEvent::FireStateChanged {
            fire_id: FireId(1),
            is_active: true
        }
    );
    assert_eq!(received.last(), Some(&FireEvent::AlarmChanged { active: true }));
}

/// Kind of each notification for one site, in published order.
fn site_kinds(events: &[FireEvent], id: FireId) -> Vec<&'static str> {
    events
        .iter()
        .filter_map(|e| match e {
            FireEvent::FireStateChanged { fire_id, .. } if *fire_id == id => Some("state"),
            FireEvent::ExtinguishProgressChanged { fire_id, .. } if *fire_id == id => {
                Some("progress")
            }
            FireEvent::StatusChanged {
                fire_id: Some(fire_id),
                ..
            } if *fire_id == id => Some("status"),
            _ => None,
        })
        .collect()
}

#[test]
fn test_command_and_update_notifications_ordered_within_tick() {
    let mut engine = started(layout(vec![(1, contact_only())]));
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(1) });
    engine.tick();

    engine.queue_command(DrillCommand::ReportSuppressionContact {
        fire_id: FireId(1),
        timestamp: None,
    });
    let snap = engine.tick();
    assert_eq!(site_kinds(&snap.events, FireId(1)), vec!["progress", "status"]);

    // Ignition and suppression in the same tick as the progress update.
    let mut engine = started(layout(vec![(1, contact_only()), (2, contact_only())]));
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(2) });
    engine.queue_command(DrillCommand::ReportSuppressionContact {
        fire_id: FireId(2),
        timestamp: None,
    });
    engine.queue_command(DrillCommand::StartFire { fire_id: FireId(1) });
    let snap = engine.tick();
    assert_eq!(
        site_kinds(&snap.events, FireId(2)),
        vec!["state", "progress", "status", "status"]
    );
    let first_site_two = snap
        .events
        .iter()
        .position(|e| matches!(e, FireEvent::FireStateChanged { fire_id: FireId(2), .. }));
    let last_site_one = snap.events.iter().rposition(|e| {
        matches!(
            e,
            FireEvent::StatusChanged {
                fire_id: Some(FireId(1)),
                ..
            }
        )
    });
    assert!(last_site_one < first_site_two);
    assert_eq!(snap.events.last(), Some(&FireEvent::AlarmChanged { active: true }));
}

#[test]
fn test_snapshot_serializes() {
    let mut engine = started(scenario::build_scenario(ScenarioId::Warehouse));
    let snap = engine.tick();
    let json = serde_json::to_string(&snap).unwrap();
    let back: DrillSnapshot = serde_json::from_str(&json).unwrap();
    assert_eq!(back.fires.len(), 4);
    assert_eq!(back.extinguishers.len(), 2);
    assert_eq!(back.score.fires_total, 4);
    assert!(back
        .fires
        .windows(2)
        .all(|w| w[0].fire_id < w[1].fire_id));
}

// ---- Coordinator ----

#[test]
fn test_coordinator_rejects_duplicate_registration() {
    let mut coordinator = FireCoordinator::new(0.0);
    let fire = FireInstance::new(FireId(1), Position::default(), contact_only());
    coordinator.register(fire.clone()).unwrap();
    assert!(matches!(
        coordinator.register(fire),
        Err(SimError::DuplicateFire(FireId(1)))
    ));
    assert!(matches!(
        coordinator.start_fire(FireId(2), 0.0, &mut Vec::new()),
        Err(SimError::UnknownFire(FireId(2)))
    ));
}

#[test]
fn test_coordinator_debounces_completion_check() {
    let mut rng = ChaCha8Rng::seed_from_u64(1);
    let mut coordinator = FireCoordinator::new(0.0);
    for id in 1..=2 {
        coordinator
            .register(FireInstance::new(FireId(id), Position::default(), contact_only()))
            .unwrap();
    }
    let mut events = Vec::new();
    coordinator.start(0.0, &mut rng, &mut events);
    coordinator.start_fire(FireId(1), 0.0, &mut events).unwrap();
    coordinator.start_fire(FireId(2), 0.0, &mut events).unwrap();

    coordinator
        .force_extinguish(FireId(1), 1.0, 10, &mut events)
        .unwrap();
    assert_eq!(coordinator.pending_check(), Some(13));
    coordinator
        .force_extinguish(FireId(2), 1.1, 12, &mut events)
        .unwrap();
    assert_eq!(coordinator.pending_check(), Some(15));

    assert!(coordinator.update(1.2, 0.1, 13, &mut events).is_none());
    let summary = coordinator.update(1.5, 0.1, 15, &mut events).unwrap();
    assert_eq!(summary.fires_completed, 2);
    assert_relative_eq!(summary.total_elapsed_secs, 1.5);
    assert!(coordinator.pending_check().is_none());

    // Emitted once per resolution.
    assert!(coordinator.evaluate_completion(2.0, &mut events).is_none());
}

#[test]
fn test_coordinator_reset_restarts_clock() {
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let mut coordinator = FireCoordinator::new(0.0);
    coordinator
        .register(FireInstance::new(FireId(1), Position::default(), contact_only()))
        .unwrap();
    let mut events = Vec::new();
    coordinator.start_fire(FireId(1), 0.0, &mut events).unwrap();
    coordinator
        .force_extinguish(FireId(1), 2.0, 1, &mut events)
        .unwrap();
    assert!(coordinator.evaluate_completion(2.0, &mut events).is_some());

    coordinator.reset_scenario(5.0, &mut rng, &mut events);
    assert!(!coordinator.is_resolved());
    assert_eq!(coordinator.totals().fires_completed(), 0);
    assert_eq!(coordinator.totals().scenario_start_secs(), 5.0);
    assert!(!coordinator.fire(FireId(1)).unwrap().has_ever_started());
    assert!(coordinator.evaluate_completion(6.0, &mut events).is_none());
}

#[test]
fn test_coordinator_reset_fire_schedules_check() {
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    let mut coordinator = FireCoordinator::new(0.0);
    coordinator
        .register(FireInstance::new(FireId(1), Position::default(), contact_only()))
        .unwrap();
    let mut events = Vec::new();
    coordinator.start_fire(FireId(1), 0.0, &mut events).unwrap();
    coordinator
        .force_extinguish(FireId(1), 1.0, 1, &mut events)
        .unwrap();
    assert!(coordinator.update(1.2, 0.1, 4, &mut events).is_some());

    coordinator
        .reset_fire(FireId(1), 2.0, 20, &mut rng, &mut events)
        .unwrap();
    assert!(!coordinator.is_resolved());
    assert_eq!(coordinator.pending_check(), Some(23));
    assert!(coordinator.update(2.1, 0.1, 22, &mut events).is_none());
    assert!(coordinator.update(2.2, 0.1, 23, &mut events).is_some());
}

#[test]
fn test_coordinator_start_keeps_setup_completions() {
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let mut coordinator = FireCoordinator::new(0.0);
    coordinator
        .register(FireInstance::new(FireId(1), Position::default(), contact_only()))
        .unwrap();
    let mut events = Vec::new();
    coordinator.start_fire(FireId(1), 0.0, &mut events).unwrap();
    coordinator
        .force_extinguish(FireId(1), 0.0, 0, &mut events)
        .unwrap();

    coordinator.start(1.0, &mut rng, &mut events);
    assert_eq!(coordinator.totals().fires_completed(), 1);
    assert_eq!(coordinator.totals().scenario_start_secs(), 1.0);
    let summary = coordinator.update(2.0, 0.1, 3, &mut events).unwrap();
    assert_eq!(summary.fires_completed, 1);
    assert_relative_eq!(summary.total_elapsed_secs, 1.0);
}
