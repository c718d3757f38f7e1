//! Chernobyl Explorer Headless Scenario Harness
//!
//! Drives the pure game logic through scripted runs and checks the outcomes.
//! No window, no rendering backend.
//!
//! Usage:
//!   cargo run -p chernobyl-simtest
//!   cargo run -p chernobyl-simtest -- --verbose
//!   cargo run -p chernobyl-simtest -- --dump

use chernobyl_logic::geometry::Point;
use chernobyl_logic::prelude::*;
use chernobyl_logic::rooms::{build_catalog, ids, validate_catalog, CatalogError, EnemyStatus};
use serde::Serialize;

// ── Default config (same JSON the viewer can load) ──────────────────────
const CONFIG_JSON: &str = include_str!("../../../data/game_config.json");

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

/// Final state of one scenario, printed with `--dump`.
#[derive(Debug, Serialize)]
struct ScenarioReport {
    scenario: String,
    tick: u64,
    room: String,
    x: f32,
    y: f32,
    hp: f32,
    keys: u32,
    game_over: bool,
    enemies_alive: usize,
    events: Vec<GameEvent>,
}

impl ScenarioReport {
    fn capture(scenario: &str, engine: &GameEngine, events: Vec<GameEvent>) -> Self {
        let world = &engine.world;
        Self {
            scenario: scenario.to_string(),
            tick: world.tick,
            room: world.current_room().name.clone(),
            x: world.player.x,
            y: world.player.y,
            hp: world.player.hp,
            keys: world.player.keys,
            game_over: world.is_game_over(),
            enemies_alive: world
                .rooms
                .iter()
                .flat_map(|r| r.enemies.iter())
                .filter(|e| e.is_alive())
                .count(),
            events,
        }
    }
}

fn main() {
    let verbose = std::env::args().any(|a| a == "--verbose");
    let dump = std::env::args().any(|a| a == "--dump");
    println!("=== Chernobyl Explorer Scenario Harness ===\n");

    let config = match GameConfig::from_json_str(CONFIG_JSON) {
        Ok(c) => c,
        Err(e) => {
            println!("  ✗ config_parse: {}", e);
            std::process::exit(1);
        }
    };

    let mut results = Vec::new();
    let mut reports = Vec::new();

    // 1. Config and catalog
    results.extend(validate_config(&config, verbose));
    results.extend(validate_rooms(&config, verbose));

    // 2. Scripted play
    results.extend(scenario_street_door(&config, verbose, &mut reports));
    results.extend(scenario_locked_door(&config, verbose, &mut reports));
    results.extend(scenario_reactor_drain(&config, verbose, &mut reports));
    results.extend(scenario_enemy_contact(&config, verbose, &mut reports));
    results.extend(scenario_core_exit(&config, verbose, &mut reports));

    // 3. Renderer
    results.extend(validate_frame(&config, verbose));

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if dump {
        match serde_json::to_string_pretty(&reports) {
            Ok(json) => println!("\n{}", json),
            Err(e) => eprintln!("Failed to serialize reports: {}", e),
        }
    }

    if failed > 0 {
        std::process::exit(1);
    }
}

fn new_engine(config: &GameConfig) -> Result<GameEngine, CatalogError> {
    GameEngine::new(config.clone())
}

fn engine_missing(name: &str, err: CatalogError) -> Vec<TestResult> {
    vec![TestResult {
        name: name.into(),
        passed: false,
        detail: format!("engine could not be built: {}", err),
    }]
}

fn disable_enemies(engine: &mut GameEngine, room: usize) {
    for enemy in &mut engine.world.rooms[room].enemies {
        enemy.hp = 0.0;
        enemy.status = EnemyStatus::Disabled;
    }
}

// ── 1. Config & Catalog ─────────────────────────────────────────────────

fn validate_config(config: &GameConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Config ---");
    let mut results = Vec::new();

    results.push(TestResult {
        name: "config_matches_defaults".into(),
        passed: *config == GameConfig::default(),
        detail: "data/game_config.json mirrors the built-in defaults".into(),
    });

    let partial = GameConfig::from_json_str(r#"{ "player_speed": 6.0 }"#);
    results.push(TestResult {
        name: "config_partial_override".into(),
        passed: matches!(&partial, Ok(c) if c.player_speed == 6.0 && c.player_hp_max == 100.0),
        detail: "missing keys fall back to defaults".into(),
    });

    let bad = GameConfig::from_json_str(r#"{ "fade_step": 0.0 }"#);
    results.push(TestResult {
        name: "config_rejects_zero_fade".into(),
        passed: bad.is_err(),
        detail: match bad {
            Err(e) => e.to_string(),
            Ok(_) => "accepted a fade that never clears".into(),
        },
    });

    results
}

fn validate_rooms(config: &GameConfig, verbose: bool) -> Vec<TestResult> {
    println!("--- Room Catalog ---");
    let mut results = Vec::new();
    let rooms = build_catalog(config);

    results.push(TestResult {
        name: "catalog_four_rooms".into(),
        passed: rooms.len() == 4,
        detail: format!("{} rooms", rooms.len()),
    });

    let valid = validate_catalog(&rooms, config);
    results.push(TestResult {
        name: "catalog_validates".into(),
        passed: valid.is_ok(),
        detail: match valid {
            Ok(()) => "doors, spawns and rectangles consistent".into(),
            Err(e) => e.to_string(),
        },
    });

    for room in &rooms {
        if verbose {
            println!(
                "  {}: {} doors, {} walls, {} hazards, {} items, {} enemies",
                room.name,
                room.doors.len(),
                room.walls.len(),
                room.hazards.len(),
                room.items.len(),
                room.enemies.len()
            );
        }
    }

    let locked: Vec<_> = rooms
        .iter()
        .flat_map(|r| r.doors.iter())
        .filter(|d| d.lock == chernobyl_logic::rooms::Lock::Key)
        .collect();
    let keys: usize = rooms
        .iter()
        .flat_map(|r| r.items.iter())
        .filter(|i| i.kind == chernobyl_logic::rooms::ItemKind::Key)
        .count();
    results.push(TestResult {
        name: "catalog_enough_keys".into(),
        passed: keys >= locked.len(),
        detail: format!("{} keys for {} locked doors", keys, locked.len()),
    });

    results
}

// ── 2. Scripted Play ────────────────────────────────────────────────────

fn scenario_street_door(
    config: &GameConfig,
    verbose: bool,
    reports: &mut Vec<ScenarioReport>,
) -> Vec<TestResult> {
    println!("--- Street → Park ---");
    let mut engine = match new_engine(config) {
        Ok(engine) => engine,
        Err(e) => return engine_missing("street_door", e),
    };
    let mut results = Vec::new();
    disable_enemies(&mut engine, ids::PRIPYAT_STREET);

    engine.press(Direction::Right);
    let mut events = Vec::new();
    for _ in 0..300 {
        events.extend(engine.tick());
        if engine.world.player.room == ids::PRIPYAT_PARK {
            break;
        }
    }
    engine.release(Direction::Right);

    let h = config.canvas_height;
    results.push(TestResult {
        name: "street_door_reaches_park".into(),
        passed: engine.world.player.room == ids::PRIPYAT_PARK,
        detail: format!("in {} at tick {}", engine.world.current_room().name, engine.world.tick),
    });
    results.push(TestResult {
        name: "street_door_destination".into(),
        passed: engine.world.player.position() == Point::new(30.0, h / 2.0),
        detail: format!("({}, {})", engine.world.player.x, engine.world.player.y),
    });
    let started = events
        .iter()
        .filter(|e| matches!(e, GameEvent::TransitionStarted { .. }))
        .count();
    results.push(TestResult {
        name: "street_door_single_trigger".into(),
        passed: started == 1,
        detail: format!("{} transition(s) started", started),
    });

    engine.run_ticks(30);
    results.push(TestResult {
        name: "street_door_fade_clears".into(),
        passed: engine.world.transition.alpha == 0.0,
        detail: format!("alpha {}", engine.world.transition.alpha),
    });

    if verbose {
        println!("  {} events", events.len());
    }
    reports.push(ScenarioReport::capture("street_door", &engine, events));
    results
}

fn scenario_locked_door(
    config: &GameConfig,
    _verbose: bool,
    reports: &mut Vec<ScenarioReport>,
) -> Vec<TestResult> {
    println!("--- Locked Park Door ---");
    let mut engine = match new_engine(config) {
        Ok(engine) => engine,
        Err(e) => return engine_missing("locked_door", e),
    };
    let mut results = Vec::new();
    disable_enemies(&mut engine, ids::PRIPYAT_PARK);
    let mut events = Vec::new();

    engine.world.warp(ids::PRIPYAT_PARK, Point::new(500.0, 50.0));
    engine.press(Direction::Right);
    events.extend(engine.run_ticks(20));
    engine.release(Direction::Right);
    let refused = events
        .iter()
        .any(|e| matches!(e, GameEvent::DoorLocked { .. }));
    results.push(TestResult {
        name: "locked_door_refuses_without_key".into(),
        passed: refused && engine.world.player.room == ids::PRIPYAT_PARK,
        detail: format!("still in {}", engine.world.current_room().name),
    });

    engine.world.warp(ids::PRIPYAT_PARK, Point::new(255.0, 75.0));
    events.extend(engine.tick());
    results.push(TestResult {
        name: "locked_door_key_pickup".into(),
        passed: engine.world.player.keys == 1,
        detail: format!("{} key(s)", engine.world.player.keys),
    });

    engine.world.warp(ids::PRIPYAT_PARK, Point::new(500.0, 50.0));
    engine.press(Direction::Right);
    events.extend(engine.run_ticks(20));
    results.push(TestResult {
        name: "locked_door_opens_with_key".into(),
        passed: engine.world.player.room == ids::REACTOR_EXTERIOR && engine.world.player.keys == 0,
        detail: format!(
            "in {} with {} key(s)",
            engine.world.current_room().name,
            engine.world.player.keys
        ),
    });

    reports.push(ScenarioReport::capture("locked_door", &engine, events));
    results
}

fn scenario_reactor_drain(
    config: &GameConfig,
    verbose: bool,
    reports: &mut Vec<ScenarioReport>,
) -> Vec<TestResult> {
    println!("--- Reactor Core Radiation ---");
    let mut engine = match new_engine(config) {
        Ok(engine) => engine,
        Err(e) => return engine_missing("reactor_drain", e),
    };
    let mut results = Vec::new();
    disable_enemies(&mut engine, ids::REACTOR_CORE);
    let spawn = engine.world.rooms[ids::REACTOR_CORE].spawn;
    engine.world.warp(ids::REACTOR_CORE, spawn);

    let mut events = engine.run_ticks(100);
    let expected = config.player_hp_max - 100.0 * 0.12;
    results.push(TestResult {
        name: "reactor_drain_rate".into(),
        passed: (engine.world.player.hp - expected).abs() < 1e-3,
        detail: format!("hp {:.2} after 100 ticks", engine.world.player.hp),
    });

    events.extend(engine.run_ticks(2000));
    let game_overs = events
        .iter()
        .filter(|e| matches!(e, GameEvent::GameOver { .. }))
        .count();
    results.push(TestResult {
        name: "reactor_drain_game_over_once".into(),
        passed: engine.is_game_over() && game_overs == 1 && engine.world.player.hp == 0.0,
        detail: format!("game over at tick {}", engine.world.tick),
    });

    let tick = engine.world.tick;
    engine.run_ticks(10);
    results.push(TestResult {
        name: "reactor_drain_terminal".into(),
        passed: engine.world.tick == tick,
        detail: "no ticks after game over".into(),
    });

    if verbose {
        println!("  died at tick {}", tick);
    }
    reports.push(ScenarioReport::capture("reactor_drain", &engine, events));
    results
}

fn scenario_enemy_contact(
    config: &GameConfig,
    _verbose: bool,
    reports: &mut Vec<ScenarioReport>,
) -> Vec<TestResult> {
    println!("--- Enemy Contact ---");
    let mut engine = match new_engine(config) {
        Ok(engine) => engine,
        Err(e) => return engine_missing("enemy_contact", e),
    };
    let mut results = Vec::new();
    let room = ids::PRIPYAT_STREET;
    let (ex, ey) = {
        let enemy = &engine.world.rooms[room].enemies[0];
        (enemy.x, enemy.y)
    };
    engine.world.player.set_position(Point::new(ex, ey));

    let mut events = Vec::new();
    for _ in 0..10 {
        let tick_events = engine.tick();
        let done = tick_events.contains(&GameEvent::EnemyDisabled { room, enemy: 0 });
        events.extend(tick_events);
        if done {
            break;
        }
    }

    let enemies = &engine.world.rooms[room].enemies;
    results.push(TestResult {
        name: "enemy_contact_disables".into(),
        passed: enemies.len() == 1 && enemies[0].status == EnemyStatus::Disabled,
        detail: format!("enemy hp {} after tick {}", enemies[0].hp, engine.world.tick),
    });
    results.push(TestResult {
        name: "enemy_contact_hurts_player".into(),
        passed: engine.world.player.hp < config.player_hp_max,
        detail: format!("player hp {}", engine.world.player.hp),
    });

    let pos = (enemies[0].x, enemies[0].y);
    let hp = engine.world.player.hp;
    events.extend(engine.run_ticks(30));
    let enemy = &engine.world.rooms[room].enemies[0];
    results.push(TestResult {
        name: "enemy_contact_inert_after".into(),
        passed: (enemy.x, enemy.y) == pos && engine.world.player.hp == hp,
        detail: "disabled enemy neither moves nor damages".into(),
    });

    reports.push(ScenarioReport::capture("enemy_contact", &engine, events));
    results
}

fn scenario_core_exit(
    config: &GameConfig,
    _verbose: bool,
    reports: &mut Vec<ScenarioReport>,
) -> Vec<TestResult> {
    println!("--- Core → Exterior ---");
    let mut engine = match new_engine(config) {
        Ok(engine) => engine,
        Err(e) => return engine_missing("core_exit", e),
    };
    let mut results = Vec::new();
    disable_enemies(&mut engine, ids::REACTOR_CORE);
    disable_enemies(&mut engine, ids::REACTOR_EXTERIOR);

    let x = config.canvas_width / 2.0 - 12.0;
    engine.world.warp(ids::REACTOR_CORE, Point::new(x, 40.0));
    engine.press(Direction::Up);
    let mut events = Vec::new();
    for _ in 0..60 {
        events.extend(engine.tick());
        if engine.world.player.room == ids::REACTOR_EXTERIOR {
            break;
        }
    }
    engine.release(Direction::Up);
    results.push(TestResult {
        name: "core_exit_reaches_exterior".into(),
        passed: engine.world.player.room == ids::REACTOR_EXTERIOR,
        detail: format!("in {}", engine.world.current_room().name),
    });

    // Landing overlaps the exterior's south door; standing still must not
    // bounce the player back into the core.
    events.extend(engine.run_ticks(60));
    results.push(TestResult {
        name: "core_exit_no_bounce".into(),
        passed: engine.world.player.room == ids::REACTOR_EXTERIOR,
        detail: format!("still in {}", engine.world.current_room().name),
    });

    reports.push(ScenarioReport::capture("core_exit", &engine, events));
    results
}

// ── 3. Renderer ─────────────────────────────────────────────────────────

fn validate_frame(config: &GameConfig, _verbose: bool) -> Vec<TestResult> {
    println!("--- Frame ---");
    let engine = match new_engine(config) {
        Ok(engine) => engine,
        Err(e) => return engine_missing("frame", e),
    };
    let mut results = Vec::new();
    let frame = engine.frame();

    let texts: Vec<&str> = frame
        .iter()
        .filter_map(|c| match c {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
        .collect();
    results.push(TestResult {
        name: "frame_hud".into(),
        passed: texts == ["Pripyat Street", "HP: 100", "Keys: 0"],
        detail: texts.join(" | "),
    });

    let before = engine.world.clone();
    let _ = engine.frame();
    results.push(TestResult {
        name: "frame_read_only".into(),
        passed: engine.world == before,
        detail: format!("{} draw commands", frame.len()),
    });

    results
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_failure_reports_catalog_error() {
        // Street spawn (50, 30) cannot hold a 24-unit player on a 60×60 canvas.
        let config = GameConfig {
            canvas_width: 60.0,
            canvas_height: 60.0,
            ..GameConfig::default()
        };
        let err = match new_engine(&config) {
            Ok(_) => panic!("undersized canvas accepted"),
            Err(e) => e,
        };
        let expected = err.to_string();
        let results = engine_missing("street_door", err);
        assert_eq!(results.len(), 1);
        assert!(!results[0].passed);
        assert!(results[0].detail.contains(&expected), "{}", results[0].detail);
        assert!(results[0].detail.contains("does not fit the canvas"));
    }
}
