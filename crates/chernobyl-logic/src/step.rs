//! The step function: advances the world by one tick.
//!
//! Processing order, all against the active room:
//!   0. Background drift
//!   1. Input → movement
//!   2. Canvas clamp
//!   3. Wall collision (whole-step rollback)
//!   4. Door interaction (first passable overlap wins)
//!   5. Hazard damage
//!   6. Item pickup
//!   7. Enemy pursuit and contact damage
//!   8. Transition tick (fade decay, deferred room swap)
//!
//! Speeds and damage are per tick. Once the player's hit points run out the
//! world enters [`Phase::GameOver`], the rest of the tick is skipped and every
//! later call is a no-op.

use crate::config::GameConfig;
use crate::events::GameEvent;
use crate::geometry::{clamp_position, sign, Point, Rect};
use crate::input::InputState;
use crate::rooms::{ItemKind, Lock, Room};
use crate::world::{Phase, World};

pub fn step(world: &mut World, input: &InputState, config: &GameConfig) -> Vec<GameEvent> {
    if world.phase != Phase::Playing {
        return Vec::new();
    }

    let mut events = Vec::new();
    world.tick += 1;
    world.background_offset += config.background_drift;

    let before = world.player.position();
    move_player(world, input);
    clamp_player(world);
    resolve_walls(world, before);
    resolve_doors(world, config, &mut events);
    if resolve_hazards(world, &mut events) {
        return events;
    }
    resolve_items(world, config, &mut events);
    if resolve_enemies(world, config, &mut events) {
        return events;
    }
    resolve_transition(world, config, &mut events);

    events
}

// ── 1–3. Movement ───────────────────────────────────────────────────────

fn move_player(world: &mut World, input: &InputState) {
    let (dx, dy) = input.displacement(world.player.speed);
    world.player.x += dx;
    world.player.y += dy;
}

fn clamp_player(world: &mut World) {
    let r = world
        .player
        .rect()
        .clamped_to(world.canvas_width, world.canvas_height);
    world.player.set_position(Point::new(r.x, r.y));
}

/// Any wall overlap cancels the whole move, both axes. No sliding.
fn resolve_walls(world: &mut World, before: Point) {
    let rect = world.player.rect();
    let blocked = world.rooms[world.player.room]
        .walls
        .iter()
        .any(|w| w.rect.overlaps(&rect));
    if blocked {
        world.player.set_position(before);
    }
}

// ── 4. Doors ────────────────────────────────────────────────────────────

fn resolve_doors(world: &mut World, config: &GameConfig, events: &mut Vec<GameEvent>) {
    if world.transition.swap_pending() {
        return;
    }

    let rect = world.player.rect();
    let from = world.player.room;
    let room = &world.rooms[from];

    if !world.doors_armed {
        if !room.doors.iter().any(|d| d.rect.overlaps(&rect)) {
            world.doors_armed = true;
        }
        return;
    }

    for (i, door) in room.doors.iter().enumerate() {
        if !door.rect.overlaps(&rect) {
            continue;
        }
        if door.lock == Lock::Key {
            if world.player.keys == 0 {
                log::debug!("Door {} in {} is locked", i, room.name);
                events.push(GameEvent::DoorLocked { door: i });
                continue;
            }
            world.player.keys -= 1;
            events.push(GameEvent::KeyUsed {
                keys_left: world.player.keys,
            });
        }
        world
            .transition
            .start(door.target, door.dest, config.swap_delay_ticks);
        events.push(GameEvent::TransitionStarted {
            from,
            to: door.target,
        });
        break;
    }
}

// ── 5. Hazards ──────────────────────────────────────────────────────────

/// Returns `true` if the player died.
fn resolve_hazards(world: &mut World, events: &mut Vec<GameEvent>) -> bool {
    let rect = world.player.rect();
    let damage: f32 = world.rooms[world.player.room]
        .hazards
        .iter()
        .filter(|h| h.rect.overlaps(&rect))
        .map(|h| h.damage)
        .sum();
    if damage > 0.0 {
        world.player.hp -= damage;
        if world.player.hp <= 0.0 {
            trigger_game_over(world, events);
            return true;
        }
    }
    false
}

// ── 6. Items ────────────────────────────────────────────────────────────

fn resolve_items(world: &mut World, config: &GameConfig, events: &mut Vec<GameEvent>) {
    let World { player, rooms, .. } = world;
    let rect = player.rect();
    let room_index = player.room;
    rooms[room_index].items.retain(|item| {
        if !item.rect.overlaps(&rect) {
            return true;
        }
        match item.kind {
            ItemKind::Medkit => player.hp = (player.hp + config.medkit_heal).min(player.hp_max),
            ItemKind::Key => player.keys += 1,
        }
        log::debug!("Picked up {:?}", item.kind);
        events.push(GameEvent::ItemPicked {
            kind: item.kind,
            hp: player.hp,
            keys: player.keys,
        });
        false
    });
}

// ── 7. Enemies ──────────────────────────────────────────────────────────

/// Straight-line pursuit and contact damage. Returns `true` if the player died.
fn resolve_enemies(world: &mut World, config: &GameConfig, events: &mut Vec<GameEvent>) -> bool {
    let (w, h) = (world.canvas_width, world.canvas_height);
    let room_index = world.player.room;
    let mut player_dead = false;

    {
        let World { player, rooms, .. } = &mut *world;
        let Room { walls, enemies, .. } = &mut rooms[room_index];
        for (i, enemy) in enemies.iter_mut().enumerate() {
            if !enemy.is_alive() {
                continue;
            }

            let dx = player.x - enemy.x;
            let dy = player.y - enemy.y;
            let dist = match dx.hypot(dy) {
                d if d > 0.0 => d,
                _ => 1.0,
            };
            if dist < config.pursuit_radius {
                enemy.x += dx / dist * enemy.speed;
                enemy.y += dy / dist * enemy.speed;
            }
            let (ex, ey) = clamp_position(enemy.x, enemy.y, enemy.size, enemy.size, w, h);
            enemy.x = ex;
            enemy.y = ey;

            if !player.rect().overlaps(&enemy.rect()) {
                continue;
            }

            // Contact trades damage every tick it lasts.
            player.hp -= enemy.damage;
            events.push(GameEvent::PlayerHurt {
                enemy: i,
                damage: enemy.damage,
                hp: player.hp.max(0.0),
            });

            // Knockback pushes away from the enemy, one fixed step per axis.
            // Walls still block it.
            let (px, py) = clamp_position(
                player.x + sign(dx) * config.knockback,
                player.y + sign(dy) * config.knockback,
                player.size,
                player.size,
                w,
                h,
            );
            let pushed = Rect::square(px, py, player.size);
            if !walls.iter().any(|wall| wall.rect.overlaps(&pushed)) {
                player.x = px;
                player.y = py;
            }

            if enemy.take_damage(player.contact_damage) {
                log::debug!("Enemy {} in room {} disabled", i, room_index);
                events.push(GameEvent::EnemyDisabled {
                    room: room_index,
                    enemy: i,
                });
            }

            if player.hp <= 0.0 {
                player_dead = true;
                break;
            }
        }
    }

    if player_dead {
        trigger_game_over(world, events);
    }
    player_dead
}

// ── 8. Transition ───────────────────────────────────────────────────────

fn resolve_transition(world: &mut World, config: &GameConfig, events: &mut Vec<GameEvent>) {
    let Some(swap) = world.transition.tick(config.fade_step) else {
        return;
    };
    world.player.room = swap.target;
    world.player.set_position(swap.dest);

    let rect = world.player.rect();
    let room = &world.rooms[swap.target];
    world.doors_armed = !room.doors.iter().any(|d| d.rect.overlaps(&rect));

    log::info!("Entered {}", room.name);
    events.push(GameEvent::RoomEntered { room: swap.target });
}

fn trigger_game_over(world: &mut World, events: &mut Vec<GameEvent>) {
    world.player.hp = 0.0;
    world.phase = Phase::GameOver;
    log::info!(
        "Game over in {} at tick {}",
        world.current_room().name,
        world.tick
    );
    events.push(GameEvent::GameOver { tick: world.tick });
}
