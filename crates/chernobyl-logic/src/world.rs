//! World state: the single value the loop driver owns and threads through
//! [`crate::step::step`] and [`crate::render::build_frame`].

use serde::{Deserialize, Serialize};

use crate::config::GameConfig;
use crate::geometry::{Point, Rect};
use crate::rooms::{build_catalog, validate_catalog, CatalogError, Room};
use crate::transition::Transition;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    pub hp: f32,
    pub hp_max: f32,
    pub keys: u32,
    /// Index of the active room.
    pub room: usize,
    /// Damage dealt to an enemy per tick of contact.
    pub contact_damage: f32,
}

impl Player {
    pub fn rect(&self) -> Rect {
        Rect::square(self.x, self.y, self.size)
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, p: Point) {
        self.x = p.x;
        self.y = p.y;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    Playing,
    /// Terminal. Steps are no-ops; only the overlay is drawn.
    GameOver,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub player: Player,
    pub rooms: Vec<Room>,
    pub phase: Phase,
    pub transition: Transition,
    /// Doors are ignored until the player steps off every door after arriving
    /// in a room on top of one.
    pub doors_armed: bool,
    /// Skyline scroll offset.
    pub background_offset: f32,
    pub tick: u64,
    pub canvas_width: f32,
    pub canvas_height: f32,
}

impl World {
    /// Fresh world with the built-in catalog, player at the first room's spawn.
    pub fn new(config: &GameConfig) -> Result<Self, CatalogError> {
        Self::with_rooms(config, build_catalog(config))
    }

    /// Fresh world over a custom catalog. The player starts in room 0.
    pub fn with_rooms(config: &GameConfig, rooms: Vec<Room>) -> Result<Self, CatalogError> {
        validate_catalog(&rooms, config)?;
        let spawn = rooms[0].spawn;
        Ok(Self {
            player: Player {
                x: spawn.x,
                y: spawn.y,
                size: config.player_size,
                speed: config.player_speed,
                hp: config.player_hp_max,
                hp_max: config.player_hp_max,
                keys: 0,
                room: 0,
                contact_damage: config.player_contact_damage,
            },
            rooms,
            phase: Phase::Playing,
            transition: Transition::default(),
            doors_armed: true,
            background_offset: 0.0,
            tick: 0,
            canvas_width: config.canvas_width,
            canvas_height: config.canvas_height,
        })
    }

    pub fn current_room(&self) -> &Room {
        &self.rooms[self.player.room]
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// Teleport the player into another room, e.g. for a debug warp.
    /// Out-of-range indices are ignored.
    pub fn warp(&mut self, room: usize, dest: Point) -> bool {
        if room >= self.rooms.len() {
            return false;
        }
        self.player.room = room;
        self.player.set_position(dest);
        let rect = self.player.rect();
        self.doors_armed = !self.rooms[room].doors.iter().any(|d| d.rect.overlaps(&rect));
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rooms::ids;

    #[test]
    fn new_world_starts_at_street_spawn() {
        let config = GameConfig::default();
        let world = World::new(&config).expect("catalog valid");
        assert_eq!(world.player.room, ids::PRIPYAT_STREET);
        assert_eq!(world.player.position(), Point::new(50.0, config.canvas_height / 2.0));
        assert_eq!(world.player.hp, 100.0);
        assert_eq!(world.player.hp_max, 100.0);
        assert_eq!(world.player.keys, 0);
        assert_eq!(world.phase, Phase::Playing);
        assert_eq!(world.current_room().name, "Pripyat Street");
    }

    #[test]
    fn invalid_catalog_fails_fast() {
        let config = GameConfig::default();
        let mut rooms = build_catalog(&config);
        rooms[3].doors[0].target = 42;
        assert!(World::with_rooms(&config, rooms).is_err());
    }

    #[test]
    fn warp_onto_door_disarms_doors() {
        let config = GameConfig::default();
        let mut world = World::new(&config).expect("catalog valid");
        // Landing spot used by the Reactor Core exit sits on the exterior's south door.
        assert!(world.warp(ids::REACTOR_EXTERIOR, Point::new(280.0, 340.0)));
        assert!(!world.doors_armed);
        assert!(world.warp(ids::REACTOR_EXTERIOR, Point::new(60.0, 60.0)));
        assert!(world.doors_armed);
        assert!(!world.warp(99, Point::new(0.0, 0.0)));
    }
}
