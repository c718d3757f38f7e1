//! Room catalog: the four authored rooms and their contents.
//!
//! Geometry (doors, walls, hazards, spawn) never changes after
//! [`build_catalog`]. Items are removed when collected and enemies lose hit
//! points, but an enemy is never removed from its room: at zero hit points it
//! is tagged [`EnemyStatus::Disabled`] and skipped by AI and rendering.
//!
//! Door destinations are authored per door, not derived from the door on the
//! other side, so a door and its "return" door need not line up.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::config::GameConfig;
use crate::constants::background::SKYLINE_BUILDINGS;
use crate::geometry::{Point, Rect};

/// Room indices in catalog order.
pub mod ids {
    pub const PRIPYAT_STREET: usize = 0;
    pub const PRIPYAT_PARK: usize = 1;
    pub const REACTOR_EXTERIOR: usize = 2;
    pub const REACTOR_CORE: usize = 3;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Lock {
    None,
    /// Passable only while holding a key; crossing consumes one.
    Key,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Door {
    pub rect: Rect,
    pub target: usize,
    pub dest: Point,
    pub lock: Lock,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wall {
    pub rect: Rect,
    pub color: Rgba,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hazard {
    pub rect: Rect,
    /// Hit points drained per tick of overlap.
    pub damage: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ItemKind {
    Medkit,
    Key,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub rect: Rect,
    pub kind: ItemKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyStatus {
    Alive,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Enemy {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub speed: f32,
    /// Damage dealt to the player per tick of contact.
    pub damage: f32,
    pub hp: f32,
    pub hp_max: f32,
    pub color: Rgba,
    pub status: EnemyStatus,
}

impl Enemy {
    pub fn new(x: f32, y: f32, size: f32, speed: f32, damage: f32, hp: f32, color: Rgba) -> Self {
        Self {
            x,
            y,
            size,
            speed,
            damage,
            hp,
            hp_max: hp,
            color,
            status: EnemyStatus::Alive,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.x, self.y, self.size)
    }

    pub fn is_alive(&self) -> bool {
        self.status == EnemyStatus::Alive
    }

    /// Fraction of health left, for the health bar.
    pub fn hp_fraction(&self) -> f32 {
        if self.hp_max <= 0.0 {
            0.0
        } else {
            (self.hp / self.hp_max).clamp(0.0, 1.0)
        }
    }

    /// Subtract hit points. Returns `true` if this hit disabled the enemy.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        if !self.is_alive() {
            return false;
        }
        self.hp -= amount;
        if self.hp <= 0.0 {
            self.hp = 0.0;
            self.status = EnemyStatus::Disabled;
            return true;
        }
        false
    }
}

/// One skyline building: width and height in canvas units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Building {
    pub w: f32,
    pub h: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Background {
    /// Sky gradient with a row of drifting building silhouettes.
    Skyline {
        sky_top: Rgba,
        sky_bottom: Rgba,
        building_color: Rgba,
        buildings: Vec<Building>,
    },
    Gradient {
        from: Rgba,
        to: Rgba,
        vertical: bool,
    },
    /// Solid fill with an inset solid panel.
    Framed {
        outer: Rgba,
        inner: Rgba,
        margin: f32,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Room {
    pub name: String,
    pub background: Background,
    pub doors: Vec<Door>,
    pub walls: Vec<Wall>,
    pub hazards: Vec<Hazard>,
    pub items: Vec<Item>,
    pub enemies: Vec<Enemy>,
    pub spawn: Point,
}

fn door(x: f32, y: f32, w: f32, h: f32, target: usize, dest: Point, lock: Lock) -> Door {
    Door {
        rect: Rect::new(x, y, w, h),
        target,
        dest,
        lock,
    }
}

fn wall(x: f32, y: f32, w: f32, h: f32, color: u32) -> Wall {
    Wall {
        rect: Rect::new(x, y, w, h),
        color: Rgba::hex(color),
    }
}

fn hazard(x: f32, y: f32, w: f32, h: f32, damage: f32) -> Hazard {
    Hazard {
        rect: Rect::new(x, y, w, h),
        damage,
    }
}

fn item(x: f32, y: f32, size: f32, kind: ItemKind) -> Item {
    Item {
        rect: Rect::square(x, y, size),
        kind,
    }
}

/// Random building sizes, fixed per seed so the skyline does not flicker.
fn skyline(seed: u64) -> Vec<Building> {
    let mut rng = StdRng::seed_from_u64(seed);
    (0..SKYLINE_BUILDINGS)
        .map(|_| Building {
            w: rng.gen_range(20.0..40.0),
            h: rng.gen_range(60.0..140.0),
        })
        .collect()
}

/// Build the four rooms for the configured canvas.
pub fn build_catalog(config: &GameConfig) -> Vec<Room> {
    let w = config.canvas_width;
    let h = config.canvas_height;

    let street = Room {
        name: "Pripyat Street".to_string(),
        background: Background::Skyline {
            sky_top: Rgba::hex(0x06131b),
            sky_bottom: Rgba::hex(0x1b2631),
            building_color: Rgba::hex(0x0a0a0a),
            buildings: skyline(config.skyline_seed),
        },
        doors: vec![door(
            w - 50.0,
            h / 2.0 - 30.0,
            40.0,
            60.0,
            ids::PRIPYAT_PARK,
            Point::new(30.0, h / 2.0),
            Lock::None,
        )],
        walls: vec![wall(230.0, 260.0, 140.0, 24.0, 0x444444)],
        hazards: vec![hazard(120.0, 120.0, 80.0, 80.0, 0.05)],
        items: vec![item(300.0, 320.0, 20.0, ItemKind::Medkit)],
        enemies: vec![Enemy::new(420.0, 100.0, 28.0, 1.5, 10.0, 60.0, Rgba::RED)],
        spawn: Point::new(50.0, h / 2.0),
    };

    let park = Room {
        name: "Pripyat Park".to_string(),
        background: Background::Gradient {
            from: Rgba::hex(0x152425),
            to: Rgba::hex(0x204040),
            vertical: true,
        },
        doors: vec![
            door(
                -10.0,
                h / 2.0 - 30.0,
                40.0,
                60.0,
                ids::PRIPYAT_STREET,
                Point::new(w - 70.0, h / 2.0),
                Lock::None,
            ),
            door(
                w - 50.0,
                40.0,
                40.0,
                60.0,
                ids::REACTOR_EXTERIOR,
                Point::new(50.0, 50.0),
                Lock::Key,
            ),
        ],
        walls: vec![wall(200.0, 180.0, 100.0, 20.0, 0x555555)],
        hazards: vec![],
        items: vec![item(260.0, 80.0, 18.0, ItemKind::Key)],
        enemies: vec![
            Enemy::new(380.0, 260.0, 26.0, 1.7, 12.0, 70.0, Rgba::RED),
            Enemy::new(140.0, 60.0, 26.0, 1.3, 12.0, 70.0, Rgba::RED),
        ],
        spawn: Point::new(70.0, h / 2.0),
    };

    let exterior = Room {
        name: "Reactor Exterior".to_string(),
        background: Background::Gradient {
            from: Rgba::hex(0x461010),
            to: Rgba::hex(0x220000),
            vertical: true,
        },
        doors: vec![
            door(
                -10.0,
                40.0,
                40.0,
                60.0,
                ids::PRIPYAT_PARK,
                Point::new(w - 70.0, 40.0),
                Lock::None,
            ),
            door(
                w / 2.0 - 20.0,
                h - 50.0,
                40.0,
                50.0,
                ids::REACTOR_CORE,
                Point::new(w / 2.0 - 12.0, 40.0),
                Lock::None,
            ),
        ],
        walls: vec![wall(260.0, 0.0, 80.0, 140.0, 0x333333)],
        hazards: vec![hazard(150.0, 210.0, 160.0, 100.0, 0.08)],
        items: vec![],
        enemies: vec![Enemy::new(100.0, 260.0, 32.0, 2.0, 14.0, 90.0, Rgba::CRIMSON)],
        spawn: Point::new(60.0, 60.0),
    };

    let core = Room {
        name: "Reactor Core".to_string(),
        background: Background::Framed {
            outer: Rgba::hex(0x320303),
            inner: Rgba::hex(0x460000),
            margin: 20.0,
        },
        doors: vec![door(
            w / 2.0 - 20.0,
            -10.0,
            40.0,
            40.0,
            ids::REACTOR_EXTERIOR,
            Point::new(w / 2.0 - 20.0, h - 60.0),
            Lock::None,
        )],
        walls: vec![
            wall(200.0, 0.0, 20.0, 200.0, 0x555555),
            wall(380.0, 200.0, 20.0, 200.0, 0x555555),
        ],
        // whole room is irradiated
        hazards: vec![hazard(0.0, 0.0, w, h, 0.12)],
        items: vec![item(w / 2.0 - 10.0, h / 2.0 - 10.0, 20.0, ItemKind::Medkit)],
        enemies: vec![Enemy::new(270.0, 180.0, 34.0, 2.2, 18.0, 140.0, Rgba::CRIMSON)],
        spawn: Point::new(w / 2.0, h - 80.0),
    };

    vec![street, park, exterior, core]
}

/// Check authored data before the game starts.
///
/// Rejects door targets outside the catalog, zero-sized rectangles, and spawn
/// points or door destinations where the player would not fit on the canvas.
pub fn validate_catalog(rooms: &[Room], config: &GameConfig) -> Result<(), CatalogError> {
    if rooms.is_empty() {
        return Err(CatalogError::Empty);
    }
    let (w, h, size) = (config.canvas_width, config.canvas_height, config.player_size);
    let fits = |p: Point| Rect::square(p.x, p.y, size).inside(w, h);

    for (room_index, room) in rooms.iter().enumerate() {
        if !fits(room.spawn) {
            return Err(CatalogError::OutsideCanvas {
                room: room_index,
                what: "spawn",
                x: room.spawn.x,
                y: room.spawn.y,
            });
        }

        for (i, d) in room.doors.iter().enumerate() {
            if d.target >= rooms.len() {
                return Err(CatalogError::DanglingDoor {
                    room: room_index,
                    door: i,
                    target: d.target,
                });
            }
            if !fits(d.dest) {
                return Err(CatalogError::OutsideCanvas {
                    room: room_index,
                    what: "door destination",
                    x: d.dest.x,
                    y: d.dest.y,
                });
            }
        }

        let rects = room
            .doors
            .iter()
            .map(|d| ("door", d.rect))
            .chain(room.walls.iter().map(|x| ("wall", x.rect)))
            .chain(room.hazards.iter().map(|x| ("hazard", x.rect)))
            .chain(room.items.iter().map(|x| ("item", x.rect)))
            .chain(room.enemies.iter().map(|e| ("enemy", e.rect())));
        for (what, r) in rects {
            if r.w <= 0.0 || r.h <= 0.0 {
                return Err(CatalogError::DegenerateRect {
                    room: room_index,
                    what,
                    w: r.w,
                    h: r.h,
                });
            }
        }
    }
    Ok(())
}

/// Authoring errors in the room catalog
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogError {
    Empty,
    DanglingDoor {
        room: usize,
        door: usize,
        target: usize,
    },
    DegenerateRect {
        room: usize,
        what: &'static str,
        w: f32,
        h: f32,
    },
    OutsideCanvas {
        room: usize,
        what: &'static str,
        x: f32,
        y: f32,
    },
}

impl std::fmt::Display for CatalogError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CatalogError::Empty => write!(f, "Room catalog is empty"),
            CatalogError::DanglingDoor { room, door, target } => write!(
                f,
                "Room #{} door #{} targets non-existent room {}",
                room, door, target
            ),
            CatalogError::DegenerateRect { room, what, w, h } => write!(
                f,
                "Room #{} has a {} with non-positive size {}×{}",
                room, what, w, h
            ),
            CatalogError::OutsideCanvas { room, what, x, y } => write!(
                f,
                "Room #{} {} at ({}, {}) does not fit the canvas",
                room, what, x, y
            ),
        }
    }
}

impl std::error::Error for CatalogError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> (Vec<Room>, GameConfig) {
        let config = GameConfig::default();
        (build_catalog(&config), config)
    }

    #[test]
    fn shipped_catalog_is_valid() {
        let (rooms, config) = catalog();
        assert_eq!(rooms.len(), 4);
        assert_eq!(validate_catalog(&rooms, &config), Ok(()));
    }

    #[test]
    fn exactly_one_key_locked_door() {
        let (rooms, _) = catalog();
        let locked: Vec<_> = rooms
            .iter()
            .flat_map(|r| r.doors.iter())
            .filter(|d| d.lock == Lock::Key)
            .collect();
        assert_eq!(locked.len(), 1);
        assert_eq!(locked[0].target, ids::REACTOR_EXTERIOR);
    }

    #[test]
    fn reactor_core_is_fully_irradiated() {
        let (rooms, config) = catalog();
        let core = &rooms[ids::REACTOR_CORE];
        assert_eq!(
            core.hazards[0].rect,
            Rect::new(0.0, 0.0, config.canvas_width, config.canvas_height)
        );
        assert!((core.hazards[0].damage - 0.12).abs() < f32::EPSILON);
    }

    #[test]
    fn dangling_door_rejected() {
        let (mut rooms, config) = catalog();
        rooms[0].doors[0].target = 9;
        assert_eq!(
            validate_catalog(&rooms, &config),
            Err(CatalogError::DanglingDoor {
                room: 0,
                door: 0,
                target: 9
            })
        );
    }

    #[test]
    fn off_canvas_destination_rejected() {
        let (mut rooms, config) = catalog();
        rooms[1].doors[1].dest = Point::new(config.canvas_width, 10.0);
        assert!(matches!(
            validate_catalog(&rooms, &config),
            Err(CatalogError::OutsideCanvas { room: 1, .. })
        ));
    }

    #[test]
    fn zero_sized_wall_rejected() {
        let (mut rooms, config) = catalog();
        rooms[2].walls[0].rect.w = 0.0;
        let err = validate_catalog(&rooms, &config).unwrap_err();
        assert!(matches!(err, CatalogError::DegenerateRect { what: "wall", .. }));
        assert!(err.to_string().contains("wall"));
    }

    #[test]
    fn empty_catalog_rejected() {
        assert_eq!(
            validate_catalog(&[], &GameConfig::default()),
            Err(CatalogError::Empty)
        );
    }

    #[test]
    fn skyline_is_deterministic_per_seed() {
        assert_eq!(skyline(7), skyline(7));
        assert_ne!(skyline(7), skyline(8));
        for b in skyline(7) {
            assert!((20.0..40.0).contains(&b.w));
            assert!((60.0..140.0).contains(&b.h));
        }
    }

    #[test]
    fn enemy_disable_floors_hp() {
        let mut e = Enemy::new(0.0, 0.0, 10.0, 1.0, 5.0, 30.0, Rgba::RED);
        assert!(!e.take_damage(20.0));
        assert!(e.take_damage(20.0));
        assert_eq!(e.hp, 0.0);
        assert_eq!(e.status, EnemyStatus::Disabled);
        assert!(!e.take_damage(20.0));
        assert_eq!(e.hp_fraction(), 0.0);
    }
}
