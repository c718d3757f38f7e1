//! Chernobyl Explorer Viewer - Bevy window around the pure game logic
//!
//! Each frame: sample the held arrow/WASD keys, advance the engine by the
//! elapsed time (fixed 60 Hz ticks), then repaint the engine's draw list as
//! sprites and text. Nothing here makes gameplay decisions.
//!
//! Usage:
//!   cargo run -p chernobyl-viewer
//!   cargo run -p chernobyl-viewer -- --config data/game_config.json

use bevy::prelude::*;
use bevy::sprite::Anchor;
use chernobyl_logic::color::Rgba;
use chernobyl_logic::geometry::Rect;
use chernobyl_logic::prelude::*;

/// Strips used to approximate a linear gradient.
const GRADIENT_BANDS: usize = 48;
/// Z spacing between consecutive draw commands.
const Z_STEP: f32 = 0.01;

fn main() {
    let args = ViewerArgs::from_args();
    let config = match &args.config_path {
        Some(path) => match GameConfig::load(path) {
            Ok(c) => c,
            Err(e) => {
                eprintln!("Failed to load config {}: {}", path, e);
                std::process::exit(1);
            }
        },
        None => GameConfig::default(),
    };
    let engine = match GameEngine::new(config) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Invalid room catalog: {}", e);
            std::process::exit(1);
        }
    };
    let (width, height) = (engine.config().canvas_width, engine.config().canvas_height);

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Chernobyl Explorer".to_string(),
                resolution: (width, height).into(),
                resizable: false,
                present_mode: bevy::window::PresentMode::AutoVsync,
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        .insert_resource(GameWrapper(engine))
        .add_systems(Startup, setup)
        .add_systems(Update, (sample_input, update_game, draw_frame).chain())
        .run();
}

struct ViewerArgs {
    config_path: Option<String>,
}

impl ViewerArgs {
    fn from_args() -> Self {
        let args: Vec<String> = std::env::args().collect();
        let mut config_path = None;
        let mut i = 1;
        while i < args.len() {
            match args[i].as_str() {
                "--config" | "-c" if i + 1 < args.len() => {
                    config_path = Some(args[i + 1].clone());
                    i += 2;
                }
                _ => i += 1,
            }
        }
        Self { config_path }
    }
}

#[derive(Resource)]
struct GameWrapper(GameEngine);

/// Marker for entities rebuilt from the draw list every frame.
#[derive(Component)]
struct FrameShape;

fn setup(mut commands: Commands, game: Res<GameWrapper>) {
    commands.spawn(Camera2d::default());

    let world = &game.0.world;
    info!(
        "Starting in {} with {} rooms, {}×{} canvas",
        world.current_room().name,
        world.rooms.len(),
        world.canvas_width,
        world.canvas_height
    );
}

fn sample_input(keyboard: Res<ButtonInput<KeyCode>>, mut game: ResMut<GameWrapper>) {
    let held = |a: KeyCode, b: KeyCode| keyboard.pressed(a) || keyboard.pressed(b);
    game.0.set_input(InputState {
        up: held(KeyCode::ArrowUp, KeyCode::KeyW),
        down: held(KeyCode::ArrowDown, KeyCode::KeyS),
        left: held(KeyCode::ArrowLeft, KeyCode::KeyA),
        right: held(KeyCode::ArrowRight, KeyCode::KeyD),
    });
}

fn update_game(time: Res<Time>, mut game: ResMut<GameWrapper>) {
    let events = game.0.update(time.delta_secs());
    let world = &game.0.world;
    for event in events {
        match event {
            GameEvent::RoomEntered { room } => {
                info!("Entered {}", world.rooms[room].name);
            }
            GameEvent::GameOver { tick } => {
                info!("Game over at tick {}", tick);
            }
            GameEvent::KeyUsed { keys_left } => {
                info!("Used a key, {} left", keys_left);
            }
            GameEvent::EnemyDisabled { room, enemy } => {
                info!("Mutant {} in {} is down", enemy, world.rooms[room].name);
            }
            other => debug!("{:?}", other),
        }
    }
}

fn draw_frame(
    mut commands: Commands,
    game: Res<GameWrapper>,
    old: Query<Entity, With<FrameShape>>,
) {
    for entity in &old {
        commands.entity(entity).despawn();
    }

    let canvas = Vec2::new(game.0.world.canvas_width, game.0.world.canvas_height);
    for (i, cmd) in game.0.frame().into_iter().enumerate() {
        let z = i as f32 * Z_STEP;
        match cmd {
            DrawCommand::FillRect { rect, color } => {
                spawn_rect(&mut commands, canvas, rect, color, z);
            }
            DrawCommand::Gradient {
                rect,
                from,
                to,
                vertical,
            } => {
                for band in 0..GRADIENT_BANDS {
                    let t0 = band as f32 / GRADIENT_BANDS as f32;
                    let t = (band as f32 + 0.5) / GRADIENT_BANDS as f32;
                    let part = if vertical {
                        let h = rect.h / GRADIENT_BANDS as f32;
                        Rect::new(rect.x, rect.y + rect.h * t0, rect.w, h)
                    } else {
                        let w = rect.w / GRADIENT_BANDS as f32;
                        Rect::new(rect.x + rect.w * t0, rect.y, w, rect.h)
                    };
                    spawn_rect(&mut commands, canvas, part, from.lerp(to, t), z);
                }
            }
            DrawCommand::Text {
                text,
                x,
                y,
                size,
                color,
                align,
            } => {
                let anchor = match align {
                    TextAlign::Left => Anchor::BottomLeft,
                    TextAlign::Center => Anchor::BottomCenter,
                };
                let pos = to_world(canvas, x, y);
                commands.spawn((
                    Text2d::new(text),
                    TextFont {
                        font_size: size,
                        ..default()
                    },
                    TextColor(to_color(color)),
                    anchor,
                    Transform::from_xyz(pos.x, pos.y, z),
                    FrameShape,
                ));
            }
        }
    }
}

fn spawn_rect(commands: &mut Commands, canvas: Vec2, rect: Rect, color: Rgba, z: f32) {
    if rect.w <= 0.0 || rect.h <= 0.0 {
        return;
    }
    let center = to_world(canvas, rect.x + rect.w / 2.0, rect.y + rect.h / 2.0);
    commands.spawn((
        Sprite::from_color(to_color(color), Vec2::new(rect.w, rect.h)),
        Transform::from_xyz(center.x, center.y, z),
        FrameShape,
    ));
}

/// Canvas space (origin top-left, y down) → Bevy world space (origin center, y up).
fn to_world(canvas: Vec2, x: f32, y: f32) -> Vec2 {
    Vec2::new(x - canvas.x / 2.0, canvas.y / 2.0 - y)
}

fn to_color(c: Rgba) -> Color {
    Color::srgba(c.r, c.g, c.b, c.a)
}
