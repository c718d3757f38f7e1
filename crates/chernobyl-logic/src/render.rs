//! Draw-list renderer.
//!
//! [`build_frame`] walks the world read-only and returns the shapes to paint,
//! back to front. Front-ends only have to know how to fill a rectangle, fill a
//! two-stop gradient and draw a line of text.
//!
//! Order: background → hazards → doors → walls → items → enemies (with health
//! bars) → player → HUD → fade overlay → game-over overlay.

use serde::{Deserialize, Serialize};

use crate::color::Rgba;
use crate::geometry::Rect;
use crate::rooms::{Background, ItemKind, Lock, Room};
use crate::world::World;

const HAZARD_TINT: Rgba = Rgba::rgba(0, 255, 0, 0.1);
const HEALTH_BAR_HEIGHT: f32 = 4.0;
const HEALTH_BAR_GAP: f32 = 6.0;
const HUD_FONT_SIZE: f32 = 16.0;
const GAME_OVER_FONT_SIZE: f32 = 48.0;
const GAME_OVER_SHADE: f32 = 0.8;
/// Skyline buildings are spaced this far apart before drift.
const SKYLINE_SPACING: f32 = 60.0;
/// Parallax factor applied to the background offset.
const SKYLINE_PARALLAX: f32 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextAlign {
    Left,
    Center,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    FillRect {
        rect: Rect,
        color: Rgba,
    },
    /// Two-stop linear gradient, top→bottom when `vertical`, else left→right.
    Gradient {
        rect: Rect,
        from: Rgba,
        to: Rgba,
        vertical: bool,
    },
    /// `(x, y)` is the baseline anchor: left end or center depending on `align`.
    Text {
        text: String,
        x: f32,
        y: f32,
        size: f32,
        color: Rgba,
        align: TextAlign,
    },
}

fn fill(out: &mut Vec<DrawCommand>, rect: Rect, color: Rgba) {
    out.push(DrawCommand::FillRect { rect, color });
}

fn text(
    out: &mut Vec<DrawCommand>,
    s: String,
    x: f32,
    y: f32,
    size: f32,
    color: Rgba,
    align: TextAlign,
) {
    out.push(DrawCommand::Text {
        text: s,
        x,
        y,
        size,
        color,
        align,
    });
}

/// Build the full draw list for the current frame.
pub fn build_frame(world: &World) -> Vec<DrawCommand> {
    let (w, h) = (world.canvas_width, world.canvas_height);
    let screen = Rect::new(0.0, 0.0, w, h);
    let room = world.current_room();
    let mut out = Vec::new();

    draw_background(&mut out, room, world.background_offset, screen);
    draw_room_contents(&mut out, room);

    fill(&mut out, world.player.rect(), Rgba::LIME);

    draw_hud(&mut out, world);

    if world.transition.alpha > 0.0 {
        fill(&mut out, screen, Rgba::BLACK.with_alpha(world.transition.alpha));
    }

    if world.is_game_over() {
        fill(&mut out, screen, Rgba::BLACK.with_alpha(GAME_OVER_SHADE));
        text(
            &mut out,
            "GAME OVER".to_string(),
            w / 2.0,
            h / 2.0,
            GAME_OVER_FONT_SIZE,
            Rgba::RED,
            TextAlign::Center,
        );
    }

    out
}

fn draw_background(out: &mut Vec<DrawCommand>, room: &Room, offset: f32, screen: Rect) {
    match &room.background {
        Background::Skyline {
            sky_top,
            sky_bottom,
            building_color,
            buildings,
        } => {
            out.push(DrawCommand::Gradient {
                rect: screen,
                from: *sky_top,
                to: *sky_bottom,
                vertical: true,
            });
            // Buildings wrap around a strip one spacing wider than the screen.
            let span = screen.w + SKYLINE_SPACING;
            for (i, b) in buildings.iter().enumerate() {
                let x = (i as f32 * SKYLINE_SPACING - offset * SKYLINE_PARALLAX).rem_euclid(span)
                    - SKYLINE_SPACING / 2.0;
                fill(out, Rect::new(x, screen.h - b.h, b.w, b.h), *building_color);
            }
        }
        Background::Gradient { from, to, vertical } => out.push(DrawCommand::Gradient {
            rect: screen,
            from: *from,
            to: *to,
            vertical: *vertical,
        }),
        Background::Framed {
            outer,
            inner,
            margin,
        } => {
            fill(out, screen, *outer);
            fill(
                out,
                Rect::new(
                    *margin,
                    *margin,
                    screen.w - 2.0 * margin,
                    screen.h - 2.0 * margin,
                ),
                *inner,
            );
        }
    }
}

fn draw_room_contents(out: &mut Vec<DrawCommand>, room: &Room) {
    for hazard in &room.hazards {
        fill(out, hazard.rect, HAZARD_TINT);
    }

    for door in &room.doors {
        let color = match door.lock {
            Lock::Key => Rgba::PURPLE,
            Lock::None => Rgba::GOLD,
        };
        fill(out, door.rect, color);
    }

    for wall in &room.walls {
        fill(out, wall.rect, wall.color);
    }

    for item in &room.items {
        let color = match item.kind {
            ItemKind::Medkit => Rgba::LIME,
            ItemKind::Key => Rgba::YELLOW,
        };
        fill(out, item.rect, color);
    }

    for enemy in room.enemies.iter().filter(|e| e.is_alive()) {
        fill(out, enemy.rect(), enemy.color);
        let bar_y = enemy.y - HEALTH_BAR_GAP;
        fill(
            out,
            Rect::new(enemy.x, bar_y, enemy.size, HEALTH_BAR_HEIGHT),
            Rgba::BLACK,
        );
        fill(
            out,
            Rect::new(
                enemy.x,
                bar_y,
                enemy.size * enemy.hp_fraction(),
                HEALTH_BAR_HEIGHT,
            ),
            Rgba::RED,
        );
    }
}

fn draw_hud(out: &mut Vec<DrawCommand>, world: &World) {
    let hp = world.player.hp.max(0.0).round() as i64;
    let lines = [
        world.current_room().name.clone(),
        format!("HP: {}", hp),
        format!("Keys: {}", world.player.keys),
    ];
    for (i, line) in lines.into_iter().enumerate() {
        text(
            out,
            line,
            10.0,
            20.0 * (i as f32 + 1.0),
            HUD_FONT_SIZE,
            Rgba::HUD_TEXT,
            TextAlign::Left,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::rooms::{ids, EnemyStatus};
    use crate::world::Phase;

    fn world() -> World {
        World::new(&GameConfig::default()).expect("catalog valid")
    }

    fn texts(cmds: &[DrawCommand]) -> Vec<&str> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    fn rects_of(cmds: &[DrawCommand], color: Rgba) -> Vec<Rect> {
        cmds.iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color: c } if *c == color => Some(*rect),
                _ => None,
            })
            .collect()
    }

    fn is_screen_fill(cmd: &DrawCommand, w: &World) -> bool {
        matches!(cmd, DrawCommand::FillRect { rect, color }
            if *rect == Rect::new(0.0, 0.0, w.canvas_width, w.canvas_height) && *color == Rgba::BLACK.with_alpha(color.a) && color.a < 1.0)
    }

    #[test]
    fn hud_shows_room_hp_and_keys() {
        let mut w = world();
        w.player.hp = 57.6;
        w.player.keys = 2;
        let cmds = build_frame(&w);
        assert_eq!(texts(&cmds), vec!["Pripyat Street", "HP: 58", "Keys: 2"]);
    }

    #[test]
    fn enemy_has_two_layer_health_bar() {
        let mut w = world();
        w.rooms[ids::PRIPYAT_STREET].enemies[0].hp = 30.0;
        let cmds = build_frame(&w);
        let bars = rects_of(&cmds, Rgba::RED);
        // Body and foreground bar are both red; the bar is the 4-high one.
        let fg = bars
            .iter()
            .find(|r| r.h == HEALTH_BAR_HEIGHT)
            .expect("foreground bar");
        assert_eq!(*fg, Rect::new(420.0, 94.0, 14.0, 4.0));
        let bg = rects_of(&cmds, Rgba::BLACK);
        assert!(bg.contains(&Rect::new(420.0, 94.0, 28.0, 4.0)));
    }

    #[test]
    fn disabled_enemy_not_drawn() {
        let mut w = world();
        let e = &mut w.rooms[ids::PRIPYAT_STREET].enemies[0];
        e.hp = 0.0;
        e.status = EnemyStatus::Disabled;
        let cmds = build_frame(&w);
        assert!(rects_of(&cmds, Rgba::RED).is_empty());
        assert!(rects_of(&cmds, Rgba::BLACK).is_empty());
    }

    #[test]
    fn door_colors_follow_lock() {
        let mut w = world();
        w.player.room = ids::PRIPYAT_PARK;
        let cmds = build_frame(&w);
        assert_eq!(rects_of(&cmds, Rgba::GOLD).len(), 1);
        assert_eq!(rects_of(&cmds, Rgba::PURPLE).len(), 1);
    }

    #[test]
    fn draw_order_back_to_front() {
        let w = world();
        let cmds = build_frame(&w);
        assert!(matches!(cmds.first(), Some(DrawCommand::Gradient { .. })));
        let player = cmds
            .iter()
            .position(|c| matches!(c, DrawCommand::FillRect { rect, .. } if *rect == w.player.rect()))
            .expect("player drawn");
        let hazard = cmds
            .iter()
            .position(|c| matches!(c, DrawCommand::FillRect { color, .. } if *color == HAZARD_TINT))
            .expect("hazard drawn");
        let hud = cmds
            .iter()
            .position(|c| matches!(c, DrawCommand::Text { .. }))
            .expect("hud drawn");
        assert!(hazard < player);
        assert!(player < hud);
    }

    #[test]
    fn fade_overlay_only_while_fading() {
        let mut w = world();
        assert!(!build_frame(&w).iter().any(|c| is_screen_fill(c, &w)));
        w.transition.alpha = 0.4;
        let cmds = build_frame(&w);
        let last = cmds.last().expect("non-empty frame");
        assert!(is_screen_fill(last, &w));
    }

    #[test]
    fn game_over_overlay_only_when_terminal() {
        let mut w = world();
        assert!(!texts(&build_frame(&w)).contains(&"GAME OVER"));
        w.phase = Phase::GameOver;
        w.player.hp = 0.0;
        let cmds = build_frame(&w);
        let t = texts(&cmds);
        assert_eq!(t.last(), Some(&"GAME OVER"));
        assert!(t.contains(&"HP: 0"));
    }

    #[test]
    fn skyline_wraps_as_it_drifts() {
        let mut w = world();
        w.background_offset = 1.0e5;
        let cmds = build_frame(&w);
        let buildings = rects_of(&cmds, Rgba::hex(0x0a0a0a));
        assert_eq!(buildings.len(), crate::constants::background::SKYLINE_BUILDINGS);
        for b in buildings {
            assert!(b.x >= -SKYLINE_SPACING / 2.0 && b.x < w.canvas_width + SKYLINE_SPACING / 2.0);
        }
    }

    #[test]
    fn framed_background_for_reactor_core() {
        let mut w = world();
        w.player.room = ids::REACTOR_CORE;
        let cmds = build_frame(&w);
        assert_eq!(
            cmds[1],
            DrawCommand::FillRect {
                rect: Rect::new(20.0, 20.0, 560.0, 360.0),
                color: Rgba::hex(0x460000),
            }
        );
    }
}
