use crate::entities::{Appearance, Enemy, EnemyBullet, Player, PlayerBullet, PlayerMode};
use crate::sim::{GamePhase, SimulationState};
use rand::Rng;
use ratatui::{
    Frame,
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
};

/// Horizontal extent of the drawn playfield, in world units
pub const WORLD_HALF_WIDTH: f32 = 10.5;
/// Lowest drawn world height (player band bottom plus a margin)
pub const WORLD_FLOOR: f32 = -15.5;
/// Minimum drawn world height; grows with the grid
pub const WORLD_MIN_CEILING: f32 = 11.0;

/// Snapshot of everything drawn in one frame
pub struct RenderView<'a> {
    pub phase: GamePhase,
    pub player: &'a Player,
    pub player_bullet: Option<&'a PlayerBullet>,
    pub enemy_bullets: &'a [EnemyBullet],
    pub enemies: &'a [Enemy],
    pub score: u32,
    pub level: u32,
    pub frame_count: u64,
    pub area: Rect,
}

impl<'a> RenderView<'a> {
    pub fn new(state: &'a SimulationState, frame_count: u64, area: Rect) -> Self {
        Self {
            phase: state.phase,
            player: &state.player,
            player_bullet: state.player_bullet.as_ref(),
            enemy_bullets: &state.enemy_bullets,
            enemies: &state.formation.enemies,
            score: state.score,
            level: state.level.level,
            frame_count,
            area,
        }
    }

    fn alive_enemies(&self) -> usize {
        self.enemies.iter().filter(|e| e.is_alive()).count()
    }
}

/// Visible world rectangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Viewport {
    /// Fit the viewport around the player band and the highest living enemy
    pub fn fit(enemies: &[Enemy]) -> Self {
        let top = enemies
            .iter()
            .filter(|e| e.is_alive())
            .map(|e| e.y + 1.0)
            .fold(WORLD_MIN_CEILING, f32::max);
        Self {
            min_x: -WORLD_HALF_WIDTH,
            max_x: WORLD_HALF_WIDTH,
            min_y: WORLD_FLOOR,
            max_y: top,
        }
    }

    /// World position to a cell inside `area`; `None` when off screen
    pub fn project(&self, x: f32, y: f32, area: Rect) -> Option<(u16, u16)> {
        if area.width == 0 || area.height == 0 {
            return None;
        }
        if x < self.min_x || x > self.max_x || y < self.min_y || y > self.max_y {
            return None;
        }
        let fx = (x - self.min_x) / (self.max_x - self.min_x);
        let fy = (self.max_y - y) / (self.max_y - self.min_y);
        let col = (fx * (area.width - 1) as f32).round() as u16;
        let row = (fy * (area.height - 1) as f32).round() as u16;
        Some((area.x + col, area.y + row))
    }
}

fn enemy_glyph(appearance: Appearance) -> (&'static str, Color) {
    match appearance {
        Appearance::Cube => ("[#]", Color::Red),
        Appearance::Sphere => ("(o)", Color::LightBlue),
    }
}

/// Handles all rendering responsibilities for the game
#[derive(Debug, Default)]
pub struct GameRenderer;

impl GameRenderer {
    pub fn new() -> Self {
        Self
    }

    /// Draw the playfield, then any overlay the phase calls for
    pub fn render(&self, frame: &mut Frame, view: &RenderView) {
        self.render_game(frame, view);
        if let GamePhase::GameOver { final_score, cause } = view.phase {
            self.render_game_over(frame, view.area, final_score, cause.message());
        }
    }

    fn render_game(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;
        let block = Block::default()
            .borders(Borders::LEFT | Borders::RIGHT)
            .border_style(Style::default().fg(Color::DarkGray));
        let outer = Rect {
            x: area.x,
            y: area.y + 1,
            width: area.width,
            height: area.height.saturating_sub(2),
        };
        let game_area = block.inner(outer);
        frame.render_widget(block, outer);

        // Background stars; special mode gets a different sky
        if view.frame_count % 10 < 5 {
            let star_color = match view.player.mode {
                PlayerMode::Normal => Color::DarkGray,
                PlayerMode::Special => Color::Blue,
            };
            let mut rng = rand::rng();
            let star_text = (0..game_area.height)
                .map(|_| {
                    (0..game_area.width)
                        .map(|_| if rng.random_bool(0.02) { '.' } else { ' ' })
                        .collect::<String>()
                })
                .collect::<Vec<_>>()
                .join("\n");
            frame.render_widget(
                Paragraph::new(star_text).style(Style::default().fg(star_color)),
                game_area,
            );
        }

        let viewport = Viewport::fit(view.enemies);
        let buffer = frame.buffer_mut();
        let right_edge = game_area.x + game_area.width;

        for enemy in view.enemies.iter().filter(|e| e.is_alive()) {
            if let Some((col, row)) = viewport.project(enemy.x, enemy.y, game_area) {
                let (glyph, color) = enemy_glyph(enemy.appearance);
                let mut style = Style::default().fg(color).add_modifier(Modifier::BOLD);
                if enemy.is_descending() {
                    style = style.add_modifier(Modifier::ITALIC);
                }
                let col = col.saturating_sub(1).max(game_area.x);
                if col + 3 <= right_edge {
                    buffer.set_string(col, row, glyph, style);
                }
            }
        }

        if let Some((col, row)) = viewport.project(view.player.x, view.player.y, game_area) {
            let col = col.saturating_sub(1).max(game_area.x);
            if col + 3 <= right_edge {
                buffer.set_string(
                    col,
                    row,
                    "/^\\",
                    Style::default()
                        .fg(Color::Green)
                        .add_modifier(Modifier::BOLD),
                );
            }
        }

        if let Some(bullet) = view.player_bullet {
            if let Some((col, row)) = viewport.project(bullet.x, bullet.y, game_area) {
                buffer.set_string(col, row, "|", Style::default().fg(Color::Yellow));
            }
        }

        for bullet in view.enemy_bullets {
            if let Some((col, row)) = viewport.project(bullet.x, bullet.y, game_area) {
                buffer.set_string(col, row, "!", Style::default().fg(Color::Red));
            }
        }

        self.render_hud(frame, view);
    }

    fn render_hud(&self, frame: &mut Frame, view: &RenderView) {
        let area = view.area;

        let stats = Line::from(vec![
            Span::styled("Score: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.score),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Level: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.level),
                Style::default()
                    .fg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Enemies: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                format!("{}", view.alive_enemies()),
                Style::default()
                    .fg(Color::Red)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::styled("  Mode: ", Style::default().fg(Color::DarkGray)),
            Span::styled(
                view.player.mode.get_name(),
                Style::default()
                    .fg(Color::Magenta)
                    .add_modifier(Modifier::BOLD),
            ),
        ]);

        let stats_area = Rect {
            x: area.x + 1,
            y: area.y,
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(stats), stats_area);

        let controls = Line::from(vec![Span::styled(
            "[Arrows/WASD: Move] [Space: Fire] [!: Special mode] [Q: Quit]",
            Style::default().fg(Color::DarkGray),
        )]);
        let controls_area = Rect {
            x: area.x + 1,
            y: area.y + area.height.saturating_sub(1),
            width: area.width.saturating_sub(2),
            height: 1,
        };
        frame.render_widget(Paragraph::new(controls).centered(), controls_area);
    }

    /// Final score box over the (already reset) playfield
    fn render_game_over(&self, frame: &mut Frame, area: Rect, final_score: u32, message: &str) {
        let text = vec![
            Line::from(""),
            Line::from("GAME OVER!").centered().red().bold(),
            Line::from(message.to_string()).centered().white(),
            Line::from(""),
            Line::from(format!("Final Score: {final_score}"))
                .centered()
                .yellow()
                .bold(),
            Line::from(""),
            Line::from("Press Enter to play again").centered().white(),
            Line::from("Press Q to quit").centered().white(),
        ];

        let width = 40.min(area.width);
        let height = 10.min(area.height);
        let popup = Rect {
            x: area.x + (area.width - width) / 2,
            y: area.y + (area.height - height) / 2,
            width,
            height,
        };

        frame.render_widget(Clear, popup);
        frame.render_widget(
            Paragraph::new(text)
                .block(
                    Block::default()
                        .borders(Borders::ALL)
                        .border_style(Style::default().fg(Color::Red)),
                )
                .alignment(Alignment::Center),
            popup,
        );
    }
}
