//! Crossterm renderer
//!
//! Reads the app state and queues terminal commands for one frame. No game
//! logic lives here.

use std::io::{self, Write};

use crossterm::{
    QueueableCommand, cursor,
    style::{self, Color, Print},
    terminal,
};

use super::viewport::Viewport;
use crate::consts::{SCREEN_HEIGHT, SCREEN_WIDTH};
use crate::highscores::HighScores;
use crate::sim::{Enemy, GameState, Player, Rect, Rotation, Tint, player_hitbox};
use crate::ui::{App, GameOverReport, Menu, Screen};

const C_TITLE: Color = Color::Red;
const C_TEXT: Color = Color::White;
const C_SELECTED: Color = Color::Red;
const C_SCORE: Color = Color::Red;
const C_DEBUG: Color = Color::White;
const C_HITBOX: Color = Color::DarkRed;
const C_ENEMY_BOX: Color = Color::DarkGrey;
const C_DIM: Color = Color::DarkGrey;
const C_PLAYERS: [Color; 4] = [Color::Green, Color::Cyan, Color::Yellow, Color::Magenta];

/// Frame timing shown by the debug overlay
#[derive(Debug, Clone, Copy, Default)]
pub struct FrameStats {
    pub fps: f32,
    pub frame_ms: f32,
    pub max_fps: u32,
}

pub struct TerminalRenderer {
    pub viewport: Viewport,
}

impl TerminalRenderer {
    pub fn new(cols: u16, rows: u16) -> Self {
        Self {
            viewport: Viewport::new(cols, rows),
        }
    }

    pub fn resize(&mut self, cols: u16, rows: u16) {
        self.viewport.resize(cols, rows);
    }

    /// Render one complete frame
    pub fn render<W: Write>(&self, out: &mut W, app: &App, stats: FrameStats) -> io::Result<()> {
        out.queue(terminal::Clear(terminal::ClearType::All))?;

        match app.screen {
            Screen::MainMenu | Screen::Options => {
                for enemy in &app.backdrop.enemies {
                    self.draw_enemy(out, enemy, false)?;
                }
                let (menu, layout) = match app.screen {
                    Screen::MainMenu => (&app.main_menu, MenuLayout::MAIN),
                    _ => (&app.options_menu, MenuLayout::OPTIONS),
                };
                self.draw_menu(out, menu, layout)?;
                if app.screen == Screen::MainMenu {
                    let best = format!("Best: {}", app.highscores.top_score());
                    self.put_centered(out, self.viewport.row_at(100.0), &best, C_DIM)?;
                }
            }
            Screen::Running => {
                if let Some(game) = &app.game {
                    self.draw_game(out, game, app.settings.show_hitboxes)?;
                    self.draw_fallen(out, &app.fallen)?;
                    if app.settings.show_debug {
                        self.draw_debug(out, game, stats)?;
                    }
                }
            }
            Screen::GameOver => {
                if let Some(game) = &app.game {
                    self.draw_game(out, game, false)?;
                }
                if let Some(report) = &app.report {
                    self.draw_game_over(out, report, &app.highscores, app.game_over_ready())?;
                }
            }
        }

        out.queue(style::ResetColor)?;
        out.queue(cursor::MoveTo(0, self.viewport.rows.saturating_sub(1)))?;
        out.flush()
    }

    fn draw_game<W: Write>(&self, out: &mut W, game: &GameState, hitboxes: bool) -> io::Result<()> {
        for enemy in &game.enemies {
            self.draw_enemy(out, enemy, hitboxes)?;
        }
        for player in &game.players {
            self.draw_player(out, player, hitboxes)?;
        }

        let score = format!("Score:{}", game.score);
        let row = self.viewport.row_at(20.0);
        self.put_centered(out, row, &score, C_SCORE)
    }

    /// Hotseat players already hit, top left
    fn draw_fallen<W: Write>(&self, out: &mut W, fallen: &[usize]) -> io::Result<()> {
        if fallen.is_empty() {
            return Ok(());
        }
        let slots: Vec<String> = fallen.iter().map(|slot| format!("P{}", slot)).collect();
        self.put_text(out, 0, 0, &format!("Out: {}", slots.join(" ")), C_DIM)
    }

    fn draw_player<W: Write>(&self, out: &mut W, player: &Player, hitbox: bool) -> io::Result<()> {
        let color = C_PLAYERS[(player.slot.saturating_sub(1)) % C_PLAYERS.len()];
        self.fill(out, &player.rect(), '█', color)?;
        if hitbox {
            self.fill(out, &player_hitbox(player), '▒', C_HITBOX)?;
        }
        Ok(())
    }

    fn draw_enemy<W: Write>(&self, out: &mut W, enemy: &Enemy, hitbox: bool) -> io::Result<()> {
        if hitbox {
            self.fill(out, &enemy.rect(), '░', C_ENEMY_BOX)?;
        }
        let color = match enemy.tint {
            Tint::White => C_TEXT,
            Tint::Red => Color::Red,
        };
        let cells = self.viewport.rect_cells(&enemy.rect());
        let text: String = match enemy.rotation {
            Rotation::Half | Rotation::ThreeQuarter => enemy.label.text.chars().rev().collect(),
            _ => enemy.label.text.clone(),
        };
        if enemy.rotation.swaps_axes() {
            self.put_vertical(out, cells.col0, cells.row0, &text, color)
        } else {
            self.put_text(out, cells.col0, cells.row0, &text, color)
        }
    }

    fn draw_debug<W: Write>(
        &self,
        out: &mut W,
        game: &GameState,
        stats: FrameStats,
    ) -> io::Result<()> {
        let (col, _) = self.viewport.to_cell(glam::Vec2::new(SCREEN_WIDTH - 100.0, 0.0));
        let lines = [
            (10.0, format!("FPS:{}/{}", stats.fps as u32, stats.max_fps)),
            (25.0, format!("FT: {:.1}", stats.frame_ms)),
            (40.0, format!("Numbers:{}", game.enemies.len())),
            (60.0, format!("Time: {:.1}s", game.elapsed_ms / 1000.0)),
            (80.0, format!("Seed: {}", game.seed)),
        ];
        for (y, line) in lines {
            let row = self.viewport.row_at(y) as i32;
            // Pull long lines (the seed) left so they stay on screen
            let fit = self.viewport.cols as i32 - line.chars().count() as i32;
            self.put_text(out, col.min(fit).max(0), row, &line, C_DEBUG)?;
        }
        Ok(())
    }

    fn draw_menu<W: Write>(&self, out: &mut W, menu: &Menu, layout: MenuLayout) -> io::Result<()> {
        self.put_centered(out, self.viewport.row_at(50.0), &menu.title, C_TITLE)?;
        for (i, item) in menu.items.iter().enumerate() {
            let y = layout.first_item_y + i as f32 * layout.spacing;
            let row = self.viewport.row_at(y);
            if i == menu.selected {
                self.put_centered(out, row, &format!("> {} <", item), C_SELECTED)?;
            } else {
                self.put_centered(out, row, item, C_TEXT)?;
            }
        }
        Ok(())
    }

    fn draw_game_over<W: Write>(
        &self,
        out: &mut W,
        report: &GameOverReport,
        highscores: &HighScores,
        ready: bool,
    ) -> io::Result<()> {
        let view = &self.viewport;
        self.put_centered(out, view.row_at(20.0), "GAME OVER", Color::Red)?;
        if ready {
            self.put_centered(out, view.row_at(60.0), "Press Enter to play again.", C_TEXT)?;
        }
        self.put_centered(out, view.row_at(110.0), &format!("Score:{}", report.score), C_TEXT)?;
        self.put_centered(out, view.row_at(150.0), "HIGHSCORES", C_TEXT)?;

        for (i, entry) in highscores.entries().iter().enumerate() {
            let y = 180.0 + i as f32 * 30.0;
            if y >= SCREEN_HEIGHT {
                break;
            }
            let row = view.row_at(y);
            let text = entry.to_string();
            self.put_centered(out, row, &text, C_TEXT)?;
            if report.rank == Some(i + 1) {
                let marker = "YOU -> ";
                let col = view.centered_col(text.len()) as i32 - marker.len() as i32;
                self.put_text(out, col, row as i32, marker, C_TEXT)?;
            }
        }
        Ok(())
    }

    /// Fill every cell a rectangle covers
    fn fill<W: Write>(&self, out: &mut W, rect: &Rect, ch: char, color: Color) -> io::Result<()> {
        let cells = self.viewport.rect_cells(rect);
        let run: String = std::iter::repeat_n(ch, (cells.col1 - cells.col0 + 1) as usize).collect();
        for row in cells.row0..=cells.row1 {
            self.put_text(out, cells.col0, row, &run, color)?;
        }
        Ok(())
    }

    fn put_centered<W: Write>(
        &self,
        out: &mut W,
        row: u16,
        text: &str,
        color: Color,
    ) -> io::Result<()> {
        let col = self.viewport.centered_col(text.chars().count());
        self.put_text(out, col as i32, row as i32, text, color)
    }

    /// Print a line of text, clipped to the grid
    fn put_text<W: Write>(
        &self,
        out: &mut W,
        col: i32,
        row: i32,
        text: &str,
        color: Color,
    ) -> io::Result<()> {
        if row < 0 || row >= self.viewport.rows as i32 {
            return Ok(());
        }
        let visible: String = text
            .chars()
            .enumerate()
            .filter(|(i, _)| self.viewport.contains_cell(col + *i as i32, row))
            .map(|(_, c)| c)
            .collect();
        if visible.is_empty() {
            return Ok(());
        }
        let start = col.max(0) as u16;
        out.queue(cursor::MoveTo(start, row as u16))?;
        out.queue(style::SetForegroundColor(color))?;
        out.queue(Print(visible))?;
        Ok(())
    }

    /// Print text top to bottom, one glyph per row
    fn put_vertical<W: Write>(
        &self,
        out: &mut W,
        col: i32,
        row: i32,
        text: &str,
        color: Color,
    ) -> io::Result<()> {
        for (i, ch) in text.chars().enumerate() {
            let row = row + i as i32;
            if self.viewport.contains_cell(col, row) {
                out.queue(cursor::MoveTo(col as u16, row as u16))?;
                out.queue(style::SetForegroundColor(color))?;
                out.queue(Print(ch))?;
            }
        }
        Ok(())
    }
}

/// Where menu entries sit, in game pixels
#[derive(Debug, Clone, Copy)]
struct MenuLayout {
    first_item_y: f32,
    spacing: f32,
}

impl MenuLayout {
    const MAIN: MenuLayout = MenuLayout {
        first_item_y: 180.0,
        spacing: 50.0,
    };
    const OPTIONS: MenuLayout = MenuLayout {
        first_item_y: 130.0,
        spacing: 35.0,
    };
}
