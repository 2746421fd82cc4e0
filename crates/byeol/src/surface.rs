//! Cell-grid render surface.
//!
//! Backs the engine's [`Surface`] seam with the terminal: discs are
//! rasterized into a character grid, one cell per terminal cell, and the
//! grid is turned into lines for a `Paragraph`.

use byeol_core::Rgb;
use byeol_engine::Surface;
use ratatui::{
    style::{Color, Style},
    text::{Line, Span},
};

/// Glyph ramp from faint to bright.
const DISC_CHARS: &[char] = &['·', '+', '*', '✦', '●'];

#[derive(Debug, Clone, Copy)]
struct Cell {
    ch: char,
    color: Rgb,
    intensity: f32,
}

impl Cell {
    const EMPTY: Self = Self {
        ch: ' ',
        color: Rgb::BLACK,
        intensity: 0.0,
    };
}

/// A width x height grid of glyph cells the field paints into.
#[derive(Debug)]
pub struct CellSurface {
    width: u16,
    height: u16,
    background: Rgb,
    cells: Vec<Cell>,
}

impl CellSurface {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            background: Rgb::BLACK,
            cells: vec![Cell::EMPTY; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Resync the grid to new dimensions, discarding the old contents.
    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
        self.cells.clear();
        self.cells
            .resize(width as usize * height as usize, Cell::EMPTY);
    }

    /// Build the grid into renderable lines.
    pub fn to_lines(&self) -> Vec<Line<'static>> {
        let background = Color::from(self.background);
        (0..self.height)
            .map(|y| {
                let spans: Vec<Span> = (0..self.width)
                    .map(|x| {
                        let cell = self.cells[self.index(x, y)];
                        if cell.intensity > 0.0 {
                            Span::styled(
                                cell.ch.to_string(),
                                Style::new().fg(cell.color.into()).bg(background),
                            )
                        } else {
                            Span::styled(" ", Style::new().bg(background))
                        }
                    })
                    .collect();
                Line::from(spans)
            })
            .collect()
    }

    fn index(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }
}

impl Surface for CellSurface {
    fn clear(&mut self, color: Rgb) {
        self.background = color;
        self.cells.fill(Cell::EMPTY);
    }

    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb, alpha: f32, glow: f32) {
        if self.width == 0 || self.height == 0 || radius <= 0.0 || alpha <= 0.0 {
            return;
        }

        let reach = radius + glow * 0.5;
        // Terminal cells are roughly twice as tall as wide, so the
        // vertical extent is halved.
        let x_min = (x - reach).floor().max(0.0) as i32;
        let x_max = (x + reach).ceil().min(self.width as f32 - 1.0) as i32;
        let y_min = (y - reach / 2.0).floor().max(0.0) as i32;
        let y_max = (y + reach / 2.0).ceil().min(self.height as f32 - 1.0) as i32;
        if x_max < x_min || y_max < y_min || x + reach < 0.0 || y + reach / 2.0 < 0.0 {
            return;
        }

        for cy in y_min..=y_max {
            for cx in x_min..=x_max {
                let dx = cx as f32 + 0.5 - x;
                let dy = (cy as f32 + 0.5 - y) * 2.0; // Adjust for terminal aspect ratio
                let distance = (dx * dx + dy * dy).sqrt();

                let falloff = if distance <= radius {
                    1.0
                } else if glow > 0.0 && distance <= reach {
                    1.0 - (distance - radius) / (glow * 0.5)
                } else {
                    continue;
                };

                let intensity = alpha * falloff;
                let cell = &mut self.cells[(cy as usize) * self.width as usize + cx as usize];
                if intensity > cell.intensity {
                    *cell = Cell {
                        ch: intensity_char(intensity),
                        color: color.scaled(0.35 + 0.65 * intensity),
                        intensity,
                    };
                }
            }
        }
    }
}

/// Pick a glyph from the ramp by intensity.
fn intensity_char(intensity: f32) -> char {
    let ch = if intensity > 0.8 {
        4
    } else if intensity > 0.55 {
        3
    } else if intensity > 0.35 {
        2
    } else if intensity > 0.15 {
        1
    } else {
        0
    };
    DISC_CHARS[ch]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clear_resets_cells() {
        let mut surface = CellSurface::new(10, 4);
        surface.fill_circle(5.0, 2.0, 2.0, Rgb::WHITE, 0.8, 0.0);
        surface.clear(Rgb::BLACK);

        for line in surface.to_lines() {
            for span in line.spans {
                assert_eq!(span.content.as_ref(), " ");
            }
        }
    }

    #[test]
    fn test_disc_lands_at_center() {
        let mut surface = CellSurface::new(20, 10);
        surface.clear(Rgb::BLACK);
        surface.fill_circle(10.0, 5.0, 1.5, Rgb::WHITE, 0.8, 0.0);

        let cell = surface.cells[surface.index(10, 5)];
        assert!(cell.intensity > 0.0);
        assert_ne!(cell.ch, ' ');
    }

    #[test]
    fn test_off_surface_disc_is_ignored() {
        let mut surface = CellSurface::new(10, 4);
        surface.clear(Rgb::BLACK);
        surface.fill_circle(-50.0, -50.0, 2.0, Rgb::WHITE, 0.8, 0.0);
        surface.fill_circle(500.0, 500.0, 2.0, Rgb::WHITE, 0.8, 4.0);

        assert!(surface.cells.iter().all(|c| c.intensity == 0.0));
    }

    #[test]
    fn test_brighter_disc_wins_overlap() {
        let mut surface = CellSurface::new(20, 10);
        surface.clear(Rgb::BLACK);
        surface.fill_circle(10.0, 5.0, 1.5, Rgb::new(255, 0, 0), 0.3, 0.0);
        surface.fill_circle(10.0, 5.0, 1.5, Rgb::new(0, 0, 255), 0.7, 0.0);

        let cell = surface.cells[surface.index(10, 5)];
        assert!((cell.intensity - 0.7).abs() < 1e-5);
        assert_eq!(cell.color.r, 0);
    }

    #[test]
    fn test_resize_reallocates() {
        let mut surface = CellSurface::new(10, 4);
        surface.resize(5, 2);
        assert_eq!(surface.to_lines().len(), 2);
        assert_eq!(surface.to_lines()[0].spans.len(), 5);
    }

    #[test]
    fn test_glow_extends_past_radius() {
        let mut surface = CellSurface::new(40, 10);
        surface.clear(Rgb::BLACK);
        surface.fill_circle(20.0, 5.0, 1.0, Rgb::WHITE, 0.8, 6.0);

        // A cell outside the hard radius but inside the glow reach.
        let cell = surface.cells[surface.index(23, 5)];
        assert!(cell.intensity > 0.0);
        assert!(cell.intensity < 0.8);
    }
}
