//! BlockView: a delta-fed picture of the visible grid, drawn into a framebuffer.
//!
//! The view never reads engine state directly. It owns its own copy of the 10x20
//! visible cells and changes it only through [`BlockView::apply`], so whatever
//! it draws is exactly what the delta stream said. This module is pure (no I/O).

use crate::core::color_of;
use crate::fb::{CellStyle, FrameBuffer, Rgb};
use crate::types::{CellDelta, PieceKind, GRID_WIDTH, VISIBLE_HEIGHT};

const W: usize = GRID_WIDTH as usize;
const H: usize = VISIBLE_HEIGHT as usize;

const KEY_HELP: [&str; 5] = [
    "←/→  move",
    "↑    rotate",
    "z    rotate ccw",
    "spc  drop",
    "q    quit",
];

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Side panel contents that do not come from the delta stream
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Hud {
    pub landed: u32,
    pub game_over: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockView {
    /// blocks[row][col]; row 0 is the top visible row (grid y = 19)
    blocks: [[Option<PieceKind>; W]; H],
    /// Block width in terminal columns
    cell_w: u16,
}

impl Default for BlockView {
    fn default() -> Self {
        // 2x1 helps compensate for typical terminal glyph aspect ratio.
        Self::new(2)
    }
}

impl BlockView {
    pub fn new(cell_w: u16) -> Self {
        Self {
            blocks: [[None; W]; H],
            cell_w: cell_w.max(1),
        }
    }

    /// Apply deltas in order; hidden rows and off-grid coordinates are skipped.
    pub fn apply(&mut self, deltas: &[CellDelta]) {
        for d in deltas {
            if !d.pos.is_visible() {
                continue;
            }
            let row = H - 1 - d.pos.y as usize;
            self.blocks[row][d.pos.x as usize] = d.occupant;
        }
    }

    /// Block at grid coordinate (`x`, `y`); `None` when empty or not visible
    pub fn get(&self, x: i8, y: i8) -> Option<PieceKind> {
        if x < 0 || y < 0 || x as usize >= W || y as usize >= H {
            return None;
        }
        self.blocks[H - 1 - y as usize][x as usize]
    }

    pub fn occupied_count(&self) -> usize {
        self.blocks.iter().flatten().filter(|c| c.is_some()).count()
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(&self, hud: &Hud, viewport: Viewport, fb: &mut FrameBuffer) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(CellStyle::default().into_cell(' '));

        let board_w = W as u16 * self.cell_w;
        let board_h = H as u16;
        let frame_w = board_w + 2;
        let frame_h = board_h + 2;

        let start_x = viewport.width.saturating_sub(frame_w) / 2;
        let start_y = viewport.height.saturating_sub(frame_h) / 2;

        let bg = Rgb::new(30, 30, 40);
        let border = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let empty = CellStyle {
            dim: true,
            ..CellStyle::plain(Rgb::new(90, 90, 100), bg)
        };

        self.draw_border(fb, start_x, start_y, frame_w, frame_h, border);

        for (row, cells) in self.blocks.iter().enumerate() {
            let py = start_y + 1 + row as u16;
            for (col, cell) in cells.iter().enumerate() {
                let px = start_x + 1 + col as u16 * self.cell_w;
                match cell {
                    Some(kind) => {
                        let style = CellStyle {
                            bold: true,
                            ..CellStyle::plain(color_of(*kind), bg)
                        };
                        fb.fill_rect(px, py, self.cell_w, 1, '█', style);
                    }
                    None => {
                        fb.fill_rect(px, py, self.cell_w, 1, ' ', empty);
                        fb.put_char(px, py, '·', empty);
                    }
                }
            }
        }

        self.draw_side_panel(fb, hud, viewport, start_x + frame_w + 2, start_y);

        if hud.game_over {
            draw_overlay_text(fb, start_x, start_y, frame_w, frame_h, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, hud: &Hud, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(hud, viewport, &mut fb);
        fb
    }

    fn draw_border(&self, fb: &mut FrameBuffer, x: u16, y: u16, w: u16, h: u16, style: CellStyle) {
        if w < 2 || h < 2 {
            return;
        }

        fb.put_char(x, y, '┌', style);
        fb.put_char(x + w - 1, y, '┐', style);
        fb.put_char(x, y + h - 1, '└', style);
        fb.put_char(x + w - 1, y + h - 1, '┘', style);

        for dx in 1..w - 1 {
            fb.put_char(x + dx, y, '─', style);
            fb.put_char(x + dx, y + h - 1, '─', style);
        }
        for dy in 1..h - 1 {
            fb.put_char(x, y + dy, '│', style);
            fb.put_char(x + w - 1, y + dy, '│', style);
        }
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, hud: &Hud, viewport: Viewport, x: u16, y: u16) {
        if x >= viewport.width || viewport.width - x < 12 {
            return;
        }

        let label = CellStyle {
            bold: true,
            ..CellStyle::default()
        };
        let value = CellStyle::plain(Rgb::new(200, 200, 200), Rgb::new(0, 0, 0));
        let help = CellStyle { dim: true, ..value };

        let mut y = y;
        fb.put_str(x, y, "LANDED", label);
        y = y.saturating_add(1);
        fb.put_u32(x, y, hud.landed, value);
        y = y.saturating_add(2);

        fb.put_str(x, y, "KEYS", label);
        y = y.saturating_add(1);
        for line in KEY_HELP {
            if y >= viewport.height {
                break;
            }
            fb.put_str(x, y, line, help);
            y = y.saturating_add(1);
        }
    }
}

fn draw_overlay_text(
    fb: &mut FrameBuffer,
    start_x: u16,
    start_y: u16,
    frame_w: u16,
    frame_h: u16,
    text: &str,
) {
    let mid_y = start_y.saturating_add(frame_h / 2);
    let text_w = text.chars().count() as u16;
    let x = start_x.saturating_add(frame_w.saturating_sub(text_w) / 2);
    let style = CellStyle {
        bold: true,
        ..CellStyle::plain(Rgb::new(255, 255, 255), Rgb::new(0, 0, 0))
    };
    fb.put_str(x, mid_y, text, style);
}
