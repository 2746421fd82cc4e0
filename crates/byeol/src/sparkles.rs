//! Terminal host for trail sparkles.
//!
//! Backs the engine's [`NodeHost`] seam: each sparkle becomes a single
//! overlay glyph painted over the frame buffer after the field, and is
//! dropped the moment the engine despawns it.

use std::collections::HashMap;

use byeol_engine::{NodeHost, NodeId, SparkleNode};
use ratatui::{buffer::Buffer, layout::Position};

/// Sparkle glyphs by size, small to large.
const SPARKLE_CHARS: &[char] = &['·', '✧', '✦', '✸'];

#[derive(Debug, Clone, Copy)]
struct Glyph {
    node: SparkleNode,
    dy: f32,
}

/// Materializes sparkles as overlay glyphs.
#[derive(Debug, Default)]
pub struct GlyphHost {
    next_id: u64,
    glyphs: HashMap<NodeId, Glyph>,
}

impl GlyphHost {
    /// Paint every live glyph over the frame buffer.
    pub fn render(&self, buf: &mut Buffer) {
        for glyph in self.glyphs.values() {
            let x = glyph.node.x.round();
            let y = (glyph.node.y + glyph.dy).round();
            if x < 0.0 || y < 0.0 {
                continue;
            }

            let position = Position::new(x as u16, y as u16);
            if !buf.area.contains(position) {
                continue;
            }

            let ch = size_char(glyph.node.size);
            let color = glyph.node.color.scaled(0.4 + 0.6 * glyph.node.alpha);
            if let Some(cell) = buf.cell_mut(position) {
                cell.set_char(ch);
                cell.set_fg(color.into());
            }
        }
    }
}

impl NodeHost for GlyphHost {
    fn spawn(&mut self, node: SparkleNode) -> NodeId {
        let id = NodeId(self.next_id);
        self.next_id += 1;
        self.glyphs.insert(id, Glyph { node, dy: 0.0 });
        id
    }

    fn translate(&mut self, id: NodeId, dy: f32) {
        if let Some(glyph) = self.glyphs.get_mut(&id) {
            glyph.dy = dy;
        }
    }

    fn despawn(&mut self, id: NodeId) {
        self.glyphs.remove(&id);
    }
}

/// Pick a glyph by sparkle size; sizes run [1, 5).
fn size_char(size: f32) -> char {
    let idx = (((size - 1.0) / 4.0) * SPARKLE_CHARS.len() as f32) as usize;
    SPARKLE_CHARS[idx.min(SPARKLE_CHARS.len() - 1)]
}
