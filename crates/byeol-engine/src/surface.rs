//! Render seams the engines draw through.
//!
//! The engines never touch a concrete render target. The field paints
//! through [`Surface`]; the trail engine materializes and destroys
//! lightweight visual tokens through [`NodeHost`]. The byeol binary backs
//! these with the terminal cell grid; tests back them with recorders.

use byeol_core::Rgb;

/// Minimal 2D painting contract for the ambient field.
pub trait Surface {
    /// Fill the whole surface with `color`.
    fn clear(&mut self, color: Rgb);

    /// Draw a filled disc centered at `(x, y)`. `alpha` is in [0, 1];
    /// `glow` is a soft blur radius, zero for a hard-edged disc.
    fn fill_circle(&mut self, x: f32, y: f32, radius: f32, color: Rgb, alpha: f32, glow: f32);
}

/// Identifier for a visual token created through a [`NodeHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u64);

/// A sparkle as the host should materialize it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SparkleNode {
    pub x: f32,
    pub y: f32,
    pub size: f32,
    pub color: Rgb,
    pub alpha: f32,
}

/// Spawn/translate/destroy capability for trail sparkles. The trail
/// engine treats the tokens as opaque; it never reads them back.
pub trait NodeHost {
    /// Materialize a node and return its id.
    fn spawn(&mut self, node: SparkleNode) -> NodeId;

    /// Apply a vertical translation to a live node.
    fn translate(&mut self, id: NodeId, dy: f32);

    /// Destroy a node. Called exactly once per spawned node.
    fn despawn(&mut self, id: NodeId);
}
