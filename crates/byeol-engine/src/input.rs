//! Shared input state read by the engines each tick.

/// Pointer, scroll, and viewport state owned by an engine instance.
///
/// Event handlers perform whole-field overwrites through the setters and
/// the tick pass reads the latest values; there is no other
/// synchronization because everything runs interleaved on one thread.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputState {
    pub pointer_x: f32,
    pub pointer_y: f32,
    pub scroll_x: f32,
    pub scroll_y: f32,
    pub width: f32,
    pub height: f32,
}

impl InputState {
    /// Input state for a fresh viewport, with the pointer at its center.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            pointer_x: width / 2.0,
            pointer_y: height / 2.0,
            scroll_x: 0.0,
            scroll_y: 0.0,
            width,
            height,
        }
    }

    pub fn set_pointer(&mut self, x: f32, y: f32) {
        self.pointer_x = x;
        self.pointer_y = y;
    }

    pub fn set_scroll(&mut self, x: f32, y: f32) {
        self.scroll_x = x;
        self.scroll_y = y;
    }

    /// Resync to a new viewport. Existing pointer and scroll values are
    /// kept as-is.
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.width = width;
        self.height = height;
    }

    /// Viewport center, the reference point for parallax.
    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pointer_starts_at_center() {
        let input = InputState::new(80.0, 24.0);
        assert_eq!((input.pointer_x, input.pointer_y), (40.0, 12.0));
        assert_eq!(input.center(), (40.0, 12.0));
    }

    #[test]
    fn test_viewport_resync_keeps_pointer() {
        let mut input = InputState::new(80.0, 24.0);
        input.set_pointer(10.0, 5.0);
        input.set_viewport(120.0, 40.0);
        assert_eq!((input.pointer_x, input.pointer_y), (10.0, 5.0));
        assert_eq!(input.center(), (60.0, 20.0));
    }
}
