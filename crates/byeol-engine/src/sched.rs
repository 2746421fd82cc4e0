//! Frame scheduling.

/// A component advanced once per display frame.
pub trait Tickable {
    /// Advance to `now_ms`, a monotonic timestamp in milliseconds.
    fn tick(&mut self, now_ms: u64);
}

/// Steps a set of components once per frame.
///
/// The scheduler carries no clock of its own; the host hands it a
/// timestamp per step, so a terminal loop, a vsync callback, or a test
/// can all drive frames the same way.
#[derive(Debug, Default)]
pub struct Scheduler {
    last_ms: Option<u64>,
    frames: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tick every component once. A timestamp earlier than the previous
    /// step is ignored rather than running components backwards.
    pub fn step(&mut self, now_ms: u64, components: &mut [&mut dyn Tickable]) {
        if let Some(last) = self.last_ms
            && now_ms < last
        {
            return;
        }

        for component in components.iter_mut() {
            component.tick(now_ms);
        }

        self.last_ms = Some(now_ms);
        self.frames += 1;
    }

    /// Number of frames stepped so far.
    pub fn frames(&self) -> u64 {
        self.frames
    }
}
