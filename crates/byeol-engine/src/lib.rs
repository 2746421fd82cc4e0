//! Particle animation engines for byeol.
//!
//! Two independent engines are driven by a per-frame [`Scheduler`]: the
//! ambient star field ([`FieldEngine`]) owns a fixed pool of twinkling,
//! parallax-responsive stars and repaints the whole background every
//! frame; the trail engine ([`TrailEngine`]) spawns short-lived sparkles
//! behind the pointer and ages them out. The engines share no state and
//! draw through narrow seams ([`Surface`], [`NodeHost`]) so hosts and
//! tests can supply their own render targets.

mod error;
mod field;
mod input;
mod pool;
mod sched;
mod surface;
mod trail;

pub use error::OptionsError;
pub use field::{FieldEngine, Star};
pub use input::InputState;
pub use pool::SlotPool;
pub use sched::{Scheduler, Tickable};
pub use surface::{NodeHost, NodeId, SparkleNode, Surface};
pub use trail::{Sparkle, TrailEngine};
