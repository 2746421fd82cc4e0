//! Core types shared by the byeol crates.
//!
//! Plain data only: colors and palettes, plus the option structs the
//! engines are configured with. The engines themselves live in
//! `byeol-engine`; TOML loading lives in `byeol-config`.

mod color;
mod options;

pub use color::{Palette, Rgb, hsl_to_rgb};
pub use options::{ColorMode, FieldOptions, TRAIL_TIERS, TrailOptions};
