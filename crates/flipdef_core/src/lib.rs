//! flipdef Core
//!
//! Foundational primitives shared by the flipdef crates:
//!
//! - **Color**: RGBA color values with `f32` components in `0.0..=1.0`
//! - **Color math**: interpolation, alpha replacement, lighten/darken
//!
//! # Example
//!
//! ```rust
//! use flipdef_core::Color;
//!
//! let black = Color::from_hex(0x000000FF);
//! let white = Color::from_hex(0xFFFFFFFF);
//!
//! let gray = Color::lerp(&black, &white, 0.5);
//! assert_eq!(gray.to_rgba8(), [128, 128, 128, 255]);
//! assert_eq!(gray.to_string(), "#808080FF");
//! ```

pub mod color;

pub use color::Color;
