//! Fixed vocabularies a theme is baked against
//!
//! - [`ThemeColor`]: the semantic color slots every baked theme fills
//! - [`ThemeState`]: interaction states a slot may vary by
//! - [`ThemeMode`]: presentation modes a theme is baked for

mod color;
mod mode;
mod state;

pub use color::*;
pub use mode::*;
pub use state::*;
