//! Presentation layer: view models and a plain-text renderer.
//!
//! ```text
//! DataTable → view() → TableView → render_to_string → text
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: View model types representing a renderable table page
//! - [`renderer`]: Aligned plain-text rendering with optional ANSI styling

pub mod renderer;
pub mod viewmodel;

pub use renderer::{render, render_to_string};
pub use viewmodel::{
    DisplayRow, EmptyState, FilterInfo, FooterInfo, HeaderCell, SearchBarInfo, TableView,
};
