#![forbid(unsafe_code)]

//! # Huechord
//!
//! A terminal color palette generator built on color harmony rules.
//!
//! ## Overview
//!
//! The crate is split into a pure generator core and a TUI shell around it:
//!
//! - **Color Conversion**: hex, RGB, and HSL representations with
//!   integer-rounded conversions, light/dark classification, and coarse
//!   color naming
//! - **Harmony Generation**: six deterministic rules (analogous,
//!   complementary, triadic, tetradic, monochromatic, shades) that derive an
//!   ordered palette from one seed color
//! - **Persistence**: a swappable repository for saved palettes, in-memory
//!   or a JSON file
//! - **Explorer Shell**: an async, snapshot-rendered TUI built on `smol`,
//!   `crossterm`, and `ratatui`
//!
//! ## Core Components
//!
//! - [`generate_palette`]: seed color(s) + [`Harmony`] + count -> palette
//! - [`Rgb`] / [`Hsl`]: the conversion types behind every rule
//! - [`Palette`] / [`Swatch`]: the plain data contract with the shell
//! - [`PaletteStore`]: saved-palette repository trait
//! - [`App`]: event loop, key bindings, and rendering
//!
//! ## Example Usage
//!
//! Generating palettes needs no terminal at all:
//!
//! ```rust
//! use huechord::{generate_palette, Harmony, Swatch};
//!
//! let base = vec![Swatch::new("#6366f1")];
//! let palette = generate_palette(&base, Harmony::Complementary, 5);
//!
//! assert_eq!(palette.len(), 5);
//! for swatch in &palette {
//!     println!("{}", swatch);
//! }
//! ```
//!
//! Running the interactive explorer:
//!
//! ```rust,no_run
//! use huechord::{App, HuechordResult, JsonFileStore, PaletteState};
//! use std::time::Duration;
//!
//! fn main() -> HuechordResult<()> {
//!     let state = PaletteState::with_random_seed();
//!     let store = JsonFileStore::open("palettes.json")?;
//!
//!     smol::block_on(async {
//!         let mut app = App::new(state, Box::new(store), Duration::from_millis(50))?;
//!         app.run().await
//!     })
//! }
//! ```
//!
//! ## Module Organization
//!
//! - `app`: application orchestration and lifecycle management
//! - `colors`: color conversion and classification
//! - `error`: error types and handling
//! - `event`: event processing system
//! - `harmony`: harmony rules and palette generation
//! - `palette`: palette and swatch records
//! - `state`: state management traits and the explorer state
//! - `store`: saved-palette persistence
//! - `tui`: terminal interface management
//!
//! ## Error Handling
//!
//! The shell uses [`HuechordResult`] and [`HuechordError`] with diagnostics
//! via `miette`. The generator core never errors: an unparsable seed or an
//! unknown strategy tag degrades to an empty palette, and hex parsing
//! signals failure with `Option`.

pub use app::App;
pub use colors::{
    color_name, contrast_color, is_color_light, random_color, Hsl, PaletteColorize, Rgb,
};
pub use error::{HuechordError, HuechordResult};
pub use event::{Event, EventHandler};
pub use harmony::{generate_palette, generate_palette_id, normalize_hue, Harmony};
pub use palette::{Palette, Swatch};
pub use state::{AtomicState, PaletteSnapshot, PaletteState, StateSnapshot};
pub use store::{JsonFileStore, MemoryStore, PaletteStore};
pub use tui::Tui;

/// Application orchestration module
pub mod app;
/// Color conversion and classification
pub mod colors;
/// Error types and handling
pub mod error;
/// Event processing system
pub mod event;
/// Harmony rules and palette generation
pub mod harmony;
/// Palette and swatch records
pub mod palette;
/// State management traits and the explorer state
pub mod state;
/// Saved-palette persistence
pub mod store;
/// Terminal interface management
pub mod tui;
