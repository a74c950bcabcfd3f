//! State management for the palette explorer.
//!
//! The generic [`AtomicState`]/[`StateSnapshot`] pair keeps rendering pure:
//! mutation happens through atomic operations on the live state, and every
//! frame draws from an immutable snapshot. [`PaletteState`] is the concrete
//! state of the explorer; its snapshot carries the freshly generated palette
//! so the render path never recomputes anything.

use std::fmt::Debug;
use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Mutex, PoisonError,
};

use crate::{
    colors::random_color,
    harmony::{generate_palette, Harmony},
    palette::{Palette, Swatch},
};

/// Represents an immutable snapshot of application state
pub trait StateSnapshot: Clone + Send + Debug + 'static {
    /// Returns whether the application should quit
    fn should_quit(&self) -> bool;
}

/// Represents a thread-safe atomic application state
pub trait AtomicState: Send + Sync + Debug + 'static {
    /// The type of snapshot this state produces
    type Snapshot: StateSnapshot;

    /// Take a consistent snapshot of the current state
    fn snapshot(&self) -> Self::Snapshot;

    /// Signal the application to quit
    fn quit(&self);

    /// Check if the application is still running
    fn is_running(&self) -> bool;
}

/// Smallest palette size offered by the UI
pub const MIN_COUNT: usize = 3;
/// Largest palette size offered by the UI
pub const MAX_COUNT: usize = 10;
/// Palette size a fresh session starts with
pub const DEFAULT_COUNT: usize = 5;

/// Live state of the palette explorer.
///
/// The UI clamps `count` to `[MIN_COUNT, MAX_COUNT]`; the generator itself
/// accepts any count, the restriction is a presentation convention.
#[derive(Debug)]
pub struct PaletteState {
    base_colors: Mutex<Vec<Swatch>>,
    saved: Mutex<Vec<Palette>>,
    harmony: AtomicUsize,
    count: AtomicUsize,
    running: AtomicBool,
}

/// One frame's view of the explorer
#[derive(Debug, Clone)]
pub struct PaletteSnapshot {
    pub base_colors: Vec<Swatch>,
    pub harmony: Harmony,
    pub count: usize,
    pub generated: Vec<Swatch>,
    pub saved: Vec<Palette>,
    pub running: bool,
}

impl PaletteState {
    /// Start a session from one seed color
    pub fn new(seed: Swatch) -> Self {
        Self {
            base_colors: Mutex::new(vec![seed]),
            saved: Mutex::new(Vec::new()),
            harmony: AtomicUsize::new(0),
            count: AtomicUsize::new(DEFAULT_COUNT),
            running: AtomicBool::new(true),
        }
    }

    /// Start a session from a random seed color
    pub fn with_random_seed() -> Self {
        Self::new(Swatch::named(random_color()))
    }

    fn base_colors(&self) -> std::sync::MutexGuard<'_, Vec<Swatch>> {
        self.base_colors
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn saved(&self) -> std::sync::MutexGuard<'_, Vec<Palette>> {
        self.saved.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The currently selected harmony rule
    pub fn harmony(&self) -> Harmony {
        Harmony::ALL[self.harmony.load(Ordering::Acquire) % Harmony::ALL.len()]
    }

    /// Advance to the next harmony rule, wrapping at the end
    pub fn cycle_harmony(&self) {
        let next = (self.harmony.load(Ordering::Acquire) + 1) % Harmony::ALL.len();
        self.harmony.store(next, Ordering::Release);
    }

    /// The requested palette size
    pub fn count(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    /// Grow the palette, saturating at [`MAX_COUNT`]
    pub fn increase_count(&self) {
        let count = self.count.load(Ordering::Acquire);
        self.count.store((count + 1).min(MAX_COUNT), Ordering::Release);
    }

    /// Shrink the palette, saturating at [`MIN_COUNT`]
    pub fn decrease_count(&self) {
        let count = self.count.load(Ordering::Acquire);
        self.count
            .store(count.saturating_sub(1).max(MIN_COUNT), Ordering::Release);
    }

    /// Replace the seed with a fresh random color
    pub fn randomize_seed(&self) {
        let mut base = self.base_colors();
        base.clear();
        base.push(Swatch::named(random_color()));
    }

    /// Replace the seed with a specific color
    pub fn set_seed(&self, seed: Swatch) {
        let mut base = self.base_colors();
        base.clear();
        base.push(seed);
    }

    /// Replace the saved-palette list, e.g. after loading from a store
    pub fn set_saved(&self, palettes: Vec<Palette>) {
        *self.saved() = palettes;
    }

    /// Record a palette as saved, newest first; same-id entries are replaced
    pub fn record_saved(&self, palette: Palette) {
        let mut saved = self.saved();
        match saved.iter_mut().find(|p| p.id == palette.id) {
            Some(slot) => *slot = palette,
            None => saved.insert(0, palette),
        }
    }

    /// Forget the most recently saved palette, returning its id so the caller
    /// can delete it from the durable store too
    pub fn pop_saved(&self) -> Option<String> {
        let mut saved = self.saved();
        if saved.is_empty() {
            return None;
        }
        Some(saved.remove(0).id)
    }
}

impl AtomicState for PaletteState {
    type Snapshot = PaletteSnapshot;

    fn snapshot(&self) -> Self::Snapshot {
        let base_colors = self.base_colors().clone();
        let harmony = self.harmony();
        let count = self.count();
        let generated = generate_palette(&base_colors, harmony, count);

        PaletteSnapshot {
            base_colors,
            harmony,
            count,
            generated,
            saved: self.saved().clone(),
            running: self.running.load(Ordering::Acquire),
        }
    }

    fn quit(&self) {
        self.running.store(false, Ordering::Release);
    }

    fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

impl StateSnapshot for PaletteSnapshot {
    fn should_quit(&self) -> bool {
        !self.running
    }
}
