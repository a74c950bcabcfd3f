//! Palette persistence.
//!
//! The saved-palette list lives behind an explicit repository interface so
//! the durable store stays swappable: in-memory for tests and ephemeral
//! sessions, a JSON file for real use. Stores are injected into the app
//! layer; the generator core never sees them.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Mutex, PoisonError},
};

use crate::{
    error::{HuechordError, HuechordResult},
    palette::Palette,
};

/// Repository interface for saved palettes.
///
/// Ordering contract: `load_all` returns newest first, and `upsert` of an
/// unknown id inserts at the front while an existing id is updated in place.
pub trait PaletteStore: Send + Sync {
    /// All saved palettes, newest first
    fn load_all(&self) -> HuechordResult<Vec<Palette>>;

    /// Insert a new palette or update the existing one with the same id
    fn upsert(&self, palette: &Palette) -> HuechordResult<()>;

    /// Remove a palette by id; returns whether anything was removed
    fn delete(&self, id: &str) -> HuechordResult<bool>;

    /// Drop every saved palette
    fn clear(&self) -> HuechordResult<()>;
}

fn upsert_in(palettes: &mut Vec<Palette>, palette: &Palette) {
    match palettes.iter_mut().find(|p| p.id == palette.id) {
        Some(slot) => *slot = palette.clone(),
        None => palettes.insert(0, palette.clone()),
    }
}

/// Ephemeral store backed by a mutexed vector
#[derive(Debug, Default)]
pub struct MemoryStore {
    palettes: Mutex<Vec<Palette>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn palettes(&self) -> std::sync::MutexGuard<'_, Vec<Palette>> {
        self.palettes
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl PaletteStore for MemoryStore {
    fn load_all(&self) -> HuechordResult<Vec<Palette>> {
        Ok(self.palettes().clone())
    }

    fn upsert(&self, palette: &Palette) -> HuechordResult<()> {
        upsert_in(&mut self.palettes(), palette);
        Ok(())
    }

    fn delete(&self, id: &str) -> HuechordResult<bool> {
        let mut palettes = self.palettes();
        let before = palettes.len();
        palettes.retain(|p| p.id != id);
        Ok(palettes.len() != before)
    }

    fn clear(&self) -> HuechordResult<()> {
        self.palettes().clear();
        Ok(())
    }
}

/// Durable store backed by a single JSON file.
///
/// The whole list is loaded at open and rewritten on every change, matching
/// the load-at-startup/flush-on-write lifecycle of a session-local history.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    cache: Mutex<Vec<Palette>>,
}

impl JsonFileStore {
    /// Open a store at `path`, loading any palettes already saved there.
    ///
    /// A missing or empty file is an empty store; a file that exists but does
    /// not parse is an error, so a corrupted history is surfaced instead of
    /// silently overwritten.
    pub fn open(path: impl Into<PathBuf>) -> HuechordResult<Self> {
        let path = path.into();

        let palettes = match fs::read_to_string(&path) {
            Ok(text) if text.trim().is_empty() => Vec::new(),
            Ok(text) => serde_json::from_str(&text).map_err(|e| {
                HuechordError::store(
                    &path,
                    "palette store open",
                    (0, 0),
                    format!("Failed to parse palette file: {}", e),
                )
            })?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Vec::new(),
            Err(e) => {
                return Err(HuechordError::store(
                    &path,
                    "palette store open",
                    (0, 0),
                    format!("Failed to read palette file: {}", e),
                )
                .into())
            }
        };

        Ok(Self {
            path,
            cache: Mutex::new(palettes),
        })
    }

    /// The file this store persists to
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn cache(&self) -> std::sync::MutexGuard<'_, Vec<Palette>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn flush(&self, palettes: &[Palette]) -> HuechordResult<()> {
        let json = serde_json::to_string_pretty(palettes).map_err(|e| {
            HuechordError::store(
                &self.path,
                "palette store flush",
                (0, 0),
                format!("Failed to encode palettes: {}", e),
            )
        })?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).map_err(|e| {
                    HuechordError::store(
                        &self.path,
                        "palette store flush",
                        (0, 0),
                        format!("Failed to create store directory: {}", e),
                    )
                })?;
            }
        }

        fs::write(&self.path, json).map_err(|e| {
            HuechordError::store(
                &self.path,
                "palette store flush",
                (0, 0),
                format!("Failed to write palette file: {}", e),
            )
            .into()
        })
    }
}

impl PaletteStore for JsonFileStore {
    fn load_all(&self) -> HuechordResult<Vec<Palette>> {
        Ok(self.cache().clone())
    }

    fn upsert(&self, palette: &Palette) -> HuechordResult<()> {
        let mut cache = self.cache();
        upsert_in(&mut cache, palette);
        self.flush(&cache)
    }

    fn delete(&self, id: &str) -> HuechordResult<bool> {
        let mut cache = self.cache();
        let before = cache.len();
        cache.retain(|p| p.id != id);
        if cache.len() == before {
            return Ok(false);
        }
        self.flush(&cache)?;
        Ok(true)
    }

    fn clear(&self) -> HuechordResult<()> {
        let mut cache = self.cache();
        cache.clear();
        self.flush(&cache)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::harmony::{generate_palette, generate_palette_id, Harmony};
    use crate::palette::Swatch;
    use pretty_assertions::assert_eq;

    fn sample_palette(id: &str, seed: &str) -> Palette {
        let base_colors = vec![Swatch::new(seed)];
        let generated_colors = generate_palette(&base_colors, Harmony::Analogous, 5);
        Palette {
            id: id.to_string(),
            name: None,
            harmony: Harmony::Analogous,
            base_colors,
            generated_colors,
            timestamp_ms: 1_700_000_000_000,
        }
    }

    fn temp_store_path() -> PathBuf {
        std::env::temp_dir().join(format!("huechord-store-{}.json", generate_palette_id()))
    }

    #[test]
    fn test_memory_store_round_trip() {
        let store = MemoryStore::new();
        assert_eq!(store.load_all().unwrap(), Vec::new());

        let first = sample_palette("a", "#ff0000");
        let second = sample_palette("b", "#0000ff");
        store.upsert(&first).unwrap();
        store.upsert(&second).unwrap();

        // Newest first
        let all = store.load_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "b");
        assert_eq!(all[1].id, "a");
    }

    #[test]
    fn test_memory_store_upsert_replaces_in_place() {
        let store = MemoryStore::new();
        store.upsert(&sample_palette("a", "#ff0000")).unwrap();
        store.upsert(&sample_palette("b", "#00ff00")).unwrap();

        let mut renamed = sample_palette("a", "#ff0000");
        renamed.name = Some("reds".to_string());
        store.upsert(&renamed).unwrap();

        let all = store.load_all().unwrap();
        assert_eq!(all.len(), 2);
        // Updated entry keeps its position at the back
        assert_eq!(all[1].id, "a");
        assert_eq!(all[1].name.as_deref(), Some("reds"));
    }

    #[test]
    fn test_memory_store_delete_and_clear() {
        let store = MemoryStore::new();
        store.upsert(&sample_palette("a", "#ff0000")).unwrap();
        store.upsert(&sample_palette("b", "#00ff00")).unwrap();

        assert!(store.delete("a").unwrap());
        assert!(!store.delete("a").unwrap());
        assert_eq!(store.load_all().unwrap().len(), 1);

        store.clear().unwrap();
        assert_eq!(store.load_all().unwrap(), Vec::new());
    }

    #[test]
    fn test_file_store_persists_across_reopen() {
        let path = temp_store_path();

        {
            let store = JsonFileStore::open(&path).unwrap();
            assert_eq!(store.load_all().unwrap(), Vec::new());
            store.upsert(&sample_palette("a", "#6366f1")).unwrap();
            store.upsert(&sample_palette("b", "#ff0000")).unwrap();
        }

        let reopened = JsonFileStore::open(&path).unwrap();
        let all = reopened.load_all().unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].id, "b");
        assert_eq!(all[0].generated_colors.len(), 5);

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_delete_flushes() {
        let path = temp_store_path();

        let store = JsonFileStore::open(&path).unwrap();
        store.upsert(&sample_palette("a", "#6366f1")).unwrap();
        assert!(store.delete("a").unwrap());

        let reopened = JsonFileStore::open(&path).unwrap();
        assert_eq!(reopened.load_all().unwrap(), Vec::new());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_rejects_corrupt_file() {
        let path = temp_store_path();
        fs::write(&path, "{ this is not json").unwrap();

        let result = JsonFileStore::open(&path);
        assert!(result.is_err());

        let _ = fs::remove_file(&path);
    }

    #[test]
    fn test_file_store_treats_empty_file_as_empty() {
        let path = temp_store_path();
        fs::write(&path, "").unwrap();

        let store = JsonFileStore::open(&path).unwrap();
        assert_eq!(store.load_all().unwrap(), Vec::new());

        let _ = fs::remove_file(&path);
    }
}
