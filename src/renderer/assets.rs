//! Load-once asset cache
//!
//! Handles are created the first time an asset name is requested and reused
//! for every later draw call. A failed load is remembered so it is not retried
//! every frame.

use std::collections::HashMap;

#[derive(Debug)]
pub struct AssetCache<H> {
    entries: HashMap<String, Option<H>>,
}

impl<H> Default for AssetCache<H> {
    fn default() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }
}

impl<H> AssetCache<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached handle for `name`, loading it with `load` on first use
    pub fn get_or_load<F>(&mut self, name: &str, load: F) -> Option<&H>
    where
        F: FnOnce(&str) -> Option<H>,
    {
        if !self.entries.contains_key(name) {
            let handle = load(name);
            if handle.is_none() {
                log::warn!("Failed to load asset {}", name);
            }
            self.entries.insert(name.to_string(), handle);
        }
        self.entries.get(name).and_then(Option::as_ref)
    }

    /// Load every name up front
    pub fn preload<'n, I, F>(&mut self, names: I, mut load: F)
    where
        I: IntoIterator<Item = &'n str>,
        F: FnMut(&str) -> Option<H>,
    {
        for name in names {
            self.get_or_load(name, &mut load);
        }
    }

    pub fn get(&self, name: &str) -> Option<&H> {
        self.entries.get(name).and_then(Option::as_ref)
    }

    /// Number of names attempted (loaded or failed)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_loads_once() {
        let loads = Cell::new(0);
        let mut cache = AssetCache::new();
        let loader = |name: &str| {
            loads.set(loads.get() + 1);
            Some(name.len())
        };

        assert_eq!(cache.get_or_load("mammoth.png", loader), Some(&11));
        assert_eq!(cache.get_or_load("mammoth.png", loader), Some(&11));
        assert_eq!(loads.get(), 1);
    }

    #[test]
    fn test_failed_load_not_retried() {
        let loads = Cell::new(0);
        let mut cache: AssetCache<u8> = AssetCache::new();
        let loader = |_: &str| {
            loads.set(loads.get() + 1);
            None
        };
        assert!(cache.get_or_load("missing.png", loader).is_none());
        assert!(cache.get_or_load("missing.png", loader).is_none());
        assert_eq!(loads.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_preload() {
        let mut cache = AssetCache::new();
        cache.preload(["a.png", "b.png", "a.png"], |n: &str| Some(n.to_string()));
        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("b.png").map(String::as_str), Some("b.png"));
        assert!(cache.get("c.png").is_none());
    }
}
