use std::collections::HashMap;

use serde::Serialize;

use crate::components::material::TextureRef;

/// One texture the host should load, keyed by the id instances carry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextureEntry {
    pub id: u32,
    pub path: String,
}

/// Assigns small numeric ids to texture paths.
/// Id 0 is reserved for "no texture"; real ids start at 1 and never change.
pub struct TextureTable {
    ids: HashMap<String, u32>,
    entries: Vec<TextureEntry>,
}

impl TextureTable {
    pub fn new() -> Self {
        Self {
            ids: HashMap::new(),
            entries: Vec::new(),
        }
    }

    /// Id for `texture`, registering it on first sight.
    pub fn intern(&mut self, texture: &TextureRef) -> u32 {
        if let Some(&id) = self.ids.get(texture.path()) {
            return id;
        }
        let id = self.entries.len() as u32 + 1;
        self.ids.insert(texture.path().to_string(), id);
        self.entries.push(TextureEntry {
            id,
            path: texture.path().to_string(),
        });
        id
    }

    /// `intern` for optional slots; `None` maps to 0.
    pub fn slot(&mut self, texture: Option<&TextureRef>) -> u32 {
        texture.map_or(0, |t| self.intern(t))
    }

    pub fn get(&self, path: &str) -> Option<u32> {
        self.ids.get(path).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// JSON array of `{ id, path }` for the host's texture loader.
    pub fn manifest_json(&self) -> String {
        serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_string())
    }
}

impl Default for TextureTable {
    fn default() -> Self {
        Self::new()
    }
}
