//! The definition repository.
//!
//! A [`Dex`] owns the read-only species, ability, and item tables. It is
//! constructed once by the caller and passed explicitly (usually as an
//! `Arc<Dex>`) into the monster manager and battle engine; nothing in the
//! crate reaches for a global data cache.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::abilities::AbilityDefinition;
use crate::errors::{DexError, DexResult, LoadError};
use crate::items::ItemDefinition;
use crate::species::SpeciesDefinition;

/// Read-only repository of definition records, keyed by string id.
#[derive(Debug, Clone, Default)]
pub struct Dex {
    species: HashMap<String, SpeciesDefinition>,
    abilities: HashMap<String, AbilityDefinition>,
    items: HashMap<String, ItemDefinition>,
}

impl Dex {
    pub fn new(
        species: Vec<SpeciesDefinition>,
        abilities: Vec<AbilityDefinition>,
        items: Vec<ItemDefinition>,
    ) -> Self {
        Self {
            species: species.into_iter().map(|s| (s.id.clone(), s)).collect(),
            abilities: abilities.into_iter().map(|a| (a.id.clone(), a)).collect(),
            items: items.into_iter().map(|i| (i.id.clone(), i)).collect(),
        }
    }

    /// Load a repository from a data directory with `species/`, `abilities/`,
    /// and `items/` subdirectories of RON files. Missing subdirectories are
    /// treated as empty tables.
    pub fn load_dir(data_path: &Path) -> Result<Self, LoadError> {
        Ok(Self::new(
            load_definitions(&data_path.join("species"))?,
            load_definitions(&data_path.join("abilities"))?,
            load_definitions(&data_path.join("items"))?,
        ))
    }

    pub fn species(&self, id: &str) -> DexResult<&SpeciesDefinition> {
        self.species
            .get(id)
            .ok_or_else(|| DexError::SpeciesNotFound(id.to_string()))
    }

    pub fn ability(&self, id: &str) -> DexResult<&AbilityDefinition> {
        self.abilities
            .get(id)
            .ok_or_else(|| DexError::AbilityNotFound(id.to_string()))
    }

    pub fn item(&self, id: &str) -> DexResult<&ItemDefinition> {
        self.items
            .get(id)
            .ok_or_else(|| DexError::ItemNotFound(id.to_string()))
    }

    pub fn species_ids(&self) -> impl Iterator<Item = &str> {
        self.species.keys().map(String::as_str)
    }
}

/// Read every `.ron` file in a directory into a vector of definitions.
fn load_definitions<T: DeserializeOwned>(dir: &Path) -> Result<Vec<T>, LoadError> {
    let mut definitions = Vec::new();

    if !dir.exists() {
        return Ok(definitions);
    }

    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.extension().and_then(|s| s.to_str()) == Some("ron") {
            let content = fs::read_to_string(&path)?;
            definitions.push(ron::from_str(&content)?);
        }
    }

    Ok(definitions)
}
