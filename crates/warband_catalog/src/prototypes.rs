//! # Prototype Catalog
//!
//! Load-once tables describing everything a unit can be built from.
//!
//! The catalog is an explicitly constructed object: it is deserialized
//! from a TOML file at startup, validated, and then passed by reference
//! to whoever needs it. There is no global prototype state.
//!
//! Prototype ids are 1-based throughout - id 0 is reserved so that the
//! all-zero component records can keep meaning "absent".

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

use serde::Deserialize;
use warband_core::BloomMap;

use crate::error::{CatalogError, CatalogResult};

/// Largest entry count a 1-based u16 id space can address.
const MAX_TABLE_LEN: usize = u16::MAX as usize - 1;

/// Blueprint for a spawnable unit.
#[derive(Clone, Debug, Deserialize)]
pub struct UnitPrototype {
    /// Display name, also used for name lookups.
    pub name: String,
    /// 1-based id of the unit's default form.
    pub form: u16,
    /// Command rating; 0 means the unit never leads.
    #[serde(default)]
    pub command: u8,
    /// Morale modifier applied to led units.
    #[serde(default)]
    pub morale: i8,
}

/// Blueprint for a physical form.
#[derive(Clone, Debug, Deserialize)]
pub struct FormPrototype {
    /// Display name.
    pub name: String,
    /// 1-based id of the form's body plan.
    pub body: u16,
    /// 1-based id of the form's attribute line.
    pub attributes: u16,
}

/// One line of base attributes shared by every unit of a form.
#[derive(Clone, Debug, Deserialize)]
pub struct AttributesPrototype {
    /// Physical size class.
    pub size: u8,
    /// Raw power.
    pub strength: u8,
    /// Fine motor skill.
    pub dexterity: u8,
    /// Movement speed.
    pub agility: u8,
    /// Endurance pool.
    pub stamina: u8,
    /// Damage resistance.
    pub toughness: u8,
    /// Mental fortitude.
    pub will: u8,
    /// Health pool.
    pub constitution: u8,
}

/// Body plan: how many of each part a form has.
#[derive(Clone, Debug, Deserialize)]
pub struct BodyPrototype {
    /// Display name.
    pub name: String,
    /// Head count.
    #[serde(default)]
    pub heads: u8,
    /// Arm count.
    #[serde(default)]
    pub arms: u8,
    /// Leg count.
    #[serde(default)]
    pub legs: u8,
    /// Wing count.
    #[serde(default)]
    pub wings: u8,
    /// Tail count.
    #[serde(default)]
    pub tails: u8,
    /// Eyes per head.
    #[serde(default)]
    pub eyes_per_head: u8,
    /// Trinket slot count.
    #[serde(default)]
    pub trinket_slots: u8,
}

/// On-disk catalog schema.
#[derive(Debug, Deserialize)]
struct CatalogFile {
    #[serde(default)]
    units: Vec<UnitPrototype>,
    #[serde(default)]
    forms: Vec<FormPrototype>,
    #[serde(default)]
    attributes: Vec<AttributesPrototype>,
    #[serde(default)]
    bodies: Vec<BodyPrototype>,
}

/// Validated, immutable prototype tables.
///
/// Constructed once from TOML, then read-only for the rest of the
/// process. Name resolution goes through a bloom-backed sorted index, so
/// lookups of names that do not exist (the common case when probing
/// modded content) usually cost four bit probes and no search.
#[derive(Debug)]
pub struct PrototypeCatalog {
    units: Vec<UnitPrototype>,
    forms: Vec<FormPrototype>,
    attributes: Vec<AttributesPrototype>,
    bodies: Vec<BodyPrototype>,
    /// Hashed unit name -> 1-based unit id.
    name_index: BloomMap<u64, u16>,
}

impl PrototypeCatalog {
    /// Loads and validates a catalog from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file cannot be read, and
    /// everything [`PrototypeCatalog::from_toml`] can return.
    pub fn load(path: &Path) -> CatalogResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let catalog = Self::from_toml(&text)?;
        tracing::info!(path = %path.display(), "prototype catalog loaded");
        Ok(catalog)
    }

    /// Parses and validates a catalog from TOML text.
    ///
    /// Every cross-table reference is checked here, once, so the factory
    /// can trust the tables at spawn time.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Parse`] for malformed input,
    /// [`CatalogError::TableOverflow`] if a table exceeds the u16 id
    /// space, and a `Missing*` variant for each dangling reference.
    pub fn from_toml(text: &str) -> CatalogResult<Self> {
        let file: CatalogFile = toml::from_str(text)?;

        check_table_len("unit", file.units.len())?;
        check_table_len("form", file.forms.len())?;
        check_table_len("attribute", file.attributes.len())?;
        check_table_len("body", file.bodies.len())?;

        for unit in &file.units {
            if unit.form == 0 || usize::from(unit.form) > file.forms.len() {
                return Err(CatalogError::MissingForm {
                    unit: unit.name.clone(),
                    form: unit.form,
                    count: file.forms.len(),
                });
            }
        }
        for form in &file.forms {
            if form.body == 0 || usize::from(form.body) > file.bodies.len() {
                return Err(CatalogError::MissingBody {
                    form: form.name.clone(),
                    body: form.body,
                    count: file.bodies.len(),
                });
            }
            if form.attributes == 0 || usize::from(form.attributes) > file.attributes.len() {
                return Err(CatalogError::MissingAttributes {
                    form: form.name.clone(),
                    attributes: form.attributes,
                    count: file.attributes.len(),
                });
            }
        }

        let mut name_keys = Vec::with_capacity(file.units.len());
        let mut name_ids = Vec::with_capacity(file.units.len());
        for (index, unit) in file.units.iter().enumerate() {
            let key = name_key(&unit.name);
            if name_keys.contains(&key) {
                tracing::warn!(name = %unit.name, "duplicate unit prototype name, lookup resolves to one of them");
            }
            name_keys.push(key);
            #[allow(clippy::cast_possible_truncation)]
            name_ids.push(index as u16 + 1);
        }

        tracing::info!(
            units = file.units.len(),
            forms = file.forms.len(),
            bodies = file.bodies.len(),
            "prototype tables validated"
        );

        Ok(Self {
            name_index: BloomMap::new(&name_keys, &name_ids),
            units: file.units,
            forms: file.forms,
            attributes: file.attributes,
            bodies: file.bodies,
        })
    }

    /// Looks up a unit prototype by 1-based id.
    #[must_use]
    pub fn unit(&self, id: u16) -> Option<&UnitPrototype> {
        lookup(&self.units, id)
    }

    /// Looks up a form prototype by 1-based id.
    #[must_use]
    pub fn form(&self, id: u16) -> Option<&FormPrototype> {
        lookup(&self.forms, id)
    }

    /// Looks up an attribute line by 1-based id.
    #[must_use]
    pub fn attributes(&self, id: u16) -> Option<&AttributesPrototype> {
        lookup(&self.attributes, id)
    }

    /// Looks up a body plan by 1-based id.
    #[must_use]
    pub fn body(&self, id: u16) -> Option<&BodyPrototype> {
        lookup(&self.bodies, id)
    }

    /// Returns the number of unit prototypes.
    #[must_use]
    pub fn unit_count(&self) -> usize {
        self.units.len()
    }

    /// Resolves a unit prototype id by name.
    ///
    /// Backed by the bloom index: unknown names short-circuit on the
    /// filter, known names are confirmed by binary search over the
    /// hashed-name table.
    #[must_use]
    pub fn find_unit(&self, name: &str) -> Option<u16> {
        self.name_index.try_get(&name_key(name))
    }
}

/// 1-based slice lookup shared by the accessor methods.
fn lookup<T>(table: &[T], id: u16) -> Option<&T> {
    if id == 0 {
        return None;
    }
    table.get(usize::from(id) - 1)
}

fn check_table_len(table: &'static str, count: usize) -> CatalogResult<()> {
    if count > MAX_TABLE_LEN {
        return Err(CatalogError::TableOverflow {
            table,
            count,
            limit: MAX_TABLE_LEN,
        });
    }
    Ok(())
}

/// Stable 64-bit key for a unit name.
fn name_key(name: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    hasher.finish()
}
