//! # WARBAND Catalog
//!
//! Prototype tables and unit spawning on top of `warband_core`.
//!
//! ## CRITICAL RULE
//!
//! Prototype data is loaded ONCE, at startup, into an explicitly
//! constructed [`PrototypeCatalog`]. Nothing in this crate (or its
//! consumers) may hold prototype state in globals - the catalog is
//! passed by reference to whoever spawns from it.

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod error;
pub mod events;
pub mod factory;
pub mod prototypes;

pub use error::{CatalogError, CatalogResult};
pub use events::{BattleEvent, BattleEventKind};
pub use factory::UnitFactory;
pub use prototypes::{
    AttributesPrototype, BodyPrototype, FormPrototype, PrototypeCatalog, UnitPrototype,
};
