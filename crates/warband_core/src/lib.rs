//! # WARBAND Core Engine
//!
//! Cache-dense entity/component storage designed for:
//! - Fixed-size component records packed into dense arrays
//! - O(1) attach/remove/lookup with bit-packed indirection
//! - Archetype bitmask queries over the live entity set
//!
//! ## Architecture Rules
//!
//! 1. **No boxed components** - Records are plain `Copy` data in flat arrays
//! 2. **Zero sentinel** - A record equal to its default value means "absent"
//! 3. **No panics on hot paths** - Out-of-range access is a defined no-op
//!
//! ## Example
//!
//! ```rust,ignore
//! use warband_core::{EntityComponentManager, UnitComponent};
//!
//! let mut manager = EntityComponentManager::new(10_000);
//! let entity = manager.create_entity();
//! manager.attach(entity, UnitComponent { prototype: 1, form: 1 });
//! ```

#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(clippy::perf)]

pub mod collections;
pub mod ecs;

pub use collections::{Bitset, BloomMap, SlotMap};
pub use ecs::{
    ArchetypeMask, CommanderComponent, ComponentKind, Entity, EntityComponentManager, EntityStore,
    ExperienceComponent, FormComponent, Record, UnitComponent,
};
