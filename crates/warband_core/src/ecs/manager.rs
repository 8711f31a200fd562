//! # Entity Component Manager
//!
//! The central store: one bit-packed slot map per component kind plus an
//! archetype-bitmask map, all keyed by entity id.
//!
//! ## Invariants
//!
//! - An entity's archetype bit `K` is set iff its `K` record is live
//! - Destroy tears down every record named by the mask before the id is
//!   recycled
//! - Fork/merge repoint ids; they never alter record payloads

use super::component::{
    ArchetypeMask, CommanderComponent, ComponentKind, ExperienceComponent, FormComponent, Record,
    UnitComponent,
};
use super::entity::{Entity, EntityStore};
use crate::collections::SlotMap;

/// Entity/component store with archetype-bitmask queries.
///
/// Single-threaded by design: the simulation loop owns the manager
/// exclusively between ticks, and fork/merge must be treated as one
/// logically atomic step by the caller.
pub struct EntityComponentManager {
    /// Id lifecycle.
    entities: EntityStore,
    /// Per-entity component bitmasks.
    archetypes: SlotMap<ArchetypeMask>,
    /// Unit records.
    units: SlotMap<UnitComponent>,
    /// Commander records.
    commanders: SlotMap<CommanderComponent>,
    /// Form records.
    forms: SlotMap<FormComponent>,
    /// Experience records.
    experience: SlotMap<ExperienceComponent>,
}

impl Record for UnitComponent {
    const KIND: ComponentKind = ComponentKind::Unit;

    fn slots(manager: &EntityComponentManager) -> &SlotMap<Self> {
        &manager.units
    }

    fn slots_mut(manager: &mut EntityComponentManager) -> &mut SlotMap<Self> {
        &mut manager.units
    }
}

impl Record for CommanderComponent {
    const KIND: ComponentKind = ComponentKind::Commander;

    fn slots(manager: &EntityComponentManager) -> &SlotMap<Self> {
        &manager.commanders
    }

    fn slots_mut(manager: &mut EntityComponentManager) -> &mut SlotMap<Self> {
        &mut manager.commanders
    }
}

impl Record for FormComponent {
    const KIND: ComponentKind = ComponentKind::Form;

    fn slots(manager: &EntityComponentManager) -> &SlotMap<Self> {
        &manager.forms
    }

    fn slots_mut(manager: &mut EntityComponentManager) -> &mut SlotMap<Self> {
        &mut manager.forms
    }
}

impl Record for ExperienceComponent {
    const KIND: ComponentKind = ComponentKind::Experience;

    fn slots(manager: &EntityComponentManager) -> &SlotMap<Self> {
        &manager.experience
    }

    fn slots_mut(manager: &mut EntityComponentManager) -> &mut SlotMap<Self> {
        &mut manager.experience
    }
}

impl EntityComponentManager {
    /// Creates a manager with room for `max_entities` ids.
    ///
    /// # Panics
    ///
    /// Panics if `max_entities < 2` (id 0 is reserved).
    #[must_use]
    pub fn new(max_entities: u32) -> Self {
        Self {
            entities: EntityStore::new(max_entities),
            archetypes: SlotMap::new(max_entities),
            units: SlotMap::new(max_entities),
            commanders: SlotMap::new(max_entities),
            forms: SlotMap::new(max_entities),
            experience: SlotMap::new(max_entities),
        }
    }

    /// Creates a new entity with no components.
    ///
    /// # Returns
    ///
    /// The new handle, or [`Entity::NULL`] if the id space is exhausted.
    #[inline]
    pub fn create_entity(&mut self) -> Entity {
        self.entities.create()
    }

    /// Checks whether `entity` is currently live.
    #[inline]
    #[must_use]
    pub fn exists(&self, entity: Entity) -> bool {
        self.entities.exists(entity)
    }

    /// Returns the number of live entities.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.entities.len()
    }

    /// Checks if no entities are live.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Collects every live entity, in id order.
    #[must_use]
    pub fn live_entities(&self) -> Vec<Entity> {
        self.entities.iter_live().collect()
    }

    /// Attaches a record to an entity, setting its archetype bit.
    ///
    /// A record equal to its default is the absent sentinel, so
    /// attaching it removes the kind instead. Dead entities are a no-op.
    ///
    /// # Returns
    ///
    /// `false` if the entity does not exist or the record map has hit
    /// its capacity cap (a sizing error the caller must surface).
    pub fn attach<C: Record>(&mut self, entity: Entity, data: C) -> bool {
        if !self.entities.exists(entity) {
            return false;
        }
        if data == C::default() {
            self.remove::<C>(entity);
            return true;
        }
        if !C::slots_mut(self).set(entity.id(), data) {
            return false;
        }
        let mask = self.archetypes.get(entity.id()).with(C::KIND);
        self.archetypes.set(entity.id(), mask)
    }

    /// Removes a record from an entity, clearing its archetype bit.
    ///
    /// Entities that lack the kind are a no-op.
    pub fn remove<C: Record>(&mut self, entity: Entity) {
        if !self.has(entity, C::KIND) {
            return;
        }
        C::slots_mut(self).remove(entity.id());
        let mask = self.archetypes.get(entity.id()).without(C::KIND);
        self.archetypes.set(entity.id(), mask);
    }

    /// Removes a record by runtime kind tag.
    pub fn remove_kind(&mut self, entity: Entity, kind: ComponentKind) {
        match kind {
            ComponentKind::Unit => self.remove::<UnitComponent>(entity),
            ComponentKind::Commander => self.remove::<CommanderComponent>(entity),
            ComponentKind::Form => self.remove::<FormComponent>(entity),
            ComponentKind::Experience => self.remove::<ExperienceComponent>(entity),
        }
    }

    /// Reads an entity's record of kind `C`.
    ///
    /// Returns `C::default()` when absent; absence and a stored default
    /// are indistinguishable by design.
    #[inline]
    #[must_use]
    pub fn get<C: Record>(&self, entity: Entity) -> C {
        C::slots(self).get(entity.id())
    }

    /// Checks whether an entity has a record of `kind`.
    ///
    /// This is the fast path: one archetype-mask bit test, no record map
    /// lookup.
    #[inline]
    #[must_use]
    pub fn has(&self, entity: Entity, kind: ComponentKind) -> bool {
        self.archetypes.get(entity.id()).has(kind)
    }

    /// Returns an entity's full archetype mask.
    #[inline]
    #[must_use]
    pub fn archetype(&self, entity: Entity) -> ArchetypeMask {
        self.archetypes.get(entity.id())
    }

    /// Finds every entity that has all of the requested kinds.
    ///
    /// Enumerates the archetype map's occupied keys and keeps those
    /// whose mask covers the combined request, so cost is O(entities
    /// with at least one component), never O(all ids ever issued).
    /// An empty request yields an empty result.
    #[must_use]
    pub fn entities_with(&self, kinds: &[ComponentKind]) -> Vec<Entity> {
        let wanted = ArchetypeMask::from_kinds(kinds);
        if wanted.is_empty() {
            return Vec::new();
        }
        self.archetypes
            .valid_keys()
            .into_iter()
            .filter(|&id| self.archetypes.get(id).contains_all(wanted))
            .map(Entity::new)
            .collect()
    }

    /// Destroys an entity: tears down every record named by its
    /// archetype mask, then releases the id for recycling.
    ///
    /// # Returns
    ///
    /// `false` if the entity was not live - a defined no-op.
    pub fn destroy_entity(&mut self, entity: Entity) -> bool {
        if !self.entities.exists(entity) {
            return false;
        }
        let mask = self.archetypes.get(entity.id());
        for kind in ComponentKind::ALL {
            if mask.has(kind) {
                self.remove_kind(entity, kind);
            }
        }
        self.entities.destroy(entity)
    }

    /// Splits `subset` out of this manager into a fresh, independently
    /// sized one.
    ///
    /// New ids are allocated in the sub-manager; each kind's records for
    /// the whole subset are bulk-read from this manager, bulk-written
    /// into the destination, and zeroed here, and the archetype masks
    /// are bulk-copied the same way. The original ids are then released
    /// for recycling. Payloads are never altered, only re-keyed.
    ///
    /// Entities not present in this manager are skipped
    /// (`debug_assert!`ed - that is a caller bug, not a runtime
    /// condition).
    ///
    /// The caller must treat the call as one atomic step: mid-operation
    /// the subset belongs to neither store.
    pub fn fork_sub_manager(&mut self, max_entities: u32, subset: &[Entity]) -> Self {
        let mut sub = Self::new(max_entities);

        let mut src_keys = Vec::with_capacity(subset.len());
        let mut dst_keys = Vec::with_capacity(subset.len());
        for &entity in subset {
            if !self.entities.exists(entity) {
                debug_assert!(false, "fork of entity not present in source");
                continue;
            }
            let forked = sub.create_entity();
            if forked.is_null() {
                debug_assert!(false, "sub-manager sized too small for fork subset");
                continue;
            }
            src_keys.push(entity.id());
            dst_keys.push(forked.id());
        }

        self.move_records(&mut sub, &src_keys, &dst_keys);
        for &id in &src_keys {
            self.entities.destroy(Entity::new(id));
        }
        sub
    }

    /// Merges every live entity of `sub` back into this manager,
    /// leaving `sub` empty.
    ///
    /// The inverse of [`EntityComponentManager::fork_sub_manager`]:
    /// corresponding ids are allocated here, all records and archetype
    /// masks are bulk-copied, and the sub-manager's copies are zeroed
    /// and its ids released.
    pub fn merge_sub_manager(&mut self, sub: &mut Self) {
        let sub_entities = sub.live_entities();

        let mut src_keys = Vec::with_capacity(sub_entities.len());
        let mut dst_keys = Vec::with_capacity(sub_entities.len());
        for &entity in &sub_entities {
            let merged = self.create_entity();
            if merged.is_null() {
                debug_assert!(false, "manager id space exhausted during merge");
                continue;
            }
            src_keys.push(entity.id());
            dst_keys.push(merged.id());
        }

        sub.move_records(self, &src_keys, &dst_keys);
        for &id in &src_keys {
            sub.entities.destroy(Entity::new(id));
        }
    }

    /// Moves every kind's records plus the archetype masks for
    /// `src_keys` (in `self`) to `dst_keys` (in `dst`).
    fn move_records(&mut self, dst: &mut Self, src_keys: &[u32], dst_keys: &[u32]) {
        let ok = transfer(&mut self.units, &mut dst.units, src_keys, dst_keys)
            && transfer(&mut self.commanders, &mut dst.commanders, src_keys, dst_keys)
            && transfer(&mut self.forms, &mut dst.forms, src_keys, dst_keys)
            && transfer(&mut self.experience, &mut dst.experience, src_keys, dst_keys)
            && transfer(&mut self.archetypes, &mut dst.archetypes, src_keys, dst_keys);
        debug_assert!(ok, "record map capacity exhausted during fork/merge");
    }
}

/// Bulk-moves the entries under `src_keys` to `dst_keys`: reads the
/// whole batch from `src`, writes it into `dst`, then zeroes the source
/// copies. Absent entries move as absent (defaults are skipped by the
/// bulk setter on both ends).
///
/// Returns `false` without zeroing the source if the destination could
/// not take the batch, so no payload is ever lost to a failed write.
fn transfer<T: Copy + Default + PartialEq>(
    src: &mut SlotMap<T>,
    dst: &mut SlotMap<T>,
    src_keys: &[u32],
    dst_keys: &[u32],
) -> bool {
    if src_keys.is_empty() {
        return true;
    }
    let values = src.get_many(src_keys);
    if values.iter().all(|value| *value == T::default()) {
        return true;
    }
    if !dst.set_many(dst_keys, &values) {
        return false;
    }
    src.set_many(src_keys, &vec![T::default(); src_keys.len()]);
    true
}
