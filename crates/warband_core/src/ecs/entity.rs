//! # Entity Management
//!
//! Entities are opaque integer handles with no inherent payload.
//! Id `0` is reserved as the invalid handle and is never issued.

use crate::collections::Bitset;

/// Opaque handle identifying a game object.
///
/// Wraps a non-negative integer id. All entity state lives in component
/// maps keyed by this id; the handle itself carries nothing else.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Entity(u32);

impl Entity {
    /// The reserved invalid handle. Never issued by a store.
    pub const NULL: Self = Self(0);

    /// Wraps a raw id. Only stores mint live handles.
    #[inline]
    #[must_use]
    pub(crate) const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Returns the raw integer id.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u32 {
        self.0
    }

    /// Checks if this is the reserved invalid handle.
    #[inline]
    #[must_use]
    pub const fn is_null(self) -> bool {
        self.0 == 0
    }
}

impl Default for Entity {
    fn default() -> Self {
        Self::NULL
    }
}

/// Entity id lifecycle: allocation, liveness, and recycling.
///
/// Ids are issued monotonically starting at 1; destroyed ids wait in a
/// fixed ring buffer (capacity `max_entities / 2`) and are handed out
/// again first-in-first-out before a fresh id is minted.
///
/// The store only tracks ids. Component teardown is the caller's job and
/// must happen before `destroy` - a recycled id must never resurrect
/// another entity's records.
pub struct EntityStore {
    /// Liveness bit per id.
    live: Bitset,
    /// Ring buffer of ids pending reuse.
    recycled: Box<[u32]>,
    /// Ring read cursor.
    first_recycled: usize,
    /// Ring write cursor. Equal cursors mean the ring is empty; a full
    /// ring wraps and overwrites the oldest pending id.
    next_recycled: usize,
    /// Next never-issued id.
    next_id: u32,
    /// Number of currently live entities.
    live_count: usize,
}

impl EntityStore {
    /// Creates a store for ids in `[1, max_entities)`.
    ///
    /// # Panics
    ///
    /// Panics if `max_entities < 2` (id 0 is reserved, so smaller stores
    /// could never issue a handle).
    #[must_use]
    pub fn new(max_entities: u32) -> Self {
        assert!(max_entities >= 2, "store must have room for a live entity");
        Self {
            live: Bitset::new(max_entities as usize),
            recycled: vec![0u32; (max_entities / 2).max(1) as usize].into_boxed_slice(),
            first_recycled: 0,
            next_recycled: 0,
            next_id: 1,
            live_count: 0,
        }
    }

    /// Returns the exclusive upper bound of the id space.
    #[inline]
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub const fn capacity(&self) -> u32 {
        self.live.len() as u32
    }

    /// Returns the number of currently live entities.
    #[inline]
    #[must_use]
    pub const fn len(&self) -> usize {
        self.live_count
    }

    /// Checks if no entities are live.
    #[inline]
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.live_count == 0
    }

    /// Creates a new entity. O(1).
    ///
    /// Reuses the oldest recycled id when one is pending, otherwise
    /// mints the next monotonic id.
    ///
    /// # Returns
    ///
    /// The new handle, or [`Entity::NULL`] if the id space is exhausted.
    pub fn create(&mut self) -> Entity {
        let id = if self.first_recycled == self.next_recycled {
            let id = self.next_id;
            if id >= self.capacity() {
                return Entity::NULL;
            }
            self.next_id += 1;
            id
        } else {
            self.decycle()
        };
        self.live.set(id as usize);
        self.live_count += 1;
        Entity::new(id)
    }

    /// Destroys an entity, returning its id to the recycle ring. O(1).
    ///
    /// The caller must have torn down the entity's components first.
    ///
    /// # Returns
    ///
    /// `false` if the entity was not live (already destroyed, null, or
    /// out of range) - a defined no-op.
    pub fn destroy(&mut self, entity: Entity) -> bool {
        if !self.exists(entity) {
            return false;
        }
        self.live.clear(entity.id() as usize);
        self.live_count -= 1;
        self.encycle(entity.id());
        true
    }

    /// Checks whether `entity` is currently live. O(1).
    #[inline]
    #[must_use]
    pub fn exists(&self, entity: Entity) -> bool {
        !entity.is_null() && self.live.get(entity.id() as usize)
    }

    /// Iterates over all currently live entities, in id order.
    pub fn iter_live(&self) -> impl Iterator<Item = Entity> + '_ {
        (1..self.next_id)
            .filter(|&id| self.live.get(id as usize))
            .map(Entity::new)
    }

    fn encycle(&mut self, id: u32) {
        self.recycled[self.next_recycled] = id;
        self.next_recycled += 1;
        if self.next_recycled >= self.recycled.len() {
            self.next_recycled -= self.recycled.len();
        }
    }

    fn decycle(&mut self) -> u32 {
        let id = self.recycled[self.first_recycled];
        self.first_recycled += 1;
        if self.first_recycled >= self.recycled.len() {
            self.first_recycled -= self.recycled.len();
        }
        id
    }
}
