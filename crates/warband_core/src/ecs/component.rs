//! # Component Records
//!
//! Components are fixed-size, plain-data records with no behavior. Each
//! record type is bound to one [`ComponentKind`] bit so a per-entity
//! bitmask can answer "has this kind?" without touching the record maps.
//!
//! The all-zero default of every record is the "absent" sentinel - the
//! slot maps never store it, and attaching it is identical to removal.

use bytemuck::{Pod, Zeroable};

use super::manager::EntityComponentManager;
use crate::collections::SlotMap;

/// Tag identifying one of the component record types.
///
/// At most 16 kinds fit the archetype mask; this engine declares four.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum ComponentKind {
    /// Battlefield unit identity ([`UnitComponent`]).
    Unit = 0,
    /// Command and morale stats ([`CommanderComponent`]).
    Commander = 1,
    /// Physical form references ([`FormComponent`]).
    Form = 2,
    /// Progression counters ([`ExperienceComponent`]).
    Experience = 3,
}

impl ComponentKind {
    /// Number of declared kinds.
    pub const COUNT: usize = 4;

    /// Every declared kind, in bit order.
    pub const ALL: [Self; Self::COUNT] =
        [Self::Unit, Self::Commander, Self::Form, Self::Experience];

    /// Returns this kind's bit in an archetype mask.
    #[inline]
    #[must_use]
    pub const fn bit(self) -> u16 {
        1 << (self as u16)
    }
}

/// Per-entity bitmask recording which component kinds are attached.
///
/// Bit `K` is set iff the entity currently has a live `K` record. The
/// empty mask is the type's default, so it is never stored - an entity
/// with no components simply has no archetype entry.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(transparent)]
pub struct ArchetypeMask(u16);

impl ArchetypeMask {
    /// The mask with no kinds set.
    pub const EMPTY: Self = Self(0);

    /// Builds a mask covering every kind in `kinds`.
    #[must_use]
    pub fn from_kinds(kinds: &[ComponentKind]) -> Self {
        Self(kinds.iter().fold(0, |mask, kind| mask | kind.bit()))
    }

    /// Returns this mask with `kind`'s bit set.
    #[inline]
    #[must_use]
    pub const fn with(self, kind: ComponentKind) -> Self {
        Self(self.0 | kind.bit())
    }

    /// Returns this mask with `kind`'s bit cleared.
    #[inline]
    #[must_use]
    pub const fn without(self, kind: ComponentKind) -> Self {
        Self(self.0 & !kind.bit())
    }

    /// Checks whether `kind`'s bit is set.
    #[inline]
    #[must_use]
    pub const fn has(self, kind: ComponentKind) -> bool {
        self.0 & kind.bit() != 0
    }

    /// Checks whether every bit of `other` is set in `self`.
    #[inline]
    #[must_use]
    pub const fn contains_all(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Checks whether no kinds are set.
    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// A fixed-size component record bound to its [`ComponentKind`].
///
/// The store accessors are the explicit seam between a record type and
/// the manager field that holds it - type-to-storage selection happens
/// at compile time, with no type map or downcasting.
pub trait Record: Copy + Default + PartialEq + Pod + Zeroable {
    /// The kind bit this record occupies in the archetype mask.
    const KIND: ComponentKind;

    /// Borrows this record's slot map from the manager.
    fn slots(manager: &EntityComponentManager) -> &SlotMap<Self>;

    /// Mutably borrows this record's slot map from the manager.
    fn slots_mut(manager: &mut EntityComponentManager) -> &mut SlotMap<Self>;
}

/// Marks an entity as a battlefield unit.
///
/// Prototype ids are 1-based (the catalog reserves 0), so a real unit
/// record is never all-zero.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct UnitComponent {
    /// 1-based unit prototype id; 0 = none.
    pub prototype: u16,
    /// 1-based prototype id of the unit's current form.
    pub form: u16,
}

/// Command and morale stats for units that can lead.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct CommanderComponent {
    /// Command rating; 0 means the unit cannot lead.
    pub command: u8,
    /// Morale modifier applied to led units.
    pub morale: i8,
}

/// Physical form of a unit: body plan and attribute line references.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct FormComponent {
    /// 1-based body prototype id.
    pub body: u16,
    /// 1-based attribute line id.
    pub attributes: u16,
}

/// Progression counters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
#[repr(C)]
pub struct ExperienceComponent {
    /// Accumulated experience points.
    pub xp: u16,
    /// Current level; live units start at 1.
    pub level: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_sizes_stay_fixed() {
        // The density story depends on records staying word-sized.
        assert_eq!(std::mem::size_of::<UnitComponent>(), 4);
        assert_eq!(std::mem::size_of::<CommanderComponent>(), 2);
        assert_eq!(std::mem::size_of::<FormComponent>(), 4);
        assert_eq!(std::mem::size_of::<ExperienceComponent>(), 4);
        assert_eq!(std::mem::size_of::<ArchetypeMask>(), 2);
    }

    #[test]
    fn test_mask_bit_ops() {
        let mask = ArchetypeMask::EMPTY
            .with(ComponentKind::Unit)
            .with(ComponentKind::Form);
        assert!(mask.has(ComponentKind::Unit));
        assert!(mask.has(ComponentKind::Form));
        assert!(!mask.has(ComponentKind::Commander));

        let mask = mask.without(ComponentKind::Unit);
        assert!(!mask.has(ComponentKind::Unit));
        assert!(mask.has(ComponentKind::Form));
    }

    #[test]
    fn test_mask_contains_all() {
        let have = ArchetypeMask::from_kinds(&[ComponentKind::Unit, ComponentKind::Form]);
        let want_both = ArchetypeMask::from_kinds(&[ComponentKind::Unit, ComponentKind::Form]);
        let want_more = want_both.with(ComponentKind::Experience);
        assert!(have.contains_all(want_both));
        assert!(have.contains_all(ArchetypeMask::EMPTY));
        assert!(!have.contains_all(want_more));
    }

    #[test]
    fn test_default_mask_is_empty() {
        assert!(ArchetypeMask::default().is_empty());
        assert_eq!(ArchetypeMask::default(), ArchetypeMask::EMPTY);
    }
}
