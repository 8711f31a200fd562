//! # Unit Factory
//!
//! Spawns prototype-defined units into an [`EntityComponentManager`].
//!
//! The factory owns nothing: it borrows a validated catalog and is
//! handed the manager per call, so any number of managers (main world,
//! forked battles) can spawn from the same tables.

use warband_core::{
    CommanderComponent, Entity, EntityComponentManager, ExperienceComponent, FormComponent,
    UnitComponent,
};

use crate::prototypes::PrototypeCatalog;

/// Spawns units from catalog prototypes.
pub struct UnitFactory<'a> {
    catalog: &'a PrototypeCatalog,
}

impl<'a> UnitFactory<'a> {
    /// Creates a factory over a validated catalog.
    #[must_use]
    pub const fn new(catalog: &'a PrototypeCatalog) -> Self {
        Self { catalog }
    }

    /// Spawns one unit from the prototype with the given 1-based id.
    ///
    /// Attaches the unit, form, and experience records, plus a commander
    /// record when the prototype carries a command rating.
    ///
    /// # Returns
    ///
    /// The new entity, or `None` if the prototype id is unknown or the
    /// manager is out of entity or record capacity. Capacity exhaustion
    /// is a sizing error and is logged as such before the partial spawn
    /// is torn down.
    pub fn spawn(&self, manager: &mut EntityComponentManager, prototype: u16) -> Option<Entity> {
        let unit = self.catalog.unit(prototype)?;
        let form = self.catalog.form(unit.form)?;

        let entity = manager.create_entity();
        if entity.is_null() {
            tracing::warn!(prototype, "entity id space exhausted, spawn aborted");
            return None;
        }

        let mut stored = manager.attach(
            entity,
            UnitComponent {
                prototype,
                form: unit.form,
            },
        );
        stored &= manager.attach(
            entity,
            FormComponent {
                body: form.body,
                attributes: form.attributes,
            },
        );
        stored &= manager.attach(entity, ExperienceComponent { xp: 0, level: 1 });
        if unit.command > 0 {
            stored &= manager.attach(
                entity,
                CommanderComponent {
                    command: unit.command,
                    morale: unit.morale,
                },
            );
        }

        if !stored {
            tracing::error!(
                prototype,
                entity = entity.id(),
                "record capacity exhausted while spawning, tearing the unit back down"
            );
            manager.destroy_entity(entity);
            return None;
        }
        Some(entity)
    }

    /// Spawns one unit by prototype name.
    pub fn spawn_by_name(
        &self,
        manager: &mut EntityComponentManager,
        name: &str,
    ) -> Option<Entity> {
        let prototype = self.catalog.find_unit(name)?;
        self.spawn(manager, prototype)
    }

    /// Spawns `count` units of the same prototype.
    ///
    /// Stops early if a spawn fails; the returned handles are all live.
    pub fn spawn_many(
        &self,
        manager: &mut EntityComponentManager,
        prototype: u16,
        count: usize,
    ) -> Vec<Entity> {
        let mut spawned = Vec::with_capacity(count);
        for _ in 0..count {
            match self.spawn(manager, prototype) {
                Some(entity) => spawned.push(entity),
                None => break,
            }
        }
        spawned
    }
}
