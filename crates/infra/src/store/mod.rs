//! Module stores: the host platform's per-entity services (create, read,
//! update, delete), modelled as a trait with an in-memory implementation for tests/dev.

pub mod module_store;

pub use module_store::{InMemoryModuleStore, ModuleStore, StoreError};

use tracing::debug;

use pricebook_brands::Brand;
use pricebook_core::{BrandId, Entity, PriceSetId};
use pricebook_pricing::PriceSet;

pub type BrandStore = dyn ModuleStore<BrandId, Brand>;
pub type PriceSetStore = dyn ModuleStore<PriceSetId, PriceSet>;

/// Insert `entity` under its own id and return that id.
pub fn insert_entity<E, S>(store: &S, entity: E) -> Result<E::Id, StoreError>
where
    E: Entity,
    S: ModuleStore<E::Id, E> + ?Sized,
{
    let id = entity.id().clone();
    store.insert(id.clone(), entity)?;
    debug!(kind = E::KIND, id = %id, "record stored");
    Ok(id)
}

/// Replace the stored record with the same id as `entity`.
pub fn update_entity<E, S>(store: &S, entity: E) -> Result<(), StoreError>
where
    E: Entity,
    S: ModuleStore<E::Id, E> + ?Sized,
{
    let id = entity.id().clone();
    store.update(&id, entity)?;
    debug!(kind = E::KIND, id = %id, "record updated");
    Ok(())
}

/// Delete by id; a record that is already gone counts as deleted.
pub fn remove_entity<E, S>(store: &S, id: &E::Id) -> Result<(), StoreError>
where
    E: Entity,
    S: ModuleStore<E::Id, E> + ?Sized,
{
    match store.delete(id) {
        Ok(_) => {
            debug!(kind = E::KIND, id = %id, "record removed");
            Ok(())
        }
        Err(StoreError::NotFound(_)) => Ok(()),
        Err(e) => Err(e),
    }
}
