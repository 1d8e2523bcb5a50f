//! Trade-in box
//!
//! An ordered collection of fully configured devices a customer intends to
//! send in together. Identical configurations are kept as separate items since
//! each one stands for a physically distinct device.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

mod storage;

pub use storage::{
    BoxStorage, DEFAULT_IDLE_TTL, MemoryStorage, SessionId, SessionStorage, SessionStore,
};

/// Errors raised by box operations.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum BoxError {
    /// The backing store could not be read or written.
    #[error("box storage is unavailable")]
    StorageUnavailable,

    /// The sum of quoted prices does not fit in a `u64`.
    #[error("box total overflowed")]
    TotalOverflow,
}

/// Catalog references identifying one configured device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxSelection {
    /// Device model.
    pub model: Uuid,

    /// Condition tier.
    pub condition: Uuid,

    /// Carrier variant, if selected.
    pub carrier: Option<Uuid>,

    /// Storage variant, if selected.
    pub storage: Option<Uuid>,

    /// Original box included.
    pub has_box: bool,

    /// Original charger included.
    pub has_charger: bool,
}

/// Labels shown for a box item without another catalog lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxItemDisplay {
    /// Device model name.
    pub model_name: String,

    /// Brand name.
    pub brand: String,

    /// Category name.
    pub category: String,

    /// Product image URL.
    pub image_url: Option<String>,

    /// Condition tier name.
    pub condition_name: String,

    /// Carrier variant name.
    pub carrier_name: Option<String>,

    /// Storage variant name.
    pub storage_name: Option<String>,
}

/// One configured device in a box.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxItem {
    /// Generated identifier, unique within the box.
    pub id: Uuid,

    /// What was configured.
    pub selection: BoxSelection,

    /// Quote frozen when the item was added, in minor units.
    pub quoted_price: u64,

    /// Presentation labels.
    pub display: BoxItemDisplay,

    /// When the item was added.
    pub added_at: Timestamp,
}

impl BoxItem {
    /// Create an item with a fresh identifier.
    pub fn new(selection: BoxSelection, quoted_price: u64, display: BoxItemDisplay) -> Self {
        Self {
            id: Uuid::now_v7(),
            selection,
            quoted_price,
            display,
            added_at: Timestamp::now(),
        }
    }
}

/// Items plus their aggregate, read in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoxSummary {
    /// Items in insertion order.
    pub items: Vec<BoxItem>,

    /// Number of items.
    pub item_count: usize,

    /// Sum of quoted prices in minor units.
    pub total_price: u64,
}

/// A trade-in box over a storage strategy.
#[derive(Debug, Clone, Default)]
pub struct TradeInBox<S = MemoryStorage> {
    storage: S,
}

impl TradeInBox<MemoryStorage> {
    /// A box that keeps its items in memory.
    pub fn in_memory() -> Self {
        Self::new(MemoryStorage::default())
    }
}

impl<S: BoxStorage> TradeInBox<S> {
    /// A box backed by `storage`.
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    /// Append an item and return its identifier.
    ///
    /// # Errors
    ///
    /// Returns [`BoxError::StorageUnavailable`] if storage fails.
    pub fn add_item(&mut self, item: BoxItem) -> Result<Uuid, BoxError> {
        let id = item.id;

        self.storage.update(|items| items.push(item))?;

        Ok(id)
    }

    /// Remove the item with `id`, returning it; absent ids are a no-op.
    ///
    /// # Errors
    ///
    /// Returns [`BoxError::StorageUnavailable`] if storage fails.
    pub fn remove_item(&mut self, id: Uuid) -> Result<Option<BoxItem>, BoxError> {
        self.storage.update(|items| {
            items
                .iter()
                .position(|item| item.id == id)
                .map(|position| items.remove(position))
        })
    }

    /// Remove every item.
    ///
    /// # Errors
    ///
    /// Returns [`BoxError::StorageUnavailable`] if storage fails.
    pub fn clear(&mut self) -> Result<(), BoxError> {
        self.storage.update(Vec::clear)
    }

    /// Empty the box and hand back what it held, in one step.
    ///
    /// Two callers racing on the same box never both receive an item.
    ///
    /// # Errors
    ///
    /// Returns [`BoxError::StorageUnavailable`] if storage fails.
    pub fn take_items(&mut self) -> Result<Vec<BoxItem>, BoxError> {
        self.storage.update(std::mem::take)
    }

    /// Put previously taken items back ahead of anything added since.
    ///
    /// # Errors
    ///
    /// Returns [`BoxError::StorageUnavailable`] if storage fails.
    pub fn restore_items(&mut self, restored: Vec<BoxItem>) -> Result<(), BoxError> {
        self.storage.update(|items| {
            let added_since = std::mem::replace(items, restored);

            items.extend(added_since);
        })
    }

    /// Items in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`BoxError::StorageUnavailable`] if storage fails.
    pub fn items(&self) -> Result<Vec<BoxItem>, BoxError> {
        self.storage.load()
    }

    /// Number of items.
    ///
    /// # Errors
    ///
    /// Returns [`BoxError::StorageUnavailable`] if storage fails.
    pub fn item_count(&self) -> Result<usize, BoxError> {
        Ok(self.storage.load()?.len())
    }

    /// Sum of every item's quoted price, computed on each call.
    ///
    /// # Errors
    ///
    /// - [`BoxError::StorageUnavailable`]: storage failed.
    /// - [`BoxError::TotalOverflow`]: the sum does not fit in a `u64`.
    pub fn total_price(&self) -> Result<u64, BoxError> {
        total_of(&self.storage.load()?)
    }

    /// Items, count and total from a single read.
    ///
    /// # Errors
    ///
    /// - [`BoxError::StorageUnavailable`]: storage failed.
    /// - [`BoxError::TotalOverflow`]: the sum does not fit in a `u64`.
    pub fn summary(&self) -> Result<BoxSummary, BoxError> {
        let items = self.storage.load()?;
        let total_price = total_of(&items)?;

        Ok(BoxSummary {
            item_count: items.len(),
            total_price,
            items,
        })
    }
}

fn total_of(items: &[BoxItem]) -> Result<u64, BoxError> {
    items.iter().try_fold(0_u64, |total, item| {
        total
            .checked_add(item.quoted_price)
            .ok_or(BoxError::TotalOverflow)
    })
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    fn item(quoted_price: u64) -> BoxItem {
        BoxItem::new(
            BoxSelection {
                model: Uuid::nil(),
                condition: Uuid::nil(),
                carrier: None,
                storage: None,
                has_box: false,
                has_charger: false,
            },
            quoted_price,
            BoxItemDisplay::default(),
        )
    }

    #[test]
    fn empty_box_totals_zero() -> TestResult {
        let tradein = TradeInBox::in_memory();

        assert_eq!(tradein.total_price()?, 0);
        assert_eq!(tradein.item_count()?, 0);

        Ok(())
    }

    #[test]
    fn identical_items_are_kept_separately() -> TestResult {
        let mut tradein = TradeInBox::in_memory();
        let first = item(120_00);
        let second = BoxItem {
            id: Uuid::now_v7(),
            ..first.clone()
        };

        tradein.add_item(first)?;
        tradein.add_item(second)?;

        assert_eq!(tradein.item_count()?, 2);
        assert_eq!(tradein.total_price()?, 240_00);

        Ok(())
    }

    #[test]
    fn removing_an_item_subtracts_its_price() -> TestResult {
        let mut tradein = TradeInBox::in_memory();

        tradein.add_item(item(120_00))?;
        let cheaper = tradein.add_item(item(45_50))?;

        assert_eq!(tradein.item_count()?, 2);
        assert_eq!(tradein.total_price()?, 165_50);

        let removed = tradein.remove_item(cheaper)?;

        assert_eq!(removed.map(|item| item.quoted_price), Some(45_50));
        assert_eq!(tradein.item_count()?, 1);
        assert_eq!(tradein.total_price()?, 120_00);

        Ok(())
    }

    #[test]
    fn removing_unknown_item_is_a_no_op() -> TestResult {
        let mut tradein = TradeInBox::in_memory();

        tradein.add_item(item(10_00))?;

        assert_eq!(tradein.remove_item(Uuid::now_v7())?, None);
        assert_eq!(tradein.item_count()?, 1);

        Ok(())
    }

    #[test]
    fn clear_empties_the_box() -> TestResult {
        let mut tradein = TradeInBox::in_memory();

        tradein.add_item(item(10_00))?;
        tradein.add_item(item(20_00))?;
        tradein.clear()?;

        assert_eq!(tradein.item_count()?, 0);
        assert_eq!(tradein.total_price()?, 0);

        Ok(())
    }

    #[test]
    fn items_keep_insertion_order() -> TestResult {
        let mut tradein = TradeInBox::in_memory();

        let first = tradein.add_item(item(1_00))?;
        let second = tradein.add_item(item(2_00))?;

        let ids: Vec<Uuid> = tradein.items()?.into_iter().map(|item| item.id).collect();

        assert_eq!(ids, [first, second]);

        Ok(())
    }

    #[test]
    fn overflowing_total_is_reported() -> TestResult {
        let mut tradein = TradeInBox::in_memory();

        tradein.add_item(item(u64::MAX))?;
        tradein.add_item(item(1))?;

        assert_eq!(tradein.total_price(), Err(BoxError::TotalOverflow));

        Ok(())
    }

    #[test]
    fn session_boxes_survive_new_handles() -> TestResult {
        let store = SessionStore::new();
        let session = Uuid::now_v7();

        TradeInBox::new(store.session(session)).add_item(item(99_00))?;

        let reopened = TradeInBox::new(store.session(session));

        assert_eq!(reopened.total_price()?, 99_00);
        assert_eq!(store.active_sessions()?, 1);

        Ok(())
    }

    #[test]
    fn sessions_do_not_share_items() -> TestResult {
        let store = SessionStore::new();

        TradeInBox::new(store.session(Uuid::now_v7())).add_item(item(5_00))?;

        let other = TradeInBox::new(store.session(Uuid::now_v7()));

        assert_eq!(other.item_count()?, 0);

        Ok(())
    }

    #[test]
    fn clearing_a_session_releases_it() -> TestResult {
        let store = SessionStore::new();
        let mut tradein = TradeInBox::new(store.session(Uuid::now_v7()));

        tradein.add_item(item(5_00))?;
        tradein.clear()?;

        assert_eq!(store.active_sessions()?, 0);

        Ok(())
    }

    #[test]
    fn summary_matches_individual_reads() -> TestResult {
        let mut tradein = TradeInBox::in_memory();

        tradein.add_item(item(120_00))?;
        tradein.add_item(item(45_50))?;

        let summary = tradein.summary()?;

        assert_eq!(summary.item_count, tradein.item_count()?);
        assert_eq!(summary.total_price, tradein.total_price()?);

        Ok(())
    }

    #[test]
    fn taken_items_can_be_restored_in_order() -> TestResult {
        let mut tradein = TradeInBox::in_memory();

        let first = tradein.add_item(item(1_00))?;
        let second = tradein.add_item(item(2_00))?;

        let taken = tradein.take_items()?;

        assert_eq!(tradein.item_count()?, 0);

        let later = tradein.add_item(item(3_00))?;

        tradein.restore_items(taken)?;

        let ids: Vec<Uuid> = tradein.items()?.into_iter().map(|item| item.id).collect();

        assert_eq!(ids, [first, second, later]);
        assert_eq!(tradein.total_price()?, 6_00);

        Ok(())
    }

    #[test]
    fn concurrent_adds_to_one_session_are_all_kept() -> TestResult {
        const THREADS: usize = 16;
        const ADDS_PER_THREAD: usize = 200;

        let store = SessionStore::new();
        let session = Uuid::now_v7();

        std::thread::scope(|scope| {
            let workers: Vec<_> = (0..THREADS)
                .map(|_| {
                    let storage = store.session(session);

                    scope.spawn(move || -> Result<(), BoxError> {
                        let mut tradein = TradeInBox::new(storage);

                        for _ in 0..ADDS_PER_THREAD {
                            tradein.add_item(item(10_00))?;
                        }

                        Ok(())
                    })
                })
                .collect();

            workers.into_iter().try_for_each(|worker| {
                worker
                    .join()
                    .map_err(|_panicked| BoxError::StorageUnavailable)?
            })
        })?;

        let tradein = TradeInBox::new(store.session(session));
        let expected = THREADS * ADDS_PER_THREAD;

        assert_eq!(tradein.item_count()?, expected);
        assert_eq!(tradein.total_price()?, u64::try_from(expected)? * 10_00);

        Ok(())
    }

    #[test]
    fn concurrent_takes_never_hand_out_an_item_twice() -> TestResult {
        const ITEMS: usize = 500;
        const TAKERS: usize = 8;

        let store = SessionStore::new();
        let session = Uuid::now_v7();
        let mut tradein = TradeInBox::new(store.session(session));

        for _ in 0..ITEMS {
            tradein.add_item(item(1_00))?;
        }

        let taken = std::thread::scope(|scope| {
            let takers: Vec<_> = (0..TAKERS)
                .map(|_| {
                    let storage = store.session(session);

                    scope.spawn(move || TradeInBox::new(storage).take_items())
                })
                .collect();

            takers.into_iter().try_fold(0, |total, taker| {
                let items = taker
                    .join()
                    .map_err(|_panicked| BoxError::StorageUnavailable)??;

                Ok::<_, BoxError>(total + items.len())
            })
        })?;

        assert_eq!(taken, ITEMS);
        assert_eq!(tradein.item_count()?, 0);

        Ok(())
    }
}
