//! Per-view dataset cache.
//!
//! Each dataset is fetched at most once per session. Concurrent `load` calls for
//! the same view share one in-flight request and receive the same `Rc<Dataset>`.
//! Everything runs on one thread, so the cache is a plain `RefCell` map.

use async_trait::async_trait;
use futures::future::{join_all, FutureExt, LocalBoxFuture, Shared};
use std::cell::RefCell;
use std::collections::HashMap;
use std::ops::Deref;
use std::rc::Rc;

use crate::domain::sector::{Dataset, SectorTable};
use crate::enums::{NafLevel, ViewId};
use crate::shared::errors::{DataError, DataResult};

/// Where datasets come from (HTTP in the browser, files in tooling)
#[async_trait(?Send)]
pub trait DatasetSource {
    async fn fetch(&self, view: ViewId) -> DataResult<Dataset>;
}

type LoadFlight = Shared<LocalBoxFuture<'static, DataResult<Rc<Dataset>>>>;

enum Slot {
    Pending(LoadFlight),
    Ready(Rc<Dataset>),
}

/// Memoizing dataset store. Cloning shares the same cache.
#[derive(Clone)]
pub struct DatasetStore {
    source: Rc<dyn DatasetSource>,
    slots: Rc<RefCell<HashMap<ViewId, Slot>>>,
}

impl DatasetStore {
    pub fn new(source: impl DatasetSource + 'static) -> Self {
        Self {
            source: Rc::new(source),
            slots: Rc::new(RefCell::new(HashMap::new())),
        }
    }

    /// Loads a view's dataset, reusing the cached or in-flight one.
    ///
    /// A failed flight is dropped from the cache so every waiter sees the same
    /// error and the other views are unaffected.
    pub async fn load(&self, view: ViewId) -> DataResult<Rc<Dataset>> {
        let flight = {
            let mut slots = self.slots.borrow_mut();
            match slots.get(&view) {
                Some(Slot::Ready(dataset)) => return Ok(Rc::clone(dataset)),
                Some(Slot::Pending(flight)) => flight.clone(),
                None => {
                    log::debug!("fetching {} dataset", view);
                    let source = Rc::clone(&self.source);
                    let flight = async move { source.fetch(view).await.map(Rc::new) }
                        .boxed_local()
                        .shared();
                    slots.insert(view, Slot::Pending(flight.clone()));
                    flight
                }
            }
        };

        let result = flight.clone().await;

        let mut slots = self.slots.borrow_mut();
        let ours = matches!(slots.get(&view), Some(Slot::Pending(p)) if p.ptr_eq(&flight));
        match &result {
            Ok(dataset) if ours => {
                log::info!(
                    "{} dataset loaded: {} naf2, {} naf4, {} naf5 codes",
                    view,
                    dataset.by_naf2.len(),
                    dataset.by_naf4.len(),
                    dataset.by_naf5.len()
                );
                slots.insert(view, Slot::Ready(Rc::clone(dataset)));
            }
            Err(err) if ours => {
                log::error!("{}", err);
                slots.remove(&view);
            }
            _ => {}
        }
        result
    }

    /// Loads several views concurrently and waits for all of them
    pub async fn load_all(&self, views: &[ViewId]) -> Vec<(ViewId, DataResult<Rc<Dataset>>)> {
        let results = join_all(views.iter().map(|view| self.load(*view))).await;
        views.iter().copied().zip(results).collect()
    }

    pub fn is_loaded(&self, view: ViewId) -> bool {
        matches!(self.slots.borrow().get(&view), Some(Slot::Ready(_)))
    }

    /// Dataset of a view that finished loading
    pub fn get_dataset(&self, view: ViewId) -> DataResult<Rc<Dataset>> {
        match self.slots.borrow().get(&view) {
            Some(Slot::Ready(dataset)) => Ok(Rc::clone(dataset)),
            _ => Err(DataError::NotLoaded(view)),
        }
    }

    /// Lookup table of a loaded view; `level` is the wire name (`naf2`, `naf4`, `naf5`)
    pub fn get_table(&self, view: ViewId, level: &str) -> DataResult<TableRef> {
        let level: NafLevel = level.parse()?;
        let dataset = self.get_dataset(view)?;
        Ok(TableRef { dataset, level })
    }
}

/// Borrow-free handle on one table of a cached dataset
#[derive(Clone)]
pub struct TableRef {
    dataset: Rc<Dataset>,
    level: NafLevel,
}

impl TableRef {
    pub fn level(&self) -> NafLevel {
        self.level
    }
}

impl Deref for TableRef {
    type Target = SectorTable;

    fn deref(&self) -> &SectorTable {
        self.dataset.table(self.level)
    }
}
