//! Active view and per-view selection.
//!
//! Every transition that touches a selection, the active view or the URL is
//! reported to the registered listeners. The state never writes the URL itself;
//! it hands the wanted fragment to the listeners.

use std::rc::Rc;

use super::route::format_route;
use crate::domain::sector::resolver::{locate, resolve};
use crate::domain::sector::{Dataset, NationalBaseline, SectorRecord};
use crate::enums::{NafLevel, ViewId};
use crate::shared::data_store::DatasetStore;
use crate::shared::errors::DataResult;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub code: Option<String>,
    pub level: NafLevel,
    /// Highlighted suggestion, `None` when nothing is highlighted
    pub highlight: Option<usize>,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            code: None,
            level: NafLevel::Naf2,
            highlight: None,
        }
    }
}

/// Notification sent after a transition
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionChange {
    /// View whose selection changed
    pub view: ViewId,
    pub active: ViewId,
    /// Fragment the URL should show, when it has to change
    pub fragment: Option<String>,
    /// The change follows the URL rather than the user: rewrite the current
    /// history entry instead of adding one
    pub replace: bool,
}

/// Outcome of [`DashboardState::change_level`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelChange {
    Selected(String),
    /// The current code has no counterpart at the new level; the selection was cleared
    NoEquivalent,
    NoSelection,
}

/// Everything a renderer needs for the active view
#[derive(Debug, Clone)]
pub struct ActiveSelection {
    pub view: ViewId,
    pub code: String,
    pub level: NafLevel,
    pub record: SectorRecord,
    pub dataset: Rc<Dataset>,
}

impl ActiveSelection {
    pub fn national(&self) -> &NationalBaseline {
        self.dataset.national()
    }
}

type Listener = Box<dyn Fn(&SelectionChange)>;

pub struct DashboardState {
    store: DatasetStore,
    active: ViewId,
    selections: [Selection; 3],
    listeners: Vec<Listener>,
    routing: bool,
}

fn slot(view: ViewId) -> usize {
    match view {
        ViewId::At => 0,
        ViewId::Mp => 1,
        ViewId::Trajet => 2,
    }
}

impl DashboardState {
    pub fn new(store: DatasetStore) -> Self {
        Self {
            store,
            active: ViewId::At,
            selections: Default::default(),
            listeners: Vec::new(),
            routing: false,
        }
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    pub fn active_view(&self) -> ViewId {
        self.active
    }

    pub fn selection(&self, view: ViewId) -> &Selection {
        &self.selections[slot(view)]
    }

    fn selection_mut(&mut self, view: ViewId) -> &mut Selection {
        &mut self.selections[slot(view)]
    }

    pub fn on_selection_changed(&mut self, listener: impl Fn(&SelectionChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    fn notify(&self, view: ViewId, fragment: Option<String>) {
        let change = SelectionChange {
            view,
            active: self.active,
            fragment,
            replace: self.routing,
        };
        for listener in &self.listeners {
            listener(&change);
        }
    }

    /// Selects a code that the caller already checked against the view's tables
    pub fn select_code(&mut self, view: ViewId, code: &str, level: NafLevel) {
        log::debug!("{}: select {} ({})", view, code, level);
        let selection = self.selection_mut(view);
        selection.code = Some(code.to_string());
        selection.level = level;
        selection.highlight = None;
        self.notify(view, Some(format_route(view, Some(code))));
    }

    /// Changes the level tab without touching the code
    pub fn set_level(&mut self, view: ViewId, level: NafLevel) {
        self.selection_mut(view).level = level;
        self.notify(view, None);
    }

    /// Changes the level and moves the current code to its counterpart there
    pub fn change_level(&mut self, view: ViewId, level: NafLevel) -> DataResult<LevelChange> {
        self.selection_mut(view).level = level;
        let Some(code) = self.selection(view).code.clone() else {
            self.notify(view, None);
            return Ok(LevelChange::NoSelection);
        };

        let dataset = self.store.get_dataset(view)?;
        match resolve(&dataset, &code, level) {
            Some(found) => {
                self.select_code(view, &found, level);
                Ok(LevelChange::Selected(found))
            }
            None => {
                log::debug!("{}: no {} equivalent for {}", view, level, code);
                self.selection_mut(view).code = None;
                self.notify(view, Some(format_route(view, None)));
                Ok(LevelChange::NoEquivalent)
            }
        }
    }

    /// Activates a view. When it has no selection yet, the previous view's code
    /// is carried over if the new view knows it.
    ///
    /// Returns `false` when the view was already active.
    pub fn switch_view(&mut self, view: ViewId) -> bool {
        if view == self.active {
            return false;
        }
        let previous = std::mem::replace(&mut self.active, view);

        if self.selection(view).code.is_none() {
            if let Some(code) = self.selection(previous).code.clone() {
                let carried = self
                    .store
                    .get_dataset(view)
                    .ok()
                    .and_then(|dataset| locate(&dataset, &code));
                match carried {
                    Some((level, found)) => {
                        let selection = self.selection_mut(view);
                        selection.code = Some(found);
                        selection.level = level;
                        selection.highlight = None;
                    }
                    None => log::debug!("{}: {} not carried over from {}", view, code, previous),
                }
            }
        }

        let fragment = format_route(view, self.selection(view).code.as_deref());
        self.notify(view, Some(fragment));
        true
    }

    /// Activates a view without carrying the previous selection
    pub(crate) fn activate(&mut self, view: ViewId) -> bool {
        if view == self.active {
            return false;
        }
        self.active = view;
        true
    }

    pub(crate) fn set_routing(&mut self, routing: bool) {
        self.routing = routing;
    }

    pub(crate) fn notify_view(&self, view: ViewId) {
        self.notify(view, None);
    }

    pub fn clear_selection(&mut self, view: ViewId) {
        let selection = self.selection_mut(view);
        selection.code = None;
        selection.highlight = None;
        self.notify(view, Some(format_route(view, None)));
    }

    pub fn move_highlight_down(&mut self, view: ViewId, len: usize) -> Option<usize> {
        let selection = self.selection_mut(view);
        selection.highlight = match (len, selection.highlight) {
            (0, _) => None,
            (_, None) => Some(0),
            (len, Some(index)) => Some((index + 1).min(len - 1)),
        };
        selection.highlight
    }

    pub fn move_highlight_up(&mut self, view: ViewId) -> Option<usize> {
        let selection = self.selection_mut(view);
        selection.highlight = Some(selection.highlight.map_or(0, |index| index.saturating_sub(1)));
        selection.highlight
    }

    /// Called whenever suggestions are recomputed or closed
    pub fn reset_highlight(&mut self, view: ViewId) {
        self.selection_mut(view).highlight = None;
    }

    /// Suggestion Enter should pick
    pub fn highlighted_or_first(&self, view: ViewId) -> usize {
        self.selection(view).highlight.unwrap_or(0)
    }

    pub fn active_selection(&self) -> Option<ActiveSelection> {
        let view = self.active;
        let selection = self.selection(view);
        let code = selection.code.clone()?;
        let dataset = self.store.get_dataset(view).ok()?;
        let record = dataset.record(selection.level, &code)?.clone();
        Some(ActiveSelection {
            view,
            code,
            level: selection.level,
            record,
            dataset,
        })
    }
}
