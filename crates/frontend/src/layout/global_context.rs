use contracts::dashboards::d410_sector_risk::{
    ActiveSelection, DashboardState, LevelChange, Route,
};
use contracts::enums::{NafLevel, ViewId};
use contracts::shared::data_store::DatasetStore;
use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::routes::hash_sync;
use crate::shared::config::DashboardConfig;
use crate::shared::data::HttpDatasetSource;

/// Dashboard state shared with every component through context.
///
/// The state itself is not `Send`, so it lives in a local `StoredValue`;
/// `version` is bumped on every selection change and is what components track.
#[derive(Clone, Copy)]
pub struct AppGlobalContext {
    state: StoredValue<DashboardState, LocalStorage>,
    config: StoredValue<DashboardConfig>,
    pub version: RwSignal<u64>,
    pub ready: RwSignal<bool>,
    pub load_errors: RwSignal<Vec<String>>,
    /// Transient message under the level tabs
    pub notice: RwSignal<Option<String>>,
}

impl AppGlobalContext {
    pub fn new(config: DashboardConfig) -> Self {
        let store = DatasetStore::new(HttpDatasetSource::new(config.data_base.clone()));
        let mut state = DashboardState::new(store);

        let version = RwSignal::new(0u64);
        state.on_selection_changed(move |change| {
            if let Some(fragment) = &change.fragment {
                hash_sync::write_fragment(fragment, change.replace);
            }
            version.update(|v| *v += 1);
        });

        Self {
            state: StoredValue::new_local(state),
            config: StoredValue::new(config),
            version,
            ready: RwSignal::new(false),
            load_errors: RwSignal::new(vec![]),
            notice: RwSignal::new(None),
        }
    }

    pub fn config(&self) -> DashboardConfig {
        self.config.get_value()
    }

    /// Reads the state and subscribes the caller to selection changes
    pub fn with_state<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        self.version.track();
        self.state.with_value(f)
    }

    pub fn with_state_untracked<R>(&self, f: impl FnOnce(&DashboardState) -> R) -> R {
        self.state.with_value(f)
    }

    pub fn update_state(&self, f: impl FnOnce(&mut DashboardState)) {
        self.state.update_value(f);
    }

    pub fn active_view(&self) -> ViewId {
        self.with_state(|s| s.active_view())
    }

    pub fn active_selection(&self) -> Option<ActiveSelection> {
        self.with_state(|s| s.active_selection())
    }

    pub fn switch_view(&self, view: ViewId) {
        self.notice.set(None);
        self.update_state(|s| {
            s.switch_view(view);
        });
    }

    pub fn select(&self, code: &str, level: NafLevel) {
        self.notice.set(None);
        self.update_state(|s| {
            let view = s.active_view();
            s.select_code(view, code, level);
        });
    }

    pub fn change_level(&self, level: NafLevel) {
        let mut outcome = None;
        self.update_state(|s| {
            let view = s.active_view();
            outcome = Some(s.change_level(view, level));
        });
        match outcome {
            Some(Ok(LevelChange::NoEquivalent)) => {
                self.notice.set(Some("Aucun secteur équivalent à ce niveau".to_string()))
            }
            Some(Err(err)) => {
                log::error!("{}", err);
                self.notice.set(Some(err.to_string()));
            }
            _ => self.notice.set(None),
        }
    }

    /// Fetches the three datasets, then restores the selection from the URL and
    /// starts following fragment changes.
    pub fn load_datasets(&self) {
        let this = *self;
        let store = self.with_state_untracked(|s| s.store().clone());
        spawn_local(async move {
            let results = store.load_all(&ViewId::all()).await;
            let errors: Vec<String> = results
                .into_iter()
                .filter_map(|(_, result)| result.err())
                .map(|err| err.to_string())
                .collect();
            this.load_errors.set(errors);
            this.ready.set(true);
            this.init_router_integration();
        });
    }

    pub fn init_router_integration(&self) {
        let this = *self;
        this.apply_route(hash_sync::current_route());
        hash_sync::on_hash_change(move |route| this.apply_route(route));
    }

    fn apply_route(&self, route: Route) {
        log::debug!("route: {:?}", route);
        self.update_state(|s| route.apply(s));
    }
}
