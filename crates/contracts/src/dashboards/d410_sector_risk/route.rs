//! URL fragment routes: `#<view>/<code>`, `#<view>`, or a legacy bare `#<code>`
//! which always means the `at` view.

use super::state::DashboardState;
use crate::domain::sector::resolver::locate;
use crate::enums::ViewId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Noop,
    /// `code` is `None` for a plain view switch
    Navigate { view: ViewId, code: Option<String> },
}

impl Route {
    pub fn parse(fragment: &str) -> Route {
        let fragment = fragment.trim();
        let fragment = fragment.strip_prefix('#').unwrap_or(fragment).trim();
        if fragment.is_empty() {
            return Route::Noop;
        }

        for view in ViewId::all() {
            if let Some(rest) = fragment
                .strip_prefix(view.code())
                .and_then(|rest| rest.strip_prefix('/'))
            {
                let code = (!rest.is_empty()).then(|| rest.to_string());
                return Route::Navigate { view, code };
            }
            if fragment == view.code() {
                return Route::Navigate { view, code: None };
            }
        }

        Route::Navigate {
            view: ViewId::At,
            code: Some(fragment.to_string()),
        }
    }

    /// Applies the route to the state. A code unknown to the view is dropped
    /// silently; the view switch still happens.
    ///
    /// Changes made here are flagged `replace`: the URL already holds this route,
    /// only its spelling may change.
    pub fn apply(&self, state: &mut DashboardState) {
        state.set_routing(true);
        self.apply_inner(state);
        state.set_routing(false);
    }

    fn apply_inner(&self, state: &mut DashboardState) {
        let (view, code) = match self {
            Route::Noop => return,
            Route::Navigate { view, code: None } => {
                state.switch_view(*view);
                return;
            }
            Route::Navigate {
                view,
                code: Some(code),
            } => (*view, code),
        };

        let switched = state.activate(view);
        let located = state
            .store()
            .get_dataset(view)
            .ok()
            .and_then(|dataset| locate(&dataset, code));
        match located {
            Some((level, found)) => state.select_code(view, &found, level),
            None => {
                log::warn!("route {}/{}: unknown code", view, code);
                if switched {
                    state.notify_view(view);
                }
            }
        }
    }
}

pub fn format_route(view: ViewId, code: Option<&str>) -> String {
    match code {
        Some(code) => format!("{}/{}", view, code),
        None => view.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sector::fixtures::FixtureSource;
    use crate::enums::NafLevel;
    use crate::shared::data_store::DatasetStore;
    use crate::dashboards::d410_sector_risk::SelectionChange;
    use futures::executor::block_on;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn navigate(view: ViewId, code: Option<&str>) -> Route {
        Route::Navigate {
            view,
            code: code.map(str::to_string),
        }
    }

    fn loaded_state() -> DashboardState {
        let store = DatasetStore::new(FixtureSource);
        block_on(store.load_all(&ViewId::all()));
        DashboardState::new(store)
    }

    fn recorded(state: &mut DashboardState) -> Rc<RefCell<Vec<SelectionChange>>> {
        let changes = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&changes);
        state.on_selection_changed(move |change| sink.borrow_mut().push(change.clone()));
        changes
    }

    #[test]
    fn test_parse() {
        assert_eq!(Route::parse("#mp/4711D"), navigate(ViewId::Mp, Some("4711D")));
        assert_eq!(Route::parse("trajet/47"), navigate(ViewId::Trajet, Some("47")));
        assert_eq!(Route::parse("#trajet"), navigate(ViewId::Trajet, None));
        assert_eq!(Route::parse("#at/"), navigate(ViewId::At, None));
        assert_eq!(Route::parse("  #  "), Route::Noop);
        assert_eq!(Route::parse(""), Route::Noop);
    }

    #[test]
    fn test_parse_trims_around_hash() {
        assert_eq!(Route::parse(" #at/6201Z"), navigate(ViewId::At, Some("6201Z")));
        assert_eq!(Route::parse("\t# mp \n"), navigate(ViewId::Mp, None));
        assert_eq!(Route::parse("  #  "), Route::Noop);
    }

    #[test]
    fn test_legacy_bare_code_means_at() {
        assert_eq!(Route::parse("#4711D"), navigate(ViewId::At, Some("4711D")));
        assert_eq!(Route::parse("#mpx"), navigate(ViewId::At, Some("mpx")));
    }

    #[test]
    fn test_format_round_trip() {
        for view in ViewId::all() {
            for code in [None, Some("6201Z"), Some("47")] {
                let fragment = format_route(view, code);
                assert_eq!(Route::parse(&format!("#{}", fragment)), navigate(view, code));
            }
        }
    }

    #[test]
    fn test_apply_exact_code() {
        let mut state = loaded_state();
        Route::parse("#at/6201Z").apply(&mut state);

        let selection = state.selection(ViewId::At);
        assert_eq!(selection.code.as_deref(), Some("6201Z"));
        assert_eq!(selection.level, NafLevel::Naf5);
    }

    #[test]
    fn test_apply_retries_upper_case() {
        let mut state = loaded_state();
        Route::parse("#6201z").apply(&mut state);

        let selection = state.selection(ViewId::At);
        assert_eq!(selection.code.as_deref(), Some("6201Z"));
        assert_eq!(selection.level, NafLevel::Naf5);
    }

    #[test]
    fn test_apply_unknown_code_switches_view_only() {
        let mut state = loaded_state();
        Route::parse("#mp/6201Z").apply(&mut state);

        assert_eq!(state.active_view(), ViewId::Mp);
        assert_eq!(state.selection(ViewId::Mp).code, None);
    }

    #[test]
    fn test_apply_code_route_does_not_carry() {
        let mut state = loaded_state();
        state.select_code(ViewId::At, "4711D", NafLevel::Naf5);

        Route::parse("#mp/47").apply(&mut state);

        let selection = state.selection(ViewId::Mp);
        assert_eq!(selection.code.as_deref(), Some("47"));
        assert_eq!(selection.level, NafLevel::Naf2);
    }

    #[test]
    fn test_apply_view_route_carries() {
        let mut state = loaded_state();
        state.select_code(ViewId::At, "4711D", NafLevel::Naf5);

        Route::parse("#mp").apply(&mut state);

        assert_eq!(state.active_view(), ViewId::Mp);
        assert_eq!(state.selection(ViewId::Mp).code.as_deref(), Some("4711D"));
    }

    #[test]
    fn test_apply_unknown_code_leaves_at_unselected() {
        let mut state = loaded_state();
        Route::parse("#at/9999X").apply(&mut state);

        assert_eq!(state.active_view(), ViewId::At);
        assert_eq!(state.selection(ViewId::At).code, None);
    }

    #[test]
    fn test_apply_invalid_legacy_code_changes_nothing() {
        let mut state = loaded_state();
        state.select_code(ViewId::At, "47", NafLevel::Naf2);
        let changes = recorded(&mut state);

        Route::parse("invalidcode").apply(&mut state);

        assert_eq!(state.selection(ViewId::At).code.as_deref(), Some("47"));
        assert!(changes.borrow().is_empty());
    }

    #[test]
    fn test_apply_rewrites_url_in_place() {
        let mut state = loaded_state();
        let changes = recorded(&mut state);

        // initial load, then the same entry again through back navigation
        Route::parse("#6201z").apply(&mut state);
        Route::parse("#6201z").apply(&mut state);

        let changes = changes.borrow();
        assert_eq!(changes.len(), 2);
        for change in changes.iter() {
            assert_eq!(change.fragment.as_deref(), Some("at/6201Z"));
            assert!(change.replace);
        }
    }

    #[test]
    fn test_view_route_rewrite_is_in_place_but_user_switch_is_not() {
        let mut state = loaded_state();
        let changes = recorded(&mut state);

        Route::parse("#mp").apply(&mut state);
        state.switch_view(ViewId::At);

        let changes = changes.borrow();
        assert!(changes[0].replace);
        assert!(!changes[1].replace);
    }

    #[test]
    fn test_noop_leaves_state() {
        let mut state = loaded_state();
        Route::Noop.apply(&mut state);
        assert_eq!(state.active_view(), ViewId::At);
        assert_eq!(state.selection(ViewId::At).code, None);
    }
}
