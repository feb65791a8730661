//! Browser side of the fragment routes: the only code reading or writing
//! `location.hash`.

use contracts::dashboards::d410_sector_risk::Route;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::window;

/// Percent-decoded fragment, so `#at/6201%5A` and `#at/6201Z` route alike
pub fn decode_fragment(hash: &str) -> String {
    urlencoding::decode(hash)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| hash.to_string())
}

pub fn current_route() -> Route {
    let hash = window()
        .and_then(|w| w.location().hash().ok())
        .unwrap_or_default();
    Route::parse(&decode_fragment(&hash))
}

/// Shows `#<fragment>` unless the URL already does. User navigation pushes a
/// history entry; `replace` rewrites the current one, for routes being
/// normalized. Neither fires `hashchange`, so this never loops back.
pub fn write_fragment(fragment: &str, replace: bool) {
    let Some(w) = window() else {
        return;
    };
    let target = format!("#{}", fragment);
    let current = w.location().hash().unwrap_or_default();
    if decode_fragment(&current) == target {
        return;
    }
    if let Ok(history) = w.history() {
        let result = if replace {
            history.replace_state_with_url(&JsValue::NULL, "", Some(&target))
        } else {
            history.push_state_with_url(&JsValue::NULL, "", Some(&target))
        };
        if let Err(err) = result {
            log::warn!("cannot update URL to {}: {:?}", target, err);
        }
    }
}

pub fn on_hash_change(handler: impl Fn(Route) + 'static) {
    let Some(w) = window() else {
        return;
    };
    let closure = Closure::wrap(Box::new(move |_: web_sys::HashChangeEvent| {
        handler(current_route());
    }) as Box<dyn FnMut(_)>);
    if let Err(err) =
        w.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref())
    {
        log::warn!("cannot follow URL changes: {:?}", err);
        return;
    }
    closure.forget();
}
