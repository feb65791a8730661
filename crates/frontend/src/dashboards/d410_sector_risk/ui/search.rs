use contracts::domain::sector::{search, NafIndexEntry, SearchResults};
use leptos::ev::KeyboardEvent;
use leptos::prelude::*;

use crate::layout::global_context::AppGlobalContext;
use crate::shared::debounce::Debouncer;

/// Search input with debounced suggestions and keyboard navigation
#[component]
pub fn SearchBox() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let debouncer = StoredValue::new_local(Debouncer::new(ctx.config().debounce_ms));

    let (query, set_query) = signal(String::new());
    let (results, set_results) = signal(SearchResults::default());
    let (open, set_open) = signal(false);
    let (highlight, set_highlight) = signal(None::<usize>);

    // The input mirrors the selected code of the active view
    Effect::new(move |_| {
        let code = ctx.with_state(|s| s.selection(s.active_view()).code.clone());
        set_query.set(code.unwrap_or_default());
        set_open.set(false);
    });

    let close = move || {
        set_open.set(false);
        set_highlight.set(None);
        ctx.update_state(|s| {
            let view = s.active_view();
            s.reset_highlight(view);
        });
    };

    let recompute = move |text: String| {
        let found = ctx.with_state_untracked(|s| {
            let view = s.active_view();
            let selected = s.selection(view).code.clone();
            s.store()
                .get_dataset(view)
                .ok()
                .map(|dataset| search(&dataset, &text, selected.as_deref()))
        });
        close();
        match found {
            Some(found) if !found.is_empty() => {
                set_results.set(found);
                set_open.set(true);
            }
            _ => set_results.set(SearchResults::default()),
        }
    };

    let pick = move |entry: NafIndexEntry| {
        close();
        ctx.select(&entry.code, entry.level);
    };

    let on_keydown = move |ev: KeyboardEvent| match ev.key().as_str() {
        "ArrowDown" => {
            ev.prevent_default();
            let len = results.with_untracked(|r| r.matches.len());
            let mut index = None;
            ctx.update_state(|s| {
                let view = s.active_view();
                index = s.move_highlight_down(view, len);
            });
            set_highlight.set(index);
        }
        "ArrowUp" => {
            ev.prevent_default();
            let mut index = None;
            ctx.update_state(|s| {
                let view = s.active_view();
                index = s.move_highlight_up(view);
            });
            set_highlight.set(index);
        }
        "Enter" => {
            ev.prevent_default();
            if query.get_untracked().trim().is_empty() {
                close();
                ctx.update_state(|s| {
                    let view = s.active_view();
                    s.clear_selection(view);
                });
            } else if open.get_untracked() {
                let index = ctx.with_state_untracked(|s| s.highlighted_or_first(s.active_view()));
                if let Some(entry) = results.with_untracked(|r| r.matches.get(index).cloned()) {
                    pick(entry);
                }
            }
        }
        "Escape" => close(),
        _ => {}
    };

    view! {
        <div class="search-wrapper">
            <input
                type="text"
                class="search-input"
                placeholder="Code NAF ou libellé d'activité"
                prop:value=move || query.get()
                on:input=move |ev| {
                    let text = event_target_value(&ev);
                    set_query.set(text.clone());
                    debouncer.with_value(|d| d.call(move || recompute(text)));
                }
                on:focus=move |_| recompute(query.get_untracked())
                on:blur=move |_| {
                    debouncer.with_value(|d| d.cancel());
                    close();
                }
                on:keydown=on_keydown
            />
            <Show when=move || open.get()>
                <div class="autocomplete open">
                    {move || {
                        let active = highlight.get();
                        results
                            .get()
                            .matches
                            .into_iter()
                            .enumerate()
                            .map(|(index, entry)| {
                                let code = entry.code.clone();
                                let libelle = entry.libelle.clone();
                                let tag = entry.level.code().to_uppercase();
                                view! {
                                    <div
                                        class="ac-item"
                                        class:active=active == Some(index)
                                        on:mousedown=move |_| pick(entry.clone())
                                    >
                                        <span class="code">{code}</span>
                                        <span class="libelle">{libelle}</span>
                                        <span class="level-tag">{tag}</span>
                                    </div>
                                }
                            })
                            .collect_view()
                    }}
                    <div class="ac-count">{move || results.with(|r| r.summary())}</div>
                </div>
            </Show>
        </div>
    }
}
