use contracts::enums::{NafLevel, ViewId};
use contracts::shared::view_config::ViewConfig;
use leptos::prelude::*;

use super::details::{NationalOverview, SectorDetails};
use super::search::SearchBox;
use crate::layout::global_context::AppGlobalContext;

/// Sector risk dashboard: view rail, level tabs, search and the selected sector
#[component]
pub fn SectorDashboard() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let config = move || ViewConfig::for_view(ctx.active_view());

    view! {
        <div id="d410_sector_risk--dashboard" class="d410-dashboard">
            <nav class="nav-rail">
                {ViewId::all()
                    .into_iter()
                    .map(|view| {
                        view! {
                            <button
                                class="nav-item"
                                class:active=move || ctx.active_view() == view
                                on:click=move |_| ctx.switch_view(view)
                            >
                                {view.display_name()}
                            </button>
                        }
                    })
                    .collect_view()}
            </nav>

            <main class="d410-main">
                <header class="d410-header">
                    <h1>{move || config().title}</h1>
                    <p class="subtitle">{move || config().subtitle}</p>
                </header>

                {move || {
                    let errors = ctx.load_errors.get();
                    if errors.is_empty() {
                        view! { <></> }.into_any()
                    } else {
                        view! {
                            <div class="d410-error">
                                {errors
                                    .into_iter()
                                    .map(|err| view! { <p>"⚠ " {err}</p> })
                                    .collect_view()}
                            </div>
                        }
                            .into_any()
                    }
                }}

                <Show
                    when=move || ctx.ready.get()
                    fallback=|| view! { <div class="d410-loading">"Chargement des données..."</div> }
                >
                    <LevelTabs />
                    <SearchBox />
                    {move || {
                        ctx.notice
                            .get()
                            .map(|notice| view! { <div class="d410-notice">{notice}</div> })
                    }}
                    {move || match ctx.active_selection() {
                        Some(selection) => view! { <SectorDetails selection=selection /> }.into_any(),
                        None => view! { <NationalOverview view=ctx.active_view() /> }.into_any(),
                    }}
                </Show>

                <footer class="d410-footer">
                    "Source : "
                    <a href=move || config().source_url target="_blank">
                        {move || config().source_label}
                    </a>
                </footer>
            </main>
        </div>
    }
}

#[component]
fn LevelTabs() -> impl IntoView {
    let ctx = use_context::<AppGlobalContext>().expect("AppGlobalContext context not found");
    let current = move || ctx.with_state(|s| s.selection(s.active_view()).level);

    view! {
        <div class="level-tabs">
            {NafLevel::all()
                .into_iter()
                .map(|level| {
                    view! {
                        <button
                            class:active=move || current() == level
                            on:click=move |_| ctx.change_level(level)
                        >
                            {level.display_name()}
                        </button>
                    }
                })
                .collect_view()}
        </div>
    }
}
