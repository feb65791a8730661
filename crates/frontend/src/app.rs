use crate::dashboards::d410_sector_risk::ui::dashboard::SectorDashboard;
use crate::layout::global_context::AppGlobalContext;
use crate::shared::config::DashboardConfig;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    let ctx = AppGlobalContext::new(DashboardConfig::default());
    provide_context(ctx);
    ctx.load_datasets();

    view! {
        <SectorDashboard />
    }
}
