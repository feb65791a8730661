//! Sector risk dashboard: navigation state, URL routes and the derived figures
//! (alerts, rankings, comparisons, yearly series) renderers consume. No lookup
//! logic lives on the rendering side.

pub mod comparison;
pub mod evolution;
pub mod insights;
pub mod kpi;
pub mod route;
pub mod state;

pub use comparison::{
    breadcrumb, comparison_set, position_strip, ComparisonItem, ComparisonScope, ComparisonSet,
    Crumb, PositionStrip,
};
pub use evolution::{evolution_series, EvolutionPoint, EvolutionSeries};
pub use insights::{sector_insights, Insight, InsightLevel};
pub use kpi::{
    event_rank, national_delta, sector_subtitle, top_by_frequency, NationalDelta, Rank, TopSector,
    Trend, TOP_SECTORS,
};
pub use route::{format_route, Route};
pub use state::{ActiveSelection, DashboardState, LevelChange, Selection, SelectionChange};
