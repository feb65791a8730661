/// Client-side settings of the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardConfig {
    /// Directory the `<view>-data.json` files are served from
    pub data_base: String,
    /// Quiet window before the search suggestions are recomputed
    pub debounce_ms: u32,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_base: "./data".to_string(),
            debounce_ms: 120,
        }
    }
}
