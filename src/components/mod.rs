pub mod bar_chart;
pub mod force_graph;
pub mod graph_overview;
pub mod graph_stats;
pub mod oceanus;
pub mod sidebar;
pub mod status;
