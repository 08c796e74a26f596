//! Linked views of the Oceanus investigation dashboard.

pub mod alignment_matrix;
pub mod dataset_counts;
pub mod filter_chips;
pub mod industry_sentiment;
pub mod knowledge_graph;
pub mod region_map;
pub mod trip_timeline;

pub use alignment_matrix::AlignmentMatrixView;
pub use dataset_counts::DatasetCounts;
pub use filter_chips::FilterChips;
pub use industry_sentiment::IndustrySentimentChart;
pub use knowledge_graph::KnowledgeGraph;
pub use region_map::{RegionCounts, RegionDetails, RegionMap};
pub use trip_timeline::TripTimeline;
