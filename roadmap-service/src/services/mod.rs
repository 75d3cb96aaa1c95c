pub mod extract;
pub mod metrics;
pub mod prompt;
pub mod providers;
pub mod roadmap;

pub use roadmap::RoadmapGenerator;
