pub mod roadmap;

pub use roadmap::RoadmapRequest;
