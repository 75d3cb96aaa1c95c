pub mod roadmap;

pub use roadmap::{NodeCategory, ResourceType, RoadmapDocument, RoadmapNode, RoadmapResource};
