//! Typed view of a generated roadmap.
//!
//! Responses are relayed as the backend's JSON, not re-serialized from
//! these types. The view is only used to summarize a roadmap in logs, and
//! graph consistency (unique ids, child references, level order) is not
//! checked.

use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct RoadmapDocument {
    pub title: String,
    #[serde(default)]
    pub nodes: Vec<RoadmapNode>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapNode {
    pub id: String,
    pub label: String,
    /// 0 (main goal) through 4 (micro-steps).
    pub level: u8,
    #[serde(default)]
    pub description: String,
    pub category: NodeCategory,
    #[serde(default)]
    pub time_estimate: String,
    #[serde(default)]
    pub children: Vec<String>,
    #[serde(default)]
    pub resources: Vec<RoadmapResource>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeCategory {
    Basics,
    Practice,
    Advanced,
    Goal,
    Foundation,
    Intermediate,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RoadmapResource {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ResourceType,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceType {
    Youtube,
    Documentation,
    Course,
    Article,
    Book,
    #[serde(other)]
    Other,
}

impl RoadmapDocument {
    /// Node count per level 0..=4; deeper levels land in the last bucket.
    pub fn level_counts(&self) -> [usize; 5] {
        let mut counts = [0usize; 5];
        for node in &self.nodes {
            counts[usize::from(node.level.min(4))] += 1;
        }
        counts
    }

    pub fn resource_count(&self) -> usize {
        self.nodes.iter().map(|n| n.resources.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> serde_json::Value {
        json!({
            "title": "Learn Rust",
            "nodes": [
                {
                    "id": "main", "label": "Learn Rust", "level": 0,
                    "description": "d", "category": "goal", "timeEstimate": "6 months",
                    "children": ["basics"],
                    "resources": [
                        { "title": "The Book", "type": "book", "url": "https://doc.rust-lang.org/book/" }
                    ]
                },
                {
                    "id": "basics", "label": "Basics", "level": 1,
                    "description": "d", "category": "basics", "timeEstimate": "1 month",
                    "children": ["missing"],
                    "resources": [
                        { "title": "Rustlings", "type": "course", "url": "https://rustlings.cool" },
                        { "title": "Podcast", "type": "podcast", "url": "https://example.com" }
                    ]
                }
            ]
        })
    }

    #[test]
    fn test_document_view_parses_without_graph_checks() {
        let doc: RoadmapDocument = serde_json::from_value(sample()).unwrap();

        assert_eq!(doc.title, "Learn Rust");
        assert_eq!(doc.nodes[1].time_estimate, "1 month");
        assert_eq!(doc.nodes[1].children, vec!["missing"]);
        assert_eq!(doc.nodes[1].resources[1].kind, ResourceType::Other);
        assert_eq!(doc.level_counts(), [1, 1, 0, 0, 0]);
        assert_eq!(doc.resource_count(), 3);
    }

    #[test]
    fn test_unknown_category_maps_to_other() {
        let node: RoadmapNode = serde_json::from_value(json!({
            "id": "x", "label": "X", "level": 2, "category": "bonus"
        }))
        .unwrap();
        assert_eq!(node.category, NodeCategory::Other);
    }
}
