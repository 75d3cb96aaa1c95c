use serde::Deserialize;
use validator::Validate;

/// Body of `POST /api/roadmap`.
#[derive(Debug, Deserialize, Validate)]
pub struct RoadmapRequest {
    #[serde(default)]
    #[validate(length(min = 1, message = "Goal is required"))]
    pub goal: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_goal_present() {
        let req: RoadmapRequest = serde_json::from_str(r#"{"goal":"learn go"}"#).unwrap();
        assert!(req.validate().is_ok());
        assert_eq!(req.goal, "learn go");
    }

    #[test]
    fn test_missing_goal_fails_validation() {
        let req: RoadmapRequest = serde_json::from_str(r#"{"other":1}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_empty_goal_fails_validation() {
        let req: RoadmapRequest = serde_json::from_str(r#"{"goal":""}"#).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_non_string_goal_is_rejected() {
        assert!(serde_json::from_str::<RoadmapRequest>(r#"{"goal":42}"#).is_err());
        assert!(serde_json::from_str::<RoadmapRequest>(r#"{"goal":null}"#).is_err());
    }
}
