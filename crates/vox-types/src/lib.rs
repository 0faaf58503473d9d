//! Data-transfer types shared by the Vox client crates.
//!
//! Everything here mirrors the backend's JSON wire format. The client never
//! mutates these records; they are fetched per screen and discarded on
//! navigation.

pub mod tally;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An authenticated account, as returned by login/register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: String,
}

/// A poll with its ordered options.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Poll {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    #[serde(default)]
    pub options: Vec<PollOption>,
}

/// One selectable choice within a poll.
///
/// `votes` is only present in results responses; a plain poll fetch carries
/// the options without counts. The results endpoint keys the id as
/// `option_id`, hence the alias.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PollOption {
    #[serde(alias = "option_id")]
    pub id: i64,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub votes: Option<u64>,
}

/// Token + account pair returned by the auth endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub user: User,
}

/// Request body for poll creation.
///
/// `end_date` is passed through as the string the user typed; the backend
/// does the parsing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPoll {
    pub title: String,
    pub description: String,
    pub end_date: String,
    pub options: Vec<NewOption>,
}

/// One option in a poll-creation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewOption {
    pub text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Test: plain poll fetch has options without vote counts.
    #[test]
    fn test_poll_deserializes_without_votes() {
        let json = r#"{
            "id": 1,
            "title": "Lunch spot",
            "description": "Where to?",
            "created_at": "2024-05-01T12:00:00Z",
            "end_date": "2024-06-01T12:00:00Z",
            "options": [
                {"id": 10, "text": "Tacos"},
                {"id": 11, "text": "Ramen"}
            ]
        }"#;

        let poll: Poll = serde_json::from_str(json).unwrap();
        assert_eq!(poll.options.len(), 2);
        assert_eq!(poll.options[0].votes, None);
    }

    /// Test: results rows keyed with `option_id` parse into `PollOption`.
    #[test]
    fn test_result_row_accepts_option_id_key() {
        let json = r#"{"option_id": 7, "text": "Tacos", "votes": 3}"#;
        let option: PollOption = serde_json::from_str(json).unwrap();
        assert_eq!(option.id, 7);
        assert_eq!(option.votes, Some(3));
    }

    /// Test: missing description defaults to empty instead of failing.
    #[test]
    fn test_poll_tolerates_missing_description() {
        let json = r#"{
            "id": 2,
            "title": "Quick one",
            "created_at": "2024-05-01T12:00:00Z",
            "end_date": "2024-06-01T12:00:00Z",
            "options": []
        }"#;

        let poll: Poll = serde_json::from_str(json).unwrap();
        assert_eq!(poll.description, "");
    }

    /// Test: create request serializes options as `[{"text": ...}]`.
    #[test]
    fn test_new_poll_wire_shape() {
        let body = NewPoll {
            title: "T".to_string(),
            description: String::new(),
            end_date: "2024-06-01T12:00".to_string(),
            options: vec![
                NewOption {
                    text: "A".to_string(),
                },
                NewOption {
                    text: "B".to_string(),
                },
            ],
        };

        let value = serde_json::to_value(&body).unwrap();
        assert_eq!(value["options"][0]["text"], "A");
        assert_eq!(value["end_date"], "2024-06-01T12:00");
    }
}
