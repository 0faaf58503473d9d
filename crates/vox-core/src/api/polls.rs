//! Poll gateway: list, fetch, create, vote, results.

use anyhow::Result;
use serde::Serialize;
use vox_types::{NewPoll, Poll, PollOption};

use super::ApiClient;

#[derive(Debug, Serialize)]
struct VoteBody {
    option_id: i64,
}

impl ApiClient {
    /// Fetches all polls.
    pub async fn list_polls(&self) -> Result<Vec<Poll>> {
        self.get_json("/polls").await
    }

    /// Fetches a single poll by id.
    pub async fn get_poll(&self, poll_id: i64) -> Result<Poll> {
        self.get_json(&format!("/polls/{poll_id}")).await
    }

    /// Creates a poll and returns the stored version.
    pub async fn create_poll(&self, poll: &NewPoll) -> Result<Poll> {
        self.post_json("/polls", poll).await
    }

    /// Casts a vote for one option of a poll.
    pub async fn vote(&self, poll_id: i64, option_id: i64) -> Result<()> {
        self.post_unit(&format!("/polls/{poll_id}/vote"), &VoteBody { option_id })
            .await
    }

    /// Fetches per-option vote counts for a poll.
    pub async fn results(&self, poll_id: i64) -> Result<Vec<PollOption>> {
        self.get_json(&format!("/polls/{poll_id}/results")).await
    }
}

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::config::Config;

    fn client_for(server: &MockServer, home: &std::path::Path) -> ApiClient {
        let config = Config {
            api_url: server.uri(),
        };
        ApiClient::new(&config, home).unwrap()
    }

    /// Test: the list endpoint parses polls with nested options.
    #[tokio::test]
    async fn test_list_polls() {
        let temp = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/polls"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {
                    "id": 1,
                    "title": "Lunch",
                    "description": "Where to?",
                    "created_at": "2026-08-01T10:00:00Z",
                    "end_date": "2026-09-01T10:00:00Z",
                    "options": [
                        {"id": 10, "text": "Tacos"},
                        {"id": 11, "text": "Ramen"}
                    ]
                }
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server, temp.path());
        let polls = client.list_polls().await.unwrap();
        assert_eq!(polls.len(), 1);
        assert_eq!(polls[0].options.len(), 2);
        assert_eq!(polls[0].options[1].text, "Ramen");
    }

    /// Test: vote posts `{"option_id": n}` to the vote endpoint.
    #[tokio::test]
    async fn test_vote_body_shape() {
        let temp = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/polls/7/vote"))
            .and(body_json(serde_json::json!({"option_id": 11})))
            .respond_with(
                ResponseTemplate::new(201)
                    .set_body_json(serde_json::json!({"message": "Vote recorded"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, temp.path());
        client.vote(7, 11).await.unwrap();
    }

    /// Test: results rows keyed `option_id` map onto the option id.
    #[tokio::test]
    async fn test_results_option_id_key() {
        let temp = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/polls/7/results"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"option_id": 10, "text": "Tacos", "votes": 3},
                {"option_id": 11, "text": "Ramen", "votes": 1}
            ])))
            .mount(&server)
            .await;

        let client = client_for(&server, temp.path());
        let results = client.results(7).await.unwrap();
        assert_eq!(results[0].id, 10);
        assert_eq!(results[0].votes, Some(3));
        assert_eq!(results[1].votes, Some(1));
    }

    /// Test: creating a poll returns the stored poll with ids assigned.
    #[tokio::test]
    async fn test_create_poll() {
        let temp = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/polls"))
            .and(body_json(serde_json::json!({
                "title": "Lunch",
                "description": "",
                "end_date": "2026-09-01",
                "options": [{"text": "Tacos"}, {"text": "Ramen"}]
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({
                "id": 5,
                "title": "Lunch",
                "description": "",
                "created_at": "2026-08-01T10:00:00Z",
                "end_date": "2026-09-01T00:00:00Z",
                "options": [
                    {"id": 10, "text": "Tacos"},
                    {"id": 11, "text": "Ramen"}
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = client_for(&server, temp.path());
        let poll = client
            .create_poll(&NewPoll {
                title: "Lunch".to_string(),
                description: String::new(),
                end_date: "2026-09-01".to_string(),
                options: vec![
                    vox_types::NewOption {
                        text: "Tacos".to_string(),
                    },
                    vox_types::NewOption {
                        text: "Ramen".to_string(),
                    },
                ],
            })
            .await
            .unwrap();
        assert_eq!(poll.id, 5);
    }

    /// Test: a missing poll surfaces the backend's not-found message.
    #[tokio::test]
    async fn test_get_poll_not_found() {
        let temp = tempfile::tempdir().unwrap();
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/polls/999"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"message": "Poll not found"})),
            )
            .mount(&server)
            .await;

        let client = client_for(&server, temp.path());
        let err = client.get_poll(999).await.unwrap_err();
        assert!(format!("{err:#}").contains("Poll not found"));
    }
}
