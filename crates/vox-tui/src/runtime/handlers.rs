//! Effect handler implementations.
//!
//! Handlers are pure async functions that perform the API call and return
//! the `UiEvent` describing the outcome. The runtime spawns them and feeds
//! the returned event back into the inbox.

use vox_core::api::ApiClient;
use vox_types::NewPoll;

use crate::events::{ApiUiEvent, UiEvent};

pub async fn fetch_polls(client: ApiClient) -> UiEvent {
    let event = match client.list_polls().await {
        Ok(polls) => ApiUiEvent::PollsLoaded(polls),
        Err(e) => ApiUiEvent::PollsLoadFailed(format!("{e:#}")),
    };
    UiEvent::Api(event)
}

/// Loads a poll, then its results. The two requests run sequentially; a
/// failure in either one fails the whole load.
pub async fn fetch_poll_detail(client: ApiClient, poll_id: i64) -> UiEvent {
    let outcome = async {
        let poll = client.get_poll(poll_id).await?;
        let results = client.results(poll_id).await?;
        anyhow::Ok((poll, results))
    }
    .await;

    let event = match outcome {
        Ok((poll, results)) => ApiUiEvent::PollDetailLoaded {
            poll_id,
            poll,
            results,
        },
        Err(e) => ApiUiEvent::PollDetailFailed {
            poll_id,
            error: format!("{e:#}"),
        },
    };
    UiEvent::Api(event)
}

pub async fn submit_poll(client: ApiClient, poll: NewPoll) -> UiEvent {
    let event = match client.create_poll(&poll).await {
        Ok(created) => ApiUiEvent::PollCreated(created),
        Err(e) => ApiUiEvent::PollCreateFailed(format!("{e:#}")),
    };
    UiEvent::Api(event)
}

/// Casts the vote, then refetches results so the screen shows fresh counts.
pub async fn submit_vote(client: ApiClient, poll_id: i64, option_id: i64) -> UiEvent {
    let outcome = async {
        client.vote(poll_id, option_id).await?;
        client.results(poll_id).await
    }
    .await;

    let event = match outcome {
        Ok(results) => ApiUiEvent::VoteRecorded { poll_id, results },
        Err(e) => ApiUiEvent::VoteFailed {
            poll_id,
            error: format!("{e:#}"),
        },
    };
    UiEvent::Api(event)
}

pub async fn login(client: ApiClient, username: String, password: String) -> UiEvent {
    let event = match client.login(&username, &password).await {
        Ok(response) => ApiUiEvent::LoginCompleted(response.user),
        Err(e) => ApiUiEvent::LoginFailed(format!("{e:#}")),
    };
    UiEvent::Api(event)
}

pub async fn register(client: ApiClient, username: String, password: String) -> UiEvent {
    let event = match client.register(&username, &password).await {
        Ok(response) => ApiUiEvent::RegisterCompleted(response.user),
        Err(e) => ApiUiEvent::RegisterFailed(format!("{e:#}")),
    };
    UiEvent::Api(event)
}
