//! Auth gateway: login, register, logout.
//!
//! Login and register persist the returned access token to the session file
//! so later requests authenticate. Logout only deletes the stored session;
//! no network call is involved.

use anyhow::{Context, Result};
use serde::Serialize;
use vox_types::AuthResponse;

use super::ApiClient;
use crate::session::{self, Session};

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    username: &'a str,
    password: &'a str,
}

impl ApiClient {
    /// Signs in and persists the returned access token.
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let response: AuthResponse = self
            .post_json(
                "/auth/login",
                &Credentials {
                    username,
                    password,
                },
            )
            .await?;
        self.store_session(&response)?;
        Ok(response)
    }

    /// Creates an account and persists the returned access token.
    pub async fn register(&self, username: &str, password: &str) -> Result<AuthResponse> {
        let response: AuthResponse = self
            .post_json(
                "/auth/register",
                &Credentials {
                    username,
                    password,
                },
            )
            .await?;
        self.store_session(&response)?;
        Ok(response)
    }

    /// Deletes the stored session. Idempotent; returns whether a session
    /// existed.
    pub fn logout(&self) -> Result<bool> {
        session::clear(self.home())
    }

    /// Returns the stored session, if signed in.
    pub fn current_session(&self) -> Result<Option<Session>> {
        session::load(self.home())
    }

    fn store_session(&self, response: &AuthResponse) -> Result<()> {
        session::save(
            self.home(),
            &Session {
                access_token: response.access_token.clone(),
                user: response.user.clone(),
            },
        )
        .context("Failed to persist session")
    }
}
