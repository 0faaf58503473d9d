//! Auth command handlers.

use anyhow::{Context, Result};
use vox_core::api::ApiClient;

pub async fn login(client: &ApiClient, username: &str, password: &str) -> Result<()> {
    let response = client
        .login(username, password)
        .await
        .context("login")?;
    println!("Logged in as {}", response.user.username);
    Ok(())
}

pub async fn register(client: &ApiClient, username: &str, password: &str) -> Result<()> {
    let response = client
        .register(username, password)
        .await
        .context("register")?;
    println!("Registered as {}", response.user.username);
    Ok(())
}

pub fn logout(client: &ApiClient) -> Result<()> {
    if client.logout().context("clear session")? {
        println!("Logged out");
    } else {
        println!("Not logged in");
    }
    Ok(())
}
