//! Poll command handlers.

use anyhow::{Context, Result};
use comfy_table::{ContentArrangement, Table};
use vox_core::api::ApiClient;
use vox_types::tally;
use vox_types::{NewOption, NewPoll, PollOption};

pub async fn list(client: &ApiClient) -> Result<()> {
    let polls = client.list_polls().await.context("list polls")?;
    if polls.is_empty() {
        println!("No polls found.");
        return Ok(());
    }

    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["ID", "Title", "Options", "Ends"]);
    for poll in polls {
        table.add_row(vec![
            poll.id.to_string(),
            poll.title,
            poll.options.len().to_string(),
            poll.end_date.format("%Y-%m-%d %H:%M").to_string(),
        ]);
    }
    println!("{table}");
    Ok(())
}

pub async fn show(client: &ApiClient, id: i64) -> Result<()> {
    let poll = client
        .get_poll(id)
        .await
        .with_context(|| format!("load poll {id}"))?;
    let results = client
        .results(id)
        .await
        .with_context(|| format!("load results for poll {id}"))?;

    println!("{} (#{})", poll.title, poll.id);
    if !poll.description.is_empty() {
        println!("{}", poll.description);
    }
    println!("Ends: {}", poll.end_date.format("%Y-%m-%d %H:%M"));
    println!();
    println!("Options:");
    for option in &poll.options {
        println!("  [{}] {}", option.id, option.text);
    }
    println!();
    println!("Results:");
    print_results(&results);
    Ok(())
}

pub async fn create(
    client: &ApiClient,
    title: String,
    description: String,
    end_date: String,
    options: Vec<String>,
) -> Result<()> {
    if options.len() < 2 {
        anyhow::bail!("A poll needs at least two options (pass --option twice or more)");
    }
    if options.iter().any(|option| option.trim().is_empty()) {
        anyhow::bail!("All options must be filled");
    }

    let poll = client
        .create_poll(&NewPoll {
            title,
            description,
            end_date,
            options: options
                .into_iter()
                .map(|text| NewOption { text })
                .collect(),
        })
        .await
        .context("create poll")?;

    println!("Created poll {}: {}", poll.id, poll.title);
    Ok(())
}

pub async fn vote(client: &ApiClient, poll_id: i64, option_id: i64) -> Result<()> {
    client
        .vote(poll_id, option_id)
        .await
        .with_context(|| format!("vote on poll {poll_id}"))?;
    println!("Vote recorded");
    Ok(())
}

pub async fn results(client: &ApiClient, poll_id: i64) -> Result<()> {
    let results = client
        .results(poll_id)
        .await
        .with_context(|| format!("load results for poll {poll_id}"))?;
    print_results(&results);
    Ok(())
}

fn print_results(results: &[PollOption]) {
    let total = tally::total_votes(results);
    for option in results {
        let votes = option.votes.unwrap_or(0);
        let pct = tally::percentage(votes, total);
        println!("  {}: {votes} votes ({pct}%)", option.text);
    }
}
