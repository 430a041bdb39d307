//! Post command handlers: list, publish, delete.

use anyhow::{Context, Result};
use wren_core::config::Config;
use wren_core::draft::Draft;
use wren_core::{gate, session};

use super::client;

pub async fn list(config: &Config, author: Option<&str>) -> Result<()> {
    let api = client(config)?;
    let posts = api.get_posts().await.context("load posts")?;

    let visible: Vec<_> = posts
        .iter()
        .filter(|post| author.is_none_or(|name| post.username == name))
        .collect();

    if visible.is_empty() {
        match author {
            Some(name) => println!("No posts by {name}."),
            None => println!("No posts yet."),
        }
        return Ok(());
    }

    for post in visible {
        println!("#{}  {}  {}", post.id, post.username, post.timestamp);
        println!("  {}", post.message);
        if !post.hashtags.is_empty() {
            println!("  {}", post.hashtags.join(" "));
        }
    }
    Ok(())
}

pub async fn publish(config: &Config, message: &str, tags: &[String]) -> Result<()> {
    let mut draft = Draft::default();
    draft.message = message.to_string();
    for tag in tags {
        draft.hashtag_input = tag.clone();
        draft.stage_hashtag()?;
    }
    draft.validate()?;

    let api = client(config)?;
    if api.token().is_none() {
        anyhow::bail!("not logged in; run `wren login <username>` first");
    }
    api.create_post(draft.message.trim(), &draft.hashtags)
        .await
        .context("create post")?;
    println!("Posted.");
    Ok(())
}

pub async fn delete(config: &Config, id: u64) -> Result<()> {
    let api = client(config)?;
    let session = session::resolve_session_strict(&api)
        .await
        .context("resolve session")?;
    gate::check_delete(&session)?;

    api.delete_post(id).await.context("delete post")?;
    println!("Deleted post #{id}.");
    Ok(())
}
