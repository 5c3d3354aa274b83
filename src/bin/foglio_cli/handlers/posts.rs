#![deny(clippy::all, clippy::pedantic)]

use foglio::client::BlogClient;
use foglio::client::models::{CommentRequest, CreatePostRequest, UpdatePostRequest};
use foglio::domain::sort_by_recency;
use foglio::render::render;
use tracing::debug;

use crate::args::PostsCmd;
use crate::context::CliError;
use crate::io::{parse_tags, read_value};
use crate::print::print_json;

pub async fn handle(client: &BlogClient, cmd: PostsCmd) -> Result<(), CliError> {
    match cmd {
        PostsCmd::List { tag, recent } => {
            let mut posts = client.list_posts(tag.as_deref()).await?;
            if recent {
                sort_by_recency(&mut posts);
            }
            print_json(&posts)
        }
        PostsCmd::Get { id } => {
            let post = client.get_post(&id).await?;
            print_json(&post)
        }
        PostsCmd::Show { id, toc } => show(client, &id, toc).await,
        PostsCmd::Search { query } => {
            let posts = client.search_posts(&query).await?;
            print_json(&posts)
        }
        PostsCmd::Sort { by } => {
            let posts = client.sort_posts(&by).await?;
            print_json(&posts)
        }
        PostsCmd::ByTag { tag } => {
            let posts = client.posts_by_tag(&tag).await?;
            print_json(&posts)
        }
        PostsCmd::Create {
            title,
            content,
            content_file,
            tags,
            image,
        } => {
            let request = CreatePostRequest {
                title,
                content: read_value(content, content_file)?,
                tags: parse_tags(tags.as_deref()),
                blog_image: image,
            };
            let post = client.create_post(&request).await?;
            print_json(&post)
        }
        PostsCmd::Update {
            id,
            title,
            content,
            content_file,
            tags,
            image,
        } => {
            let request = UpdatePostRequest {
                title,
                content: read_value(content, content_file)?,
                tags: parse_tags(tags.as_deref()),
                blog_image: image,
            };
            let post = client.update_post(&id, &request).await?;
            print_json(&post)
        }
        PostsCmd::Delete { id } => {
            client.delete_post(&id).await?;
            println!("deleted");
            Ok(())
        }
        PostsCmd::Like { id } => {
            let likes = client.like_post(&id).await?;
            println!("{likes}");
            Ok(())
        }
        PostsCmd::Comment { id, username, text } => {
            let post = client
                .add_comment(&id, &CommentRequest { username, text })
                .await?;
            print_json(&post)
        }
        PostsCmd::View { id } => {
            record_view(client, &id).await;
            Ok(())
        }
    }
}

async fn show(client: &BlogClient, id: &str, toc: bool) -> Result<(), CliError> {
    record_view(client, id).await;

    let post = client.get_post(id).await?;
    let doc = render(&post.content);

    if toc {
        for heading in &doc.headings {
            let indent = "  ".repeat(usize::from(heading.level.saturating_sub(1)));
            println!("{indent}{} (#{})", heading.title, heading.id);
        }
        if !doc.headings.is_empty() {
            println!();
        }
    }
    println!("{}", doc.html);
    Ok(())
}

/// View bumps are telemetry; a failure is logged and dropped rather than
/// surfaced to the user.
async fn record_view(client: &BlogClient, id: &str) {
    if let Err(err) = client.record_view(id).await {
        debug!(%id, error = %err, "view increment failed; ignoring");
    }
}
