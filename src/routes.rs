use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Html,
};
use htmlescape::encode_minimal;
use tracing::error;

use crate::markdown::render_markdown_to_html;
use crate::posts;
use crate::state::AppState;
use crate::views;
use crate::{frontmatter, models::Project};

type PageResponse = (StatusCode, Html<String>);

fn server_error() -> PageResponse {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Html("<h1>Something went wrong</h1>".to_string()),
    )
}

async fn page(state: &AppState, title: &str, content: &str, status: StatusCode) -> PageResponse {
    match views::render_page(&state.config.content_dir, title, content).await {
        Ok(html) => (status, Html(html)),
        Err(err) => {
            error!(error = %err, "failed to render page layout");
            server_error()
        }
    }
}

pub async fn homepage(State(state): State<Arc<AppState>>) -> PageResponse {
    let path = state.config.content_dir.join("home.md");
    let raw = match tokio::fs::read_to_string(&path).await {
        Ok(raw) => raw,
        Err(err) => {
            error!(path = %path.display(), error = %err, "failed to read home page");
            return server_error();
        }
    };

    let (meta, body) = match frontmatter::extract(&raw) {
        Ok(extracted) => extracted,
        Err(err) => {
            error!(path = %path.display(), error = %err, "failed to parse home page");
            return server_error();
        }
    };

    let title = if meta.title.is_empty() { "Home" } else { &meta.title };
    let content = render_markdown_to_html(body);
    page(&state, title, &content, StatusCode::OK).await
}

pub async fn posts_index(State(state): State<Arc<AppState>>) -> PageResponse {
    let listing = posts::list_posts(&state.config.posts_dir(), state.config.listing_policy).await;
    let all_posts = match listing {
        Ok(all_posts) => all_posts,
        Err(err) => {
            error!(error = %err, "failed to list posts");
            return server_error();
        }
    };

    let mut items = String::new();
    for post in &all_posts {
        items.push_str(&format!(
            "<li><a href=\"/posts/{}\">{}</a> <span class=\"posted-at\">{}</span>",
            post.slug,
            encode_minimal(&post.title),
            encode_minimal(&post.posted_at),
        ));
        if let Some(tldr) = &post.tldr {
            items.push_str(&format!("<p class=\"tldr\">{}</p>", encode_minimal(tldr)));
        }
        items.push_str("</li>");
    }

    let content = format!("<h1>Posts</h1><ul class=\"posts\">{items}</ul>");
    page(&state, "Posts", &content, StatusCode::OK).await
}

pub async fn show_post(
    Path(slug): Path<String>,
    State(state): State<Arc<AppState>>,
) -> PageResponse {
    match posts::get_post(&state.config.posts_dir(), &slug).await {
        Ok(Some(post)) => {
            let content = format!(
                "<h1>{}</h1><p class=\"posted-at\">{}</p>{}",
                encode_minimal(&post.metadata.title),
                encode_minimal(&post.metadata.posted_at),
                post.html,
            );
            page(&state, &post.metadata.title, &content, StatusCode::OK).await
        }
        Ok(None) => match views::render_not_found(&state.config.content_dir, &slug).await {
            Ok(html) => (StatusCode::NOT_FOUND, Html(html)),
            Err(err) => {
                error!(error = %err, "failed to render not-found page");
                server_error()
            }
        },
        Err(err) => {
            error!(%slug, error = %err, "failed to load post");
            server_error()
        }
    }
}

pub async fn projects_page(State(state): State<Arc<AppState>>) -> PageResponse {
    let content = format!(
        "<h1>Projects</h1><ul class=\"projects\">{}</ul>",
        project_list_items(&state.projects)
    );
    page(&state, "Projects", &content, StatusCode::OK).await
}

fn project_list_items(projects: &[Project]) -> String {
    let mut items = String::new();
    for project in projects {
        items.push_str(&format!(
            "<li><a href=\"{}\">{}</a><p>{}</p></li>",
            project.url,
            encode_minimal(&project.name),
            encode_minimal(&project.description),
        ));
    }
    items
}
