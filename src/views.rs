use std::path::Path;

use tokio::fs;

/// Composes the shared layout with a page body.
///
/// Templates are read from disk on every call; the filesystem is the sole
/// source of truth, so edits show up on the next request without a restart.
pub async fn render_page(
    content_dir: &Path,
    title: &str,
    content: &str,
) -> Result<String, std::io::Error> {
    let layout = fs::read_to_string(content_dir.join("layout.html")).await?;
    let banner = fs::read_to_string(content_dir.join("banner.html")).await?;

    Ok(layout
        .replace("{{ title }}", title)
        .replace("{{ banner }}", &banner)
        .replace("{{ content }}", content))
}

/// Renders the not-found page for a slug. The template supports a `{{slug}}`
/// placeholder; the slug came from the request path, so it is escaped.
pub async fn render_not_found(
    content_dir: &Path,
    slug: &str,
) -> Result<String, std::io::Error> {
    let template = fs::read_to_string(content_dir.join("not_found.html")).await?;
    let body = template.replace("{{slug}}", &htmlescape::encode_minimal(slug));
    render_page(content_dir, "Not found", &body).await
}
