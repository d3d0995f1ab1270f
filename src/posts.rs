use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::fs;
use tracing::warn;

use crate::frontmatter::{self, ExtractError};
use crate::markdown::render_markdown_to_html;
use crate::models::{PostMetadata, RenderedPost};

#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{}: {source}", path.display())]
    Extract {
        path: PathBuf,
        #[source]
        source: ExtractError,
    },
}

/// What the listing does when one file fails extraction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ListingPolicy {
    /// Abort the whole listing and surface the error. A silent partial feed
    /// is a worse failure mode than no feed, so this is the default.
    #[default]
    Abort,
    /// Skip the offending file, log it, and keep going.
    Skip,
}

/// Enumerates the content directory and returns listing metadata for every
/// post, in directory-enumeration order. Directory entries are skipped; every
/// other entry is a candidate post. Bodies are not kept.
pub async fn list_posts(
    posts_dir: &Path,
    policy: ListingPolicy,
) -> Result<Vec<PostMetadata>, ContentError> {
    let mut entries = fs::read_dir(posts_dir).await.map_err(|source| ContentError::Io {
        path: posts_dir.to_path_buf(),
        source,
    })?;

    let mut posts = Vec::new();
    loop {
        let entry = match entries.next_entry().await {
            Ok(Some(entry)) => entry,
            Ok(None) => break,
            Err(source) => {
                return Err(ContentError::Io {
                    path: posts_dir.to_path_buf(),
                    source,
                })
            }
        };

        let path = entry.path();
        let file_type = entry.file_type().await.map_err(|source| ContentError::Io {
            path: path.clone(),
            source,
        })?;
        if file_type.is_dir() {
            continue;
        }

        match read_metadata(&path).await {
            Ok(metadata) => posts.push(metadata),
            Err(err) => match policy {
                ListingPolicy::Abort => return Err(err),
                ListingPolicy::Skip => {
                    warn!(path = %path.display(), error = %err, "skipping unreadable post");
                }
            },
        }
    }
    Ok(posts)
}

async fn read_metadata(path: &Path) -> Result<PostMetadata, ContentError> {
    let raw = fs::read_to_string(path).await.map_err(|source| ContentError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let (metadata, _body) = frontmatter::extract(&raw).map_err(|source| ContentError::Extract {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(metadata)
}

/// Resolves a single post by slug. `Ok(None)` means no such post: either the
/// slug does not name a file under the content directory, or it was rejected
/// outright because it could escape it.
pub async fn get_post(
    posts_dir: &Path,
    slug: &str,
) -> Result<Option<RenderedPost>, ContentError> {
    let Some(path) = slug_path(posts_dir, slug) else {
        return Ok(None);
    };

    let raw = match fs::read_to_string(&path).await {
        Ok(raw) => raw,
        Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(ContentError::Io { path, source }),
    };

    let (metadata, body) = frontmatter::extract(&raw).map_err(|source| ContentError::Extract {
        path,
        source,
    })?;
    Ok(Some(RenderedPost {
        metadata,
        html: render_markdown_to_html(body),
    }))
}

/// Builds `<slug>.md` under the content directory. Slugs are restricted to
/// ASCII alphanumerics, `-` and `_`, which rules out separators and `..`
/// before any path is constructed.
fn slug_path(posts_dir: &Path, slug: &str) -> Option<PathBuf> {
    let valid = !slug.is_empty()
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    valid.then(|| posts_dir.join(format!("{slug}.md")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs as std_fs;

    const HELLO_WORLD: &str = "---\ntitle: Hello World\nslug: hello-world\nposted_at: 2024-01-01\ntldr: first post\n---\n# Hi\n\nWelcome.";

    fn write_post(dir: &Path, name: &str, contents: &str) {
        std_fs::write(dir.join(name), contents).unwrap();
    }

    #[tokio::test]
    async fn empty_directory_lists_no_posts() {
        let dir = tempfile::tempdir().unwrap();
        let posts = list_posts(dir.path(), ListingPolicy::Abort).await.unwrap();
        assert!(posts.is_empty());
    }

    #[tokio::test]
    async fn lists_metadata_for_each_post() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "hello-world.md", HELLO_WORLD);
        std_fs::create_dir(dir.path().join("drafts")).unwrap();

        let posts = list_posts(dir.path(), ListingPolicy::Abort).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Hello World");
        assert_eq!(posts[0].slug, "hello-world");
        assert_eq!(posts[0].posted_at, "2024-01-01");
        assert_eq!(posts[0].tldr.as_deref(), Some("first post"));
    }

    #[tokio::test]
    async fn abort_policy_surfaces_a_bad_file() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "good.md", HELLO_WORLD);
        write_post(dir.path(), "bad.md", "no frontmatter here");

        let err = list_posts(dir.path(), ListingPolicy::Abort).await.unwrap_err();
        assert!(matches!(err, ContentError::Extract { .. }));
    }

    #[tokio::test]
    async fn skip_policy_keeps_the_good_files() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "good.md", HELLO_WORLD);
        write_post(dir.path(), "bad.md", "no frontmatter here");

        let posts = list_posts(dir.path(), ListingPolicy::Skip).await.unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].slug, "hello-world");
    }

    #[tokio::test]
    async fn resolves_a_post_and_renders_its_body() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "hello-world.md", HELLO_WORLD);

        let post = get_post(dir.path(), "hello-world").await.unwrap().unwrap();
        assert_eq!(post.metadata.title, "Hello World");
        assert!(post.html.contains("<h1>Hi</h1>"));
        assert!(post.html.contains("<p>Welcome.</p>"));
    }

    #[tokio::test]
    async fn missing_slug_is_not_found_not_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let outcome = get_post(dir.path(), "missing-post").await.unwrap();
        assert!(outcome.is_none());
    }

    #[tokio::test]
    async fn traversal_slugs_never_leave_the_content_directory() {
        let root = tempfile::tempdir().unwrap();
        let posts_dir = root.path().join("posts");
        std_fs::create_dir(&posts_dir).unwrap();
        // A real file one level up that a naive join would reach.
        std_fs::write(root.path().join("secret.md"), HELLO_WORLD).unwrap();

        for slug in ["../secret", "..", "a/b", "a\\b", ""] {
            let outcome = get_post(&posts_dir, slug).await.unwrap();
            assert!(outcome.is_none(), "slug {slug:?} should not resolve");
        }
    }

    #[tokio::test]
    async fn extraction_failure_on_existing_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        write_post(dir.path(), "broken.md", "---\ntitle: \"unterminated\n---\nbody");

        let err = get_post(dir.path(), "broken").await.unwrap_err();
        assert!(matches!(err, ContentError::Extract { .. }));
    }
}
