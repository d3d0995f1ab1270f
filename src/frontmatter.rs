use thiserror::Error;

use crate::models::PostMetadata;

#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("document does not contain a complete frontmatter block")]
    MalformedDocument,
    #[error("invalid frontmatter syntax: {0}")]
    InvalidSyntax(#[source] serde_yaml::Error),
}

/// Splits a raw document into frontmatter metadata and the remaining body.
///
/// A document is three sections separated by the literal `---` marker: a
/// prefix (normally empty, discarded), the frontmatter block, and the body.
/// The split is bounded to three parts, so `---` occurrences inside the body
/// are passed through untouched. The body is returned verbatim, including
/// leading whitespace.
///
/// An empty frontmatter block is valid and yields default metadata; a
/// document with fewer than two markers is malformed.
pub fn extract(raw: &str) -> Result<(PostMetadata, &str), ExtractError> {
    let mut parts = raw.splitn(3, "---");
    let _prefix = parts.next();
    let block = parts.next().ok_or(ExtractError::MalformedDocument)?;
    let body = parts.next().ok_or(ExtractError::MalformedDocument)?;

    let metadata = if block.trim().is_empty() {
        PostMetadata::default()
    } else {
        serde_yaml::from_str(block).map_err(ExtractError::InvalidSyntax)?
    };

    Ok((metadata, body))
}
