use serde::Deserialize;

/// Metadata carried in a post's frontmatter block.
///
/// Missing keys fall back to their defaults rather than failing the parse;
/// unknown keys are ignored so new fields can be added to content files
/// before the server learns about them.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct PostMetadata {
    pub title: String,
    pub slug: String,
    /// Opaque display string; no calendar validation is performed.
    pub posted_at: String,
    pub tldr: Option<String>,
}

/// A post resolved by slug, with its markdown body already rendered.
#[derive(Debug, Clone)]
pub struct RenderedPost {
    pub metadata: PostMetadata,
    pub html: String,
}

/// An entry on the projects page, loaded from the projects data file.
#[derive(Deserialize, Debug, Clone)]
pub struct Project {
    pub name: String,
    pub url: String,
    pub description: String,
}
