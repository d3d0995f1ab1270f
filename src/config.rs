use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;
use tokio::fs;

use crate::models::Project;
use crate::posts::ListingPolicy;

#[derive(Debug, Clone)]
pub struct Config {
    /// Root of the site content: layout/banner/not-found templates, home.md,
    /// and the posts/ subdirectory.
    pub content_dir: PathBuf,
    pub static_dir: PathBuf,
    pub projects_file: PathBuf,
    pub port: u16,
    pub listing_policy: ListingPolicy,
}

impl Config {
    pub fn from_env() -> Self {
        let listing_policy = match std::env::var("LISTING_POLICY").ok().as_deref() {
            Some("skip") => ListingPolicy::Skip,
            _ => ListingPolicy::Abort,
        };

        Self {
            content_dir: env_path("CONTENT_DIR", "content"),
            static_dir: env_path("STATIC_DIR", "static"),
            projects_file: env_path("PROJECTS_FILE", "projects.toml"),
            port: std::env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
            listing_policy,
        }
    }

    pub fn posts_dir(&self) -> PathBuf {
        self.content_dir.join("posts")
    }
}

fn env_path(var: &str, default: &str) -> PathBuf {
    std::env::var(var).map_or_else(|_| PathBuf::from(default), PathBuf::from)
}

#[derive(Debug, Error)]
pub enum ProjectsError {
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid projects file {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Deserialize)]
struct ProjectsFile {
    #[serde(default)]
    projects: Vec<Project>,
}

/// Loads the showcase projects from a TOML data file, so content changes do
/// not require a rebuild.
pub async fn load_projects(path: &Path) -> Result<Vec<Project>, ProjectsError> {
    let raw = fs::read_to_string(path).await.map_err(|source| ProjectsError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let parsed: ProjectsFile = toml::from_str(&raw).map_err(|source| ProjectsError::Parse {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(parsed.projects)
}
