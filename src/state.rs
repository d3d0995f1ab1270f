use crate::config::Config;
use crate::models::Project;

pub struct AppState {
    pub config: Config,
    /// Loaded once at startup from the projects data file.
    pub projects: Vec<Project>,
}
