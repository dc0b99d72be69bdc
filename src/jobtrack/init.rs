use crate::api::{JobtrackApi, JobtrackPaths};
use crate::config::JobtrackConfig;
use crate::error::{JobtrackError, Result};
use crate::prep::gemini::GeminiClient;
use crate::prep::{PrepService, TextGenerator};
use crate::store::fs_backend::FsBackend;
use crate::store::RecordStore;
use directories::ProjectDirs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Overrides the platform data directory when set.
pub const HOME_ENV: &str = "JOBTRACK_HOME";

pub struct JobtrackContext {
    pub api: JobtrackApi<FsBackend>,
}

/// Data directory: explicit override, then `JOBTRACK_HOME`, then the
/// platform data directory.
pub fn resolve_data_dir(data_override: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = data_override {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(HOME_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "jobtrack", "jobtrack")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| JobtrackError::Store("Could not determine a data directory".into()))
}

/// Builds the prep service from config. Without an API key, or if the HTTP
/// client cannot be built, generation is disabled and CRUD is unaffected.
pub fn build_prep_service(config: &JobtrackConfig) -> PrepService {
    let Some(api_key) = config.api_key() else {
        debug!(env = %config.api_key_env, "no API key; generation disabled");
        return PrepService::disabled();
    };

    match GeminiClient::new(
        api_key,
        config.api_base.clone(),
        config.model.clone(),
        Duration::from_secs(config.timeout_secs),
    ) {
        Ok(client) => {
            let generator: Arc<dyn TextGenerator> = Arc::new(client);
            PrepService::new(Some(generator))
        }
        Err(e) => {
            warn!(error = %e, "could not build the generation client; generation disabled");
            PrepService::disabled()
        }
    }
}

pub fn initialize(data_override: Option<&Path>) -> Result<JobtrackContext> {
    let data_dir = resolve_data_dir(data_override)?;
    debug!(dir = %data_dir.display(), "using data directory");

    let config = JobtrackConfig::load(&data_dir).unwrap_or_else(|e| {
        warn!(error = %e, "unreadable config.json; using defaults");
        JobtrackConfig::default()
    });

    let store = RecordStore::open(FsBackend::new(data_dir.clone()));
    let prep = build_prep_service(&config);
    let api = JobtrackApi::new(store, prep, JobtrackPaths { data_dir });

    Ok(JobtrackContext { api })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ApplicationDraft;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_override_wins() {
        let temp = TempDir::new().unwrap();
        let dir = resolve_data_dir(Some(temp.path())).unwrap();
        assert_eq!(dir, temp.path());
    }

    #[test]
    fn test_initialize_round_trips_through_disk() {
        let temp = TempDir::new().unwrap();

        let mut ctx = initialize(Some(temp.path())).unwrap();
        ctx.api
            .add_application(ApplicationDraft::new("Acme", "Dev"))
            .unwrap();
        assert!(temp.path().join("jobApplications").exists());

        let reopened = initialize(Some(temp.path())).unwrap();
        assert_eq!(reopened.api.store().len(), 1);
    }

    #[test]
    fn test_bad_config_falls_back_to_defaults() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("config.json"), "{ not json").unwrap();

        let ctx = initialize(Some(temp.path())).unwrap();
        assert!(ctx.api.store().is_empty());
        assert_eq!(
            fs::read_to_string(temp.path().join("config.json")).unwrap(),
            "{ not json"
        );
    }

    #[test]
    fn test_missing_key_disables_generation() {
        let config = JobtrackConfig {
            api_key_env: "JOBTRACK_INIT_TEST_UNSET_KEY".into(),
            ..Default::default()
        };
        assert!(!build_prep_service(&config).is_enabled());
    }
}
