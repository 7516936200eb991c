// Application state (AppState)

use crate::core::config::Config;
use crate::metrics::collector::Metrics;
use crate::prediction::artifacts::ModelArtifacts;
use crate::prediction::estimator::Predictor;
use crate::stores::credential_store::CredentialStore;
use crate::stores::file_credentials::FileCredentialStore;
use crate::stores::session_store::SessionStore;
use std::sync::Arc;

/// Shared application state
///
/// Contains all shared components that are accessed by request handlers.
/// All fields are wrapped in Arc for efficient cloning across threads.
#[derive(Clone)]
pub struct AppState {
    /// Registered accounts
    pub credentials: Arc<dyn CredentialStore>,

    /// Live portal sessions
    pub sessions: Arc<SessionStore>,

    /// Configured prediction strategy
    pub predictor: Arc<Predictor>,

    /// Metrics collector for tracking statistics
    pub metrics: Arc<Metrics>,

    /// Configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Build state backed by the configured credential file and model
    /// artifacts (already loaded by the caller)
    pub fn new(config: Config, artifacts: Option<ModelArtifacts>) -> Self {
        let credentials: Arc<dyn CredentialStore> = Arc::new(FileCredentialStore::new(
            config.storage.credentials_path.clone(),
        ));
        Self::with_credentials(config, credentials, artifacts)
    }

    pub fn with_credentials(
        config: Config,
        credentials: Arc<dyn CredentialStore>,
        artifacts: Option<ModelArtifacts>,
    ) -> Self {
        let config = Arc::new(config);

        let predictor = Predictor::from_config(&config.prediction, artifacts.map(Arc::new));

        Self {
            credentials,
            sessions: Arc::new(SessionStore::new(config.session.history_capacity)),
            predictor: Arc::new(predictor),
            metrics: Arc::new(Metrics::new()),
            config,
        }
    }
}
