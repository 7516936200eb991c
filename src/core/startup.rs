use tracing::{info, warn};

use crate::core::config::{Config, StrategyKind};
use crate::core::state::AppState;
use crate::prediction::artifacts::ModelArtifacts;
use crate::stores::credential_store::CredentialStore;

// this runs at boot time
pub fn build_state(config: Config) -> AppState {
    let artifacts = match config.prediction.strategy {
        StrategyKind::Model => {
            ModelArtifacts::load_or_unavailable(config.prediction.model_dir.as_deref())
        }
        StrategyKind::Linear => None,
    };

    let state = AppState::new(config, artifacts);

    report_startup(&state);

    state
}

fn report_startup(state: &AppState) {
    let accounts = state.credentials.load().len();

    info!(
        credentials_path = %state.config.storage.credentials_path.display(),
        accounts,
        "Credential store ready"
    );

    if state.predictor.is_available() {
        info!(
            strategy = state.predictor.primary_name(),
            fallback_to_linear = state.config.prediction.fallback_to_linear,
            "Prediction ready"
        );
    } else {
        warn!(
            strategy = state.predictor.primary_name(),
            "Prediction unavailable, Predict page will be disabled"
        );
    }
}
