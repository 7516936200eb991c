use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::path::Path;
use tracing::{info, warn};

pub const MODEL_FILE: &str = "model.json";
pub const SCALER_FILE: &str = "scaler.json";
pub const FEATURES_FILE: &str = "features.json";

/// A trained regressor treated as an opaque function over feature rows
pub trait RegressionModel: Send + Sync {
    fn predict(&self, rows: &[Vec<f64>]) -> Vec<f64>;
}

/// Feature scaler fitted alongside the model
pub trait FeatureScaler: Send + Sync {
    fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>>;
}

/// Linear regressor: `intercept + sum(coef_i * x_i)`
#[derive(Debug, Clone, Deserialize)]
pub struct LinearRegressionModel {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl RegressionModel for LinearRegressionModel {
    fn predict(&self, rows: &[Vec<f64>]) -> Vec<f64> {
        rows.iter()
            .map(|row| {
                self.intercept
                    + row
                        .iter()
                        .zip(&self.coefficients)
                        .map(|(x, c)| x * c)
                        .sum::<f64>()
            })
            .collect()
    }
}

/// Standard scaler: `(x - mean) / scale`, a zero scale leaves the centred value
#[derive(Debug, Clone, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl FeatureScaler for StandardScaler {
    fn transform(&self, rows: &[Vec<f64>]) -> Vec<Vec<f64>> {
        rows.iter()
            .map(|row| {
                row.iter()
                    .enumerate()
                    .map(|(i, x)| {
                        let mean = self.mean.get(i).copied().unwrap_or(0.0);
                        let scale = self.scale.get(i).copied().unwrap_or(1.0);
                        if scale == 0.0 {
                            x - mean
                        } else {
                            (x - mean) / scale
                        }
                    })
                    .collect()
            })
            .collect()
    }
}

/// Model, scaler and expected feature list, loaded together
pub struct ModelArtifacts {
    pub model: Box<dyn RegressionModel>,
    pub scaler: Box<dyn FeatureScaler>,
    pub features: Vec<String>,
}

impl ModelArtifacts {
    /// Load all three artifacts from `dir`
    pub fn load(dir: &Path) -> Result<Self> {
        let model: LinearRegressionModel = read_json(&dir.join(MODEL_FILE))?;
        let scaler: StandardScaler = read_json(&dir.join(SCALER_FILE))?;
        let features: Vec<String> = read_json(&dir.join(FEATURES_FILE))?;

        if features.is_empty() {
            bail!("Feature list is empty");
        }

        if model.coefficients.len() != features.len() {
            bail!(
                "Model has {} coefficients but {} features are expected",
                model.coefficients.len(),
                features.len()
            );
        }

        if scaler.mean.len() != features.len() || scaler.scale.len() != features.len() {
            bail!(
                "Scaler dimensions (mean {}, scale {}) do not match {} features",
                scaler.mean.len(),
                scaler.scale.len(),
                features.len()
            );
        }

        Ok(Self {
            model: Box::new(model),
            scaler: Box::new(scaler),
            features,
        })
    }

    /// Load artifacts, degrading to `None` on any failure
    pub fn load_or_unavailable(dir: Option<&Path>) -> Option<Self> {
        let dir = match dir {
            Some(dir) => dir,
            None => {
                info!("No model directory configured, model strategy unavailable");
                return None;
            }
        };

        match Self::load(dir) {
            Ok(artifacts) => {
                info!(
                    model_dir = %dir.display(),
                    features = artifacts.features.len(),
                    "Model artifacts loaded"
                );
                Some(artifacts)
            }
            Err(e) => {
                warn!(
                    model_dir = %dir.display(),
                    error = %format!("{:#}", e),
                    "Failed to load model artifacts, model strategy unavailable"
                );
                None
            }
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path)
        .context(format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).context(format!("Failed to parse {}", path.display()))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    pub(crate) fn write_artifacts(dir: &Path, features: &[&str], coefficients: &[f64], intercept: f64) {
        let n = features.len();
        fs::write(
            dir.join(MODEL_FILE),
            serde_json::json!({ "coefficients": coefficients, "intercept": intercept }).to_string(),
        )
        .unwrap();
        fs::write(
            dir.join(SCALER_FILE),
            serde_json::json!({ "mean": vec![0.0; n], "scale": vec![1.0; n] }).to_string(),
        )
        .unwrap();
        fs::write(dir.join(FEATURES_FILE), serde_json::json!(features).to_string()).unwrap();
    }

    #[test]
    fn test_linear_model_predict() {
        let model = LinearRegressionModel {
            coefficients: vec![2.0, 0.5],
            intercept: 10.0,
        };
        assert_eq!(model.predict(&[vec![1.0, 4.0], vec![0.0, 0.0]]), vec![14.0, 10.0]);
    }

    #[test]
    fn test_standard_scaler_transform() {
        let scaler = StandardScaler {
            mean: vec![10.0, 5.0],
            scale: vec![2.0, 0.0],
        };
        assert_eq!(scaler.transform(&[vec![14.0, 7.0]]), vec![vec![2.0, 2.0]]);
    }

    #[test]
    fn test_load_valid_artifacts() {
        let dir = TempDir::new().unwrap();
        write_artifacts(dir.path(), &["driver_age", "annual_income"], &[1.0, 2.0], 0.0);

        let artifacts = ModelArtifacts::load(dir.path()).unwrap();
        assert_eq!(artifacts.features, vec!["driver_age", "annual_income"]);
    }

    #[test]
    fn test_load_dimension_mismatch() {
        let dir = TempDir::new().unwrap();
        write_artifacts(dir.path(), &["driver_age", "annual_income"], &[1.0], 0.0);

        assert!(ModelArtifacts::load(dir.path()).is_err());
    }

    #[test]
    fn test_missing_artifacts_degrade_to_none() {
        let dir = TempDir::new().unwrap();
        assert!(ModelArtifacts::load_or_unavailable(Some(dir.path())).is_none());
        assert!(ModelArtifacts::load_or_unavailable(None).is_none());
    }
}
