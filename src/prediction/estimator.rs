use crate::core::config::{PredictionConfig, StrategyKind};
use crate::core::error::PredictionError;
use crate::models::claim::FormInput;
use crate::prediction::artifacts::ModelArtifacts;
use crate::prediction::features::{build_feature_vector, check_schema};
use crate::utils::currency::is_representable;
use std::sync::Arc;
use tracing::warn;

pub const PREMIUM_WEIGHT: f64 = 1.5;
pub const INCOME_WEIGHT: f64 = 0.01;

/// A claim amount estimator
///
/// Implementations are pure: the same input always gives the same amount and
/// nothing outside the estimator is touched.
pub trait ClaimEstimator: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_available(&self) -> bool {
        true
    }

    fn estimate(&self, input: &FormInput) -> Result<f64, PredictionError>;
}

/// `premium * 1.5 + income * 0.01`
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearEstimator;

impl ClaimEstimator for LinearEstimator {
    fn name(&self) -> &'static str {
        "linear"
    }

    fn estimate(&self, input: &FormInput) -> Result<f64, PredictionError> {
        Ok(input.monthly_premium * PREMIUM_WEIGHT + input.annual_income * INCOME_WEIGHT)
    }
}

/// Trained model applied to the scaled, schema-aligned feature vector
pub struct ModelEstimator {
    artifacts: Option<Arc<ModelArtifacts>>,
}

impl ModelEstimator {
    pub fn new(artifacts: Option<Arc<ModelArtifacts>>) -> Self {
        // A feature list that cannot be aligned against is as good as missing
        let artifacts = artifacts.filter(|a| match check_schema(&a.features) {
            Ok(()) => true,
            Err(e) => {
                warn!(error = %e, "Model feature list rejected, model strategy unavailable");
                false
            }
        });
        Self { artifacts }
    }

    pub fn unavailable() -> Self {
        Self { artifacts: None }
    }
}

impl ClaimEstimator for ModelEstimator {
    fn name(&self) -> &'static str {
        "model"
    }

    fn is_available(&self) -> bool {
        self.artifacts.is_some()
    }

    fn estimate(&self, input: &FormInput) -> Result<f64, PredictionError> {
        let artifacts = self
            .artifacts
            .as_ref()
            .ok_or(PredictionError::ModelUnavailable)?;

        let vector = build_feature_vector(input, &artifacts.features)?;
        let scaled = artifacts.scaler.transform(&[vector]);

        artifacts
            .model
            .predict(&scaled)
            .first()
            .copied()
            .ok_or_else(|| PredictionError::SchemaMismatch("model returned no prediction".to_string()))
    }
}

/// Outcome of a successful estimate, tagged with the strategy that produced it
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Estimate {
    pub amount: f64,
    pub strategy: &'static str,
    pub fell_back: bool,
}

/// Configured primary strategy with an optional linear fallback
pub struct Predictor {
    primary: Box<dyn ClaimEstimator>,
    fallback: Option<Box<dyn ClaimEstimator>>,
}

impl Predictor {
    pub fn new(primary: Box<dyn ClaimEstimator>, fallback: Option<Box<dyn ClaimEstimator>>) -> Self {
        Self { primary, fallback }
    }

    pub fn from_config(config: &PredictionConfig, artifacts: Option<Arc<ModelArtifacts>>) -> Self {
        match config.strategy {
            StrategyKind::Linear => Self::new(Box::new(LinearEstimator), None),
            StrategyKind::Model => {
                let fallback: Option<Box<dyn ClaimEstimator>> = if config.fallback_to_linear {
                    Some(Box::new(LinearEstimator))
                } else {
                    None
                };
                Self::new(Box::new(ModelEstimator::new(artifacts)), fallback)
            }
        }
    }

    /// Whether the Predict page can produce an amount at all
    pub fn is_available(&self) -> bool {
        self.primary.is_available() || self.fallback.as_ref().is_some_and(|f| f.is_available())
    }

    pub fn primary_name(&self) -> &'static str {
        self.primary.name()
    }

    /// Run the primary strategy, falling back to linear only when the model
    /// is unavailable. Amounts that cannot be recorded are refused.
    pub fn estimate(&self, input: &FormInput) -> Result<Estimate, PredictionError> {
        let estimate = self.run(input)?;
        if !is_representable(estimate.amount) {
            return Err(PredictionError::InvalidEstimate(format!(
                "{} strategy produced {}",
                estimate.strategy, estimate.amount
            )));
        }
        Ok(estimate)
    }

    fn run(&self, input: &FormInput) -> Result<Estimate, PredictionError> {
        match self.primary.estimate(input) {
            Ok(amount) => Ok(Estimate {
                amount,
                strategy: self.primary.name(),
                fell_back: false,
            }),
            Err(PredictionError::ModelUnavailable) => match &self.fallback {
                Some(fallback) => {
                    let amount = fallback.estimate(input)?;
                    Ok(Estimate {
                        amount,
                        strategy: fallback.name(),
                        fell_back: true,
                    })
                }
                None => Err(PredictionError::ModelUnavailable),
            },
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::claim::{Gender, VehicleCategory};
    use crate::prediction::artifacts::tests::write_artifacts;
    use crate::prediction::features::default_schema;
    use tempfile::TempDir;

    fn input(premium: f64, income: f64) -> FormInput {
        FormInput {
            driver_age: 36,
            annual_income: income,
            monthly_premium: premium,
            dependents: 3,
            gender: Gender::Male,
            vehicle_category: VehicleCategory::Cars,
        }
    }

    fn model_config(fallback_to_linear: bool) -> PredictionConfig {
        PredictionConfig {
            strategy: StrategyKind::Model,
            fallback_to_linear,
            model_dir: None,
        }
    }

    #[test]
    fn test_linear_formula() {
        let amount = LinearEstimator.estimate(&input(150.0, 60000.0)).unwrap();
        assert_eq!(amount, 150.0 * 1.5 + 60000.0 * 0.01);
        assert_eq!(amount, 825.0);
    }

    #[test]
    fn test_linear_is_deterministic() {
        let form = input(99.5, 12345.0);
        assert_eq!(
            LinearEstimator.estimate(&form).unwrap(),
            LinearEstimator.estimate(&form).unwrap()
        );
    }

    #[test]
    fn test_model_unavailable() {
        let estimator = ModelEstimator::unavailable();
        assert!(!estimator.is_available());
        assert_eq!(
            estimator.estimate(&input(150.0, 60000.0)),
            Err(PredictionError::ModelUnavailable)
        );
    }

    #[test]
    fn test_model_estimate_uses_aligned_features() {
        let dir = TempDir::new().unwrap();
        // Reverse order on purpose: alignment must follow the feature list
        write_artifacts(
            dir.path(),
            &["vehicle_category_Cars", "dependents", "monthly_premium", "annual_income", "driver_age"],
            &[100.0, 10.0, 2.0, 0.0, 1.0],
            5.0,
        );
        let artifacts = ModelArtifacts::load(dir.path()).unwrap();
        let estimator = ModelEstimator::new(Some(Arc::new(artifacts)));

        let amount = estimator.estimate(&input(150.0, 60000.0)).unwrap();
        // 5 + 100*1 + 10*3 + 2*150 + 0*60000 + 1*36
        assert_eq!(amount, 471.0);
    }

    #[test]
    fn test_model_with_bad_feature_list_is_unavailable() {
        let dir = TempDir::new().unwrap();
        write_artifacts(dir.path(), &["driver_age", "annual_income"], &[1.0, 1.0], 0.0);
        let artifacts = ModelArtifacts::load(dir.path()).unwrap();

        let estimator = ModelEstimator::new(Some(Arc::new(artifacts)));
        assert!(!estimator.is_available());
    }

    #[test]
    fn test_predictor_falls_back_to_linear() {
        let predictor = Predictor::from_config(&model_config(true), None);
        assert!(predictor.is_available());
        assert_eq!(predictor.primary_name(), "model");

        let estimate = predictor.estimate(&input(150.0, 60000.0)).unwrap();
        assert_eq!(estimate.amount, 825.0);
        assert_eq!(estimate.strategy, "linear");
        assert!(estimate.fell_back);
    }

    #[test]
    fn test_predictor_without_fallback_reports_unavailable() {
        let predictor = Predictor::from_config(&model_config(false), None);
        assert!(!predictor.is_available());
        assert_eq!(
            predictor.estimate(&input(150.0, 60000.0)),
            Err(PredictionError::ModelUnavailable)
        );
    }

    #[test]
    fn test_predictor_refuses_non_finite_amount() {
        let predictor = Predictor::from_config(&PredictionConfig::default(), None);

        let result = predictor.estimate(&input(1.7e308, 0.0));
        assert!(matches!(result, Err(PredictionError::InvalidEstimate(_))));

        // Finite but past the exact-paisa range
        let result = predictor.estimate(&input(1e18, 0.0));
        assert!(matches!(result, Err(PredictionError::InvalidEstimate(_))));
    }

    #[test]
    fn test_predictor_uses_model_when_loaded() {
        let dir = TempDir::new().unwrap();
        let schema = default_schema();
        let names: Vec<&str> = schema.iter().map(|s| s.as_str()).collect();
        write_artifacts(dir.path(), &names, &vec![0.0; names.len()], 42.0);
        let artifacts = Arc::new(ModelArtifacts::load(dir.path()).unwrap());

        let predictor = Predictor::from_config(&model_config(true), Some(artifacts));
        let estimate = predictor.estimate(&input(150.0, 60000.0)).unwrap();
        assert_eq!(estimate.amount, 42.0);
        assert_eq!(estimate.strategy, "model");
        assert!(!estimate.fell_back);
    }
}
