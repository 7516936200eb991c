pub mod artifacts;
pub mod estimator;
pub mod features;
