//! Schema definitions for declarative benchmark configuration
//!
//! Every plugin-selected block carries a `component` discriminator string
//! naming the implementation the consuming framework instantiates, followed
//! by implementation-specific parameters.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Complete benchmark run specification
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    /// Schema version tag ("single")
    pub version: String,

    /// Seed for reproducible sampling and splits
    pub random_seed: u64,

    /// Source dataset cache location
    pub tfds_data_dir: PathBuf,

    /// Where hyperparameter sweeps are written
    pub hyperparameter_dir: PathBuf,

    /// Where benchmark results are written
    pub benchmark_dir: PathBuf,

    /// Where preprocessed datasets are written
    pub dataset_dir: PathBuf,

    /// Dataset name -> dataset descriptor
    pub datasets: BTreeMap<String, DatasetConfig>,

    /// Preprocessing stage name -> transform descriptor
    pub preprocess: BTreeMap<String, TransformConfig>,

    /// Train/test augmentation pipelines
    pub augmentations: AugmentationConfig,

    /// Architecture name -> model descriptor
    pub architectures: BTreeMap<String, ArchitectureConfig>,

    /// Loss name -> loss descriptor
    pub losses: BTreeMap<String, LossConfig>,

    /// Optimizer name -> optimizer descriptor
    pub optimizer: BTreeMap<String, OptimizerConfig>,

    /// Ordered training phases; execution order is significant
    pub training: Vec<TrainingPhase>,

    /// Metric name -> metric parameters
    pub evaluation: BTreeMap<String, MetricConfig>,
}

/// Half-open class id range `[start, end)`, serialized as a two-element array
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "[u32; 2]", into = "[u32; 2]")]
pub struct ClassRange {
    pub start: u32,
    pub end: u32,
}

impl ClassRange {
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Number of classes covered by the range
    pub fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    pub fn contains(&self, class_id: u32) -> bool {
        class_id >= self.start && class_id < self.end
    }

    pub fn overlaps(&self, other: &ClassRange) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl From<[u32; 2]> for ClassRange {
    fn from([start, end]: [u32; 2]) -> Self {
        Self { start, end }
    }
}

impl From<ClassRange> for [u32; 2] {
    fn from(range: ClassRange) -> Self {
        [range.start, range.end]
    }
}

/// Dataset source descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetConfig {
    /// Source adapter tag (e.g. "tfds")
    pub component: String,

    /// Identifier within the source catalog
    pub dataset_id: String,

    /// Field name holding the input example
    pub x_key: String,

    /// Field name holding the class label
    pub y_key: String,

    /// Classes used for training
    pub train_classes: ClassRange,

    /// Classes held out for retrieval evaluation
    pub test_classes: ClassRange,

    /// Cross-validation split layout over the training classes
    pub train_val_splits: TrainValSplits,

    /// Caps applied during periodic retrieval evaluation
    pub eval_callback: EvalCallback,
}

/// Train/validation split layout
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrainValSplits {
    /// Number of cross-validation splits
    pub num_splits: u32,

    /// Fraction of training classes held out for validation, in [0, 1]
    pub val_class_pctg: f64,
}

/// Query/target caps for the evaluation callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvalCallback {
    pub max_num_queries: u32,
    pub max_num_targets: u32,
}

/// Preprocessing or augmentation stage descriptor
///
/// Transform-specific parameters (crop height/width, area ranges,
/// orientation modes) are carried in the flattened parameter map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformConfig {
    /// Transform implementation tag
    pub component: String,

    /// Transform-specific parameters
    #[serde(flatten)]
    pub params: BTreeMap<String, serde_json::Value>,
}

impl TransformConfig {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            params: BTreeMap::new(),
        }
    }

    /// Add a parameter (builder style)
    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    /// Integer parameter accessor
    pub fn u64_param(&self, key: &str) -> Option<u64> {
        self.params.get(key).and_then(|v| v.as_u64())
    }

    /// Float parameter accessor
    pub fn f64_param(&self, key: &str) -> Option<f64> {
        self.params.get(key).and_then(|v| v.as_f64())
    }

    /// String parameter accessor
    pub fn str_param(&self, key: &str) -> Option<&str> {
        self.params.get(key).and_then(|v| v.as_str())
    }

    /// Two-element float interval accessor (e.g. `area_range`)
    pub fn interval_param(&self, key: &str) -> Option<[f64; 2]> {
        let values = self.params.get(key)?.as_array()?;
        match values.as_slice() {
            [lo, hi] => Some([lo.as_f64()?, hi.as_f64()?]),
            _ => None,
        }
    }
}

/// Train/test augmentation pipelines, keyed by stage name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AugmentationConfig {
    pub train: BTreeMap<String, TransformConfig>,
    pub test: BTreeMap<String, TransformConfig>,
}

/// Which model layers receive gradient updates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trainable {
    /// All layers updated
    Full,
    /// Only the embedding head updated
    Partial,
    /// Backbone frozen, no updates
    Frozen,
}

/// Model architecture descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArchitectureConfig {
    /// Architecture implementation tag
    pub component: String,

    /// Input tensor shape (height, width, channels)
    pub input_shape: [u32; 3],

    /// Output embedding dimensionalities, in head order
    pub embedding_sizes: Vec<u32>,

    /// Which layers are updated during training
    pub trainable: Trainable,
}

/// Metric-learning loss descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LossConfig {
    /// Loss implementation tag
    pub component: String,

    /// Loss-specific scalar hyperparameters
    #[serde(flatten)]
    pub params: BTreeMap<String, serde_json::Value>,
}

impl LossConfig {
    pub fn new(component: impl Into<String>) -> Self {
        Self {
            component: component.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn f64_param(&self, key: &str) -> Option<f64> {
        self.params.get(key).and_then(|v| v.as_f64())
    }
}

/// Optimizer descriptor
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptimizerConfig {
    /// Optimizer implementation tag
    pub component: String,

    /// Base learning rate
    pub lr: f64,

    /// Optimizer-specific parameters
    #[serde(flatten)]
    pub params: BTreeMap<String, serde_json::Value>,
}

/// One phase of the training schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingPhase {
    /// Phase identifier
    pub name: String,

    /// Batch composition for training steps
    pub train: BatchSampling,

    /// Batch composition for validation steps
    pub val: BatchSampling,

    pub steps_per_epoch: u32,

    pub epochs: u32,

    pub lr_schedule: LrSchedule,
}

/// Structured batch composition for metric-learning sampling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSampling {
    pub classes_per_batch: u32,
    pub examples_per_class_per_batch: u32,
}

impl BatchSampling {
    /// Effective batch size
    pub fn batch_size(&self) -> u32 {
        self.classes_per_batch * self.examples_per_class_per_batch
    }
}

/// Learning rate warmup/decay schedule
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LrSchedule {
    /// Fraction of total steps spent warming up, in [0, 1]
    pub warmup_pctg: f64,

    /// Learning rate floor after decay
    pub min_lr: f64,
}

/// Aggregation mode for ranked retrieval metrics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AverageMode {
    /// Average over all queries
    Micro,
    /// Average per class, then over classes
    Macro,
}

/// Retrieval metric parameters; parameterless metrics serialize as `{}`
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MetricConfig {
    /// Ranks at which the metric is computed, strictly increasing
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub k: Option<Vec<u32>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub average: Option<AverageMode>,
}

impl MetricConfig {
    /// Metric computed at the given ranks
    pub fn at_k(k: Vec<u32>, average: AverageMode) -> Self {
        Self {
            k: Some(k),
            average: Some(average),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_range_serializes_as_pair() {
        let range = ClassRange::new(0, 98);
        let json = serde_json::to_string(&range).unwrap();
        assert_eq!(json, "[0,98]");

        let parsed: ClassRange = serde_json::from_str("[98,196]").unwrap();
        assert_eq!(parsed, ClassRange::new(98, 196));
    }

    #[test]
    fn test_class_range_half_open() {
        let range = ClassRange::new(0, 98);
        assert_eq!(range.len(), 98);
        assert!(range.contains(0));
        assert!(range.contains(97));
        assert!(!range.contains(98));
    }

    #[test]
    fn test_class_range_overlap() {
        let train = ClassRange::new(0, 98);
        let test = ClassRange::new(98, 196);
        assert!(!train.overlaps(&test));
        assert!(train.overlaps(&ClassRange::new(97, 196)));
        assert!(train.overlaps(&train));
    }

    #[test]
    fn test_transform_params_flattened() {
        let json = r#"{"component": "center_crop", "height": 256, "width": 256}"#;
        let transform: TransformConfig = serde_json::from_str(json).unwrap();
        assert_eq!(transform.component, "center_crop");
        assert_eq!(transform.u64_param("height"), Some(256));
        assert_eq!(transform.u64_param("width"), Some(256));
    }

    #[test]
    fn test_transform_interval_param() {
        let transform = TransformConfig::new("random_resized_crop")
            .with_param("area_range", serde_json::json!([0.15625, 1.0]));
        assert_eq!(transform.interval_param("area_range"), Some([0.15625, 1.0]));

        let bad = TransformConfig::new("random_resized_crop")
            .with_param("area_range", serde_json::json!([0.5]));
        assert_eq!(bad.interval_param("area_range"), None);
    }

    #[test]
    fn test_trainable_serde() {
        let json = r#""full""#;
        let trainable: Trainable = serde_json::from_str(json).unwrap();
        assert_eq!(trainable, Trainable::Full);
        assert!(serde_json::from_str::<Trainable>(r#""everything""#).is_err());
    }

    #[test]
    fn test_optimizer_params_flattened() {
        let json = r#"{"component": "lamb", "lr": 0.0001, "weight_decay": 0.01}"#;
        let optim: OptimizerConfig = serde_json::from_str(json).unwrap();
        assert_eq!(optim.component, "lamb");
        assert!((optim.lr - 0.0001).abs() < 1e-12);
        assert!(optim.params.contains_key("weight_decay"));
    }

    #[test]
    fn test_batch_sampling_size() {
        let sampling = BatchSampling {
            classes_per_batch: 16,
            examples_per_class_per_batch: 4,
        };
        assert_eq!(sampling.batch_size(), 64);
    }

    #[test]
    fn test_parameterless_metric() {
        let metric: MetricConfig = serde_json::from_str("{}").unwrap();
        assert!(metric.k.is_none());
        assert!(metric.average.is_none());

        // None fields stay out of the serialized form
        let json = serde_json::to_string(&metric).unwrap();
        assert_eq!(json, "{}");
    }

    #[test]
    fn test_metric_k_order_preserved() {
        let metric = MetricConfig::at_k(vec![1, 2, 4, 8, 16, 32], AverageMode::Micro);
        let json = serde_json::to_string(&metric).unwrap();
        let parsed: MetricConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.k.unwrap(), vec![1, 2, 4, 8, 16, 32]);
        assert_eq!(parsed.average, Some(AverageMode::Micro));
    }
}
