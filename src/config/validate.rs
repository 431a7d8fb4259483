//! Configuration validation
//!
//! Structural and range validation runs at load time, before any component
//! lookup, so a malformed document is rejected before a run starts.

use super::schema::{
    ArchitectureConfig, BenchmarkConfig, DatasetConfig, MetricConfig, TrainingPhase,
    TransformConfig,
};
use std::collections::BTreeSet;
use thiserror::Error;

/// Validation result type
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Configuration validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Unsupported schema version: {0}. Supported versions: single")]
    UnsupportedVersion(String),

    #[error("Empty section: {0} must contain at least one entry")]
    EmptySection(&'static str),

    #[error("Invalid range for {field}: {value} (expected {constraint})")]
    InvalidRange {
        field: String,
        value: String,
        constraint: String,
    },

    #[error("Empty class range for dataset '{dataset}': [{start}, {end})")]
    EmptyClassRange {
        dataset: String,
        start: u32,
        end: u32,
    },

    #[error(
        "Train and test classes overlap for dataset '{dataset}': \
         [{train_start}, {train_end}) vs [{test_start}, {test_end})"
    )]
    OverlappingClassSplit {
        dataset: String,
        train_start: u32,
        train_end: u32,
        test_start: u32,
        test_end: u32,
    },

    #[error("Malformed interval for {field}: expected a two-element [lo, hi] array")]
    MalformedInterval { field: String },

    #[error("Invalid flip mode for stage '{stage}': '{mode}'. Valid modes: {valid:?}")]
    InvalidFlipMode {
        stage: String,
        mode: String,
        valid: &'static [&'static str],
    },

    #[error("Duplicate training phase name: '{0}'")]
    DuplicatePhaseName(String),

    #[error("Metric '{metric}': k values must be non-empty, positive, and strictly increasing")]
    InvalidKList { metric: String },
}

/// Supported schema versions
const SUPPORTED_VERSIONS: &[&str] = &["single"];

/// Valid orientation modes for random flips
const VALID_FLIP_MODES: &[&str] = &["horizontal", "vertical", "horizontal_and_vertical"];

/// Validate a benchmark configuration
///
/// Checks:
/// 1. Version compatibility
/// 2. Section presence (no empty plugin maps, at least one training phase)
/// 3. Class split well-formedness and train/test disjointness
/// 4. Numeric ranges (percentages in [0, 1], positive counts and rates)
/// 5. Transform parameter shapes (intervals, flip modes)
/// 6. Metric rank lists ordered and positive
pub fn validate_config(config: &BenchmarkConfig) -> ValidationResult<()> {
    validate_version(&config.version)?;

    if config.datasets.is_empty() {
        return Err(ValidationError::EmptySection("datasets"));
    }
    if config.architectures.is_empty() {
        return Err(ValidationError::EmptySection("architectures"));
    }
    if config.losses.is_empty() {
        return Err(ValidationError::EmptySection("losses"));
    }
    if config.optimizer.is_empty() {
        return Err(ValidationError::EmptySection("optimizer"));
    }
    if config.training.is_empty() {
        return Err(ValidationError::EmptySection("training"));
    }
    if config.evaluation.is_empty() {
        return Err(ValidationError::EmptySection("evaluation"));
    }

    for (name, dataset) in &config.datasets {
        validate_dataset(name, dataset)?;
    }

    for (stage, transform) in &config.preprocess {
        validate_transform(stage, transform)?;
    }
    for (stage, transform) in config
        .augmentations
        .train
        .iter()
        .chain(config.augmentations.test.iter())
    {
        validate_transform(stage, transform)?;
    }

    for (name, arch) in &config.architectures {
        validate_architecture(name, arch)?;
    }

    for (name, optim) in &config.optimizer {
        if optim.lr <= 0.0 {
            return Err(ValidationError::InvalidRange {
                field: format!("optimizer.{name}.lr"),
                value: optim.lr.to_string(),
                constraint: "> 0".to_string(),
            });
        }
    }

    validate_training(&config.training)?;

    for (name, metric) in &config.evaluation {
        validate_metric(name, metric)?;
    }

    Ok(())
}

fn validate_version(version: &str) -> ValidationResult<()> {
    if !SUPPORTED_VERSIONS.contains(&version) {
        return Err(ValidationError::UnsupportedVersion(version.to_string()));
    }
    Ok(())
}

fn validate_dataset(name: &str, dataset: &DatasetConfig) -> ValidationResult<()> {
    if dataset.train_classes.is_empty() {
        return Err(ValidationError::EmptyClassRange {
            dataset: name.to_string(),
            start: dataset.train_classes.start,
            end: dataset.train_classes.end,
        });
    }
    if dataset.test_classes.is_empty() {
        return Err(ValidationError::EmptyClassRange {
            dataset: name.to_string(),
            start: dataset.test_classes.start,
            end: dataset.test_classes.end,
        });
    }

    // Retrieval evaluation measures generalization to unseen classes, so the
    // split must be class-disjoint.
    if dataset.train_classes.overlaps(&dataset.test_classes) {
        return Err(ValidationError::OverlappingClassSplit {
            dataset: name.to_string(),
            train_start: dataset.train_classes.start,
            train_end: dataset.train_classes.end,
            test_start: dataset.test_classes.start,
            test_end: dataset.test_classes.end,
        });
    }

    let splits = &dataset.train_val_splits;
    if splits.num_splits == 0 {
        return Err(ValidationError::InvalidRange {
            field: format!("datasets.{name}.train_val_splits.num_splits"),
            value: "0".to_string(),
            constraint: ">= 1".to_string(),
        });
    }
    if !(0.0..=1.0).contains(&splits.val_class_pctg) {
        return Err(ValidationError::InvalidRange {
            field: format!("datasets.{name}.train_val_splits.val_class_pctg"),
            value: splits.val_class_pctg.to_string(),
            constraint: "in [0, 1]".to_string(),
        });
    }

    let callback = &dataset.eval_callback;
    if callback.max_num_queries == 0 {
        return Err(ValidationError::InvalidRange {
            field: format!("datasets.{name}.eval_callback.max_num_queries"),
            value: "0".to_string(),
            constraint: ">= 1".to_string(),
        });
    }
    if callback.max_num_targets == 0 {
        return Err(ValidationError::InvalidRange {
            field: format!("datasets.{name}.eval_callback.max_num_targets"),
            value: "0".to_string(),
            constraint: ">= 1".to_string(),
        });
    }

    Ok(())
}

fn validate_transform(stage: &str, transform: &TransformConfig) -> ValidationResult<()> {
    for dim in ["height", "width"] {
        if let Some(value) = transform.params.get(dim) {
            let ok = value.as_u64().is_some_and(|v| v > 0);
            if !ok {
                return Err(ValidationError::InvalidRange {
                    field: format!("{stage}.{dim}"),
                    value: value.to_string(),
                    constraint: "positive integer".to_string(),
                });
            }
        }
    }

    if transform.params.contains_key("area_range") {
        let Some([lo, hi]) = transform.interval_param("area_range") else {
            return Err(ValidationError::MalformedInterval {
                field: format!("{stage}.area_range"),
            });
        };
        if !(0.0..=1.0).contains(&lo) || !(0.0..=1.0).contains(&hi) || lo > hi {
            return Err(ValidationError::InvalidRange {
                field: format!("{stage}.area_range"),
                value: format!("[{lo}, {hi}]"),
                constraint: "sub-interval of [0, 1]".to_string(),
            });
        }
    }

    if transform.component == "random_flip" {
        if let Some(mode) = transform.str_param("mode") {
            if !VALID_FLIP_MODES.contains(&mode) {
                return Err(ValidationError::InvalidFlipMode {
                    stage: stage.to_string(),
                    mode: mode.to_string(),
                    valid: VALID_FLIP_MODES,
                });
            }
        }
    }

    Ok(())
}

fn validate_architecture(name: &str, arch: &ArchitectureConfig) -> ValidationResult<()> {
    if arch.input_shape.iter().any(|&dim| dim == 0) {
        return Err(ValidationError::InvalidRange {
            field: format!("architectures.{name}.input_shape"),
            value: format!("{:?}", arch.input_shape),
            constraint: "all dimensions positive".to_string(),
        });
    }

    if arch.embedding_sizes.is_empty() {
        return Err(ValidationError::InvalidRange {
            field: format!("architectures.{name}.embedding_sizes"),
            value: "[]".to_string(),
            constraint: "at least one embedding size".to_string(),
        });
    }
    if arch.embedding_sizes.iter().any(|&size| size == 0) {
        return Err(ValidationError::InvalidRange {
            field: format!("architectures.{name}.embedding_sizes"),
            value: format!("{:?}", arch.embedding_sizes),
            constraint: "all sizes positive".to_string(),
        });
    }

    Ok(())
}

fn validate_training(phases: &[TrainingPhase]) -> ValidationResult<()> {
    let mut seen = BTreeSet::new();
    for phase in phases {
        if !seen.insert(phase.name.as_str()) {
            return Err(ValidationError::DuplicatePhaseName(phase.name.clone()));
        }

        if phase.epochs == 0 {
            return Err(ValidationError::InvalidRange {
                field: format!("training.{}.epochs", phase.name),
                value: "0".to_string(),
                constraint: ">= 1".to_string(),
            });
        }
        if phase.steps_per_epoch == 0 {
            return Err(ValidationError::InvalidRange {
                field: format!("training.{}.steps_per_epoch", phase.name),
                value: "0".to_string(),
                constraint: ">= 1".to_string(),
            });
        }

        for (split, sampling) in [("train", &phase.train), ("val", &phase.val)] {
            if sampling.classes_per_batch == 0 {
                return Err(ValidationError::InvalidRange {
                    field: format!("training.{}.{split}.classes_per_batch", phase.name),
                    value: "0".to_string(),
                    constraint: ">= 1".to_string(),
                });
            }
            if sampling.examples_per_class_per_batch == 0 {
                return Err(ValidationError::InvalidRange {
                    field: format!(
                        "training.{}.{split}.examples_per_class_per_batch",
                        phase.name
                    ),
                    value: "0".to_string(),
                    constraint: ">= 1".to_string(),
                });
            }
        }

        let schedule = &phase.lr_schedule;
        if !(0.0..=1.0).contains(&schedule.warmup_pctg) {
            return Err(ValidationError::InvalidRange {
                field: format!("training.{}.lr_schedule.warmup_pctg", phase.name),
                value: schedule.warmup_pctg.to_string(),
                constraint: "in [0, 1]".to_string(),
            });
        }
        if schedule.min_lr < 0.0 {
            return Err(ValidationError::InvalidRange {
                field: format!("training.{}.lr_schedule.min_lr", phase.name),
                value: schedule.min_lr.to_string(),
                constraint: ">= 0".to_string(),
            });
        }
    }

    Ok(())
}

fn validate_metric(name: &str, metric: &MetricConfig) -> ValidationResult<()> {
    if let Some(k) = &metric.k {
        let ordered = !k.is_empty()
            && k[0] > 0
            && k.windows(2).all(|pair| pair[0] < pair[1]);
        if !ordered {
            return Err(ValidationError::InvalidKList {
                metric: name.to_string(),
            });
        }
    }
    Ok(())
}
