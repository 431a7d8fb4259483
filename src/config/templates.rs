//! Starter benchmark configurations
//!
//! Generates complete, valid configurations for common scenarios, including
//! the canonical cars196 retrieval benchmark.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde_json::json;

use super::schema::{
    ArchitectureConfig, AugmentationConfig, AverageMode, BatchSampling, BenchmarkConfig,
    ClassRange, DatasetConfig, EvalCallback, LossConfig, LrSchedule, MetricConfig,
    OptimizerConfig, Trainable, TrainingPhase, TrainValSplits, TransformConfig,
};

/// Template type for initialization
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// Smallest valid configuration
    Minimal,
    /// The cars196 retrieval benchmark with a 50% class split
    Cars196,
}

/// Generate a benchmark configuration from a template
pub fn generate_config(template: Template) -> BenchmarkConfig {
    match template {
        Template::Minimal => generate_minimal(),
        Template::Cars196 => generate_cars196(),
    }
}

/// Generate a pretty-printed JSON document from a template
pub fn generate_json(template: Template) -> String {
    let config = generate_config(template);
    serde_json::to_string_pretty(&config)
        .unwrap_or_else(|_| "// Error generating configuration".to_string())
}

fn generate_minimal() -> BenchmarkConfig {
    BenchmarkConfig {
        version: "single".to_string(),
        random_seed: 42,
        tfds_data_dir: PathBuf::from("datasets/tfds"),
        hyperparameter_dir: PathBuf::from("hyperparameters"),
        benchmark_dir: PathBuf::from("benchmarks"),
        dataset_dir: PathBuf::from("datasets/processed"),
        datasets: BTreeMap::from([(
            "mnist_50pct_cls_splt".to_string(),
            DatasetConfig {
                component: "tfds".to_string(),
                dataset_id: "mnist".to_string(),
                x_key: "image".to_string(),
                y_key: "label".to_string(),
                train_classes: ClassRange::new(0, 5),
                test_classes: ClassRange::new(5, 10),
                train_val_splits: TrainValSplits {
                    num_splits: 1,
                    val_class_pctg: 0.1,
                },
                eval_callback: EvalCallback {
                    max_num_queries: 100,
                    max_num_targets: 500,
                },
            },
        )]),
        preprocess: BTreeMap::from([(
            "resize".to_string(),
            TransformConfig::new("resize")
                .with_param("height", 64)
                .with_param("width", 64),
        )]),
        augmentations: AugmentationConfig {
            train: BTreeMap::from([(
                "random_flip".to_string(),
                TransformConfig::new("random_flip").with_param("mode", "horizontal"),
            )]),
            test: BTreeMap::from([(
                "center_crop".to_string(),
                TransformConfig::new("center_crop")
                    .with_param("height", 64)
                    .with_param("width", 64),
            )]),
        },
        architectures: BTreeMap::from([(
            "efficientnet".to_string(),
            ArchitectureConfig {
                component: "efficientnet".to_string(),
                input_shape: [64, 64, 3],
                embedding_sizes: vec![64],
                trainable: Trainable::Full,
            },
        )]),
        losses: BTreeMap::from([(
            "triplet".to_string(),
            LossConfig::new("triplet").with_param("margin", 0.1),
        )]),
        optimizer: BTreeMap::from([(
            "adam".to_string(),
            OptimizerConfig {
                component: "adam".to_string(),
                lr: 0.001,
                params: BTreeMap::new(),
            },
        )]),
        training: vec![TrainingPhase {
            name: "basic".to_string(),
            train: BatchSampling {
                classes_per_batch: 4,
                examples_per_class_per_batch: 4,
            },
            val: BatchSampling {
                classes_per_batch: 4,
                examples_per_class_per_batch: 2,
            },
            steps_per_epoch: 10,
            epochs: 5,
            lr_schedule: LrSchedule {
                warmup_pctg: 0.1,
                min_lr: 1e-7,
            },
        }],
        evaluation: BTreeMap::from([(
            "recall_at_k".to_string(),
            MetricConfig::at_k(vec![1, 2, 4], AverageMode::Micro),
        )]),
    }
}

fn generate_cars196() -> BenchmarkConfig {
    BenchmarkConfig {
        version: "single".to_string(),
        random_seed: 303,
        tfds_data_dir: PathBuf::from("datasets/tfds"),
        hyperparameter_dir: PathBuf::from("hyperparameters"),
        benchmark_dir: PathBuf::from("benchmarks"),
        dataset_dir: PathBuf::from("datasets/processed"),
        datasets: BTreeMap::from([(
            "cars196_50pct_cls_splt".to_string(),
            DatasetConfig {
                component: "tfds".to_string(),
                dataset_id: "cars196".to_string(),
                x_key: "image".to_string(),
                y_key: "label".to_string(),
                // First half of the 196 classes trains, second half evaluates
                train_classes: ClassRange::new(0, 98),
                test_classes: ClassRange::new(98, 196),
                train_val_splits: TrainValSplits {
                    num_splits: 4,
                    val_class_pctg: 0.05,
                },
                eval_callback: EvalCallback {
                    max_num_queries: 300,
                    max_num_targets: 1000,
                },
            },
        )]),
        preprocess: BTreeMap::from([(
            "center_crop".to_string(),
            TransformConfig::new("center_crop")
                .with_param("height", 256)
                .with_param("width", 256),
        )]),
        augmentations: AugmentationConfig {
            train: BTreeMap::from([
                (
                    "random_resized_crop".to_string(),
                    TransformConfig::new("random_resized_crop")
                        .with_param("height", 227)
                        .with_param("width", 227)
                        .with_param("area_range", json!([0.15625, 1.0])),
                ),
                (
                    "random_flip".to_string(),
                    TransformConfig::new("random_flip").with_param("mode", "horizontal"),
                ),
            ]),
            test: BTreeMap::from([(
                "center_crop".to_string(),
                TransformConfig::new("center_crop")
                    .with_param("height", 227)
                    .with_param("width", 227),
            )]),
        },
        architectures: BTreeMap::from([(
            "resnet50".to_string(),
            ArchitectureConfig {
                component: "resnet50".to_string(),
                input_shape: [227, 227, 3],
                embedding_sizes: vec![128],
                trainable: Trainable::Full,
            },
        )]),
        losses: BTreeMap::from([(
            "multisim".to_string(),
            LossConfig::new("multi_similarity")
                .with_param("alpha", 2.0)
                .with_param("beta", 40.0)
                .with_param("epsilon", 0.1)
                .with_param("lmda", 0.5),
        )]),
        optimizer: BTreeMap::from([(
            "lamb".to_string(),
            OptimizerConfig {
                component: "lamb".to_string(),
                lr: 0.0001,
                params: BTreeMap::new(),
            },
        )]),
        training: vec![TrainingPhase {
            name: "basic".to_string(),
            train: BatchSampling {
                classes_per_batch: 16,
                examples_per_class_per_batch: 4,
            },
            val: BatchSampling {
                classes_per_batch: 16,
                examples_per_class_per_batch: 2,
            },
            steps_per_epoch: 2,
            epochs: 20,
            lr_schedule: LrSchedule {
                warmup_pctg: 0.05,
                min_lr: 1e-6,
            },
        }],
        evaluation: BTreeMap::from([
            (
                "recall_at_k".to_string(),
                MetricConfig::at_k(vec![1, 2, 4, 8, 16, 32], AverageMode::Micro),
            ),
            (
                "precision_at_k".to_string(),
                MetricConfig::at_k(vec![1, 2, 4, 8, 16, 32], AverageMode::Micro),
            ),
            ("map_at_r".to_string(), MetricConfig::default()),
            ("r_precision".to_string(), MetricConfig::default()),
        ]),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::validate::validate_config;
    use crate::registry::Registry;

    #[test]
    fn test_generate_minimal() {
        let config = generate_minimal();
        assert_eq!(config.version, "single");
        assert_eq!(config.datasets.len(), 1);
        assert_eq!(config.training.len(), 1);
    }

    #[test]
    fn test_generate_cars196_values() {
        let config = generate_cars196();
        let dataset = &config.datasets["cars196_50pct_cls_splt"];
        assert_eq!(dataset.train_classes, ClassRange::new(0, 98));
        assert_eq!(dataset.test_classes, ClassRange::new(98, 196));
        assert!(!dataset.train_classes.overlaps(&dataset.test_classes));

        let arch = &config.architectures["resnet50"];
        assert_eq!(arch.input_shape, [227, 227, 3]);
        assert_eq!(arch.embedding_sizes, vec![128]);

        assert_eq!(config.training[0].epochs, 20);
        assert_eq!(config.training[0].steps_per_epoch, 2);

        let recall = &config.evaluation["recall_at_k"];
        assert_eq!(recall.k.as_deref(), Some(&[1, 2, 4, 8, 16, 32][..]));
    }

    #[test]
    fn test_templates_validate() {
        let registry = Registry::default();
        for template in [Template::Minimal, Template::Cars196] {
            let config = generate_config(template);
            validate_config(&config)
                .unwrap_or_else(|e| panic!("Template {template:?} invalid: {e}"));
            registry
                .check_config(&config)
                .unwrap_or_else(|e| panic!("Template {template:?} has unknown components: {e}"));
        }
    }

    #[test]
    fn test_generate_json_parses_back() {
        let json = generate_json(Template::Cars196);
        let parsed: BenchmarkConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, generate_cars196());
    }
}
