//! Component registry
//!
//! Every plugin block in a benchmark configuration names its implementation
//! through a `component` discriminator tag. The schema only carries the tag;
//! this registry records which tags the consuming framework recognizes, so a
//! configuration referencing an unknown implementation is rejected at load
//! time instead of mid-run.

use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use crate::config::BenchmarkConfig;

/// Category of pluggable component
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ComponentKind {
    DatasetSource,
    Preprocess,
    Augmentation,
    Architecture,
    Loss,
    Optimizer,
    Metric,
}

impl ComponentKind {
    /// All kinds, in configuration-section order
    pub const ALL: [ComponentKind; 7] = [
        ComponentKind::DatasetSource,
        ComponentKind::Preprocess,
        ComponentKind::Augmentation,
        ComponentKind::Architecture,
        ComponentKind::Loss,
        ComponentKind::Optimizer,
        ComponentKind::Metric,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ComponentKind::DatasetSource => "dataset source",
            ComponentKind::Preprocess => "preprocess stage",
            ComponentKind::Augmentation => "augmentation stage",
            ComponentKind::Architecture => "architecture",
            ComponentKind::Loss => "loss",
            ComponentKind::Optimizer => "optimizer",
            ComponentKind::Metric => "evaluation metric",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A configuration block referenced a component tag with no registered
/// implementation
#[derive(Debug, Clone, Error)]
#[error("No registered {kind} implementation for component tag '{tag}' (referenced by '{name}')")]
pub struct UnknownComponent {
    pub kind: ComponentKind,
    /// Name of the configuration block that carried the tag
    pub name: String,
    pub tag: String,
}

/// Registry of component tags the consuming framework recognizes
///
/// `Registry::default()` is pre-populated with the built-in implementations.
/// Preprocess and augmentation stages share one transform namespace.
#[derive(Debug, Clone)]
pub struct Registry {
    dataset_sources: BTreeSet<String>,
    transforms: BTreeSet<String>,
    architectures: BTreeSet<String>,
    losses: BTreeSet<String>,
    optimizers: BTreeSet<String>,
    metrics: BTreeSet<String>,
}

impl Default for Registry {
    fn default() -> Self {
        fn set(tags: &[&str]) -> BTreeSet<String> {
            tags.iter().map(|tag| tag.to_string()).collect()
        }

        Self {
            dataset_sources: set(&["tfds"]),
            transforms: set(&[
                "center_crop",
                "random_resized_crop",
                "random_flip",
                "resize",
                "normalize",
            ]),
            architectures: set(&["resnet18", "resnet50", "efficientnet"]),
            losses: set(&["multi_similarity", "circle", "triplet", "pn", "soft_nn"]),
            optimizers: set(&["lamb", "adam", "rmsprop", "sgd"]),
            metrics: set(&["recall_at_k", "precision_at_k", "map_at_r", "r_precision"]),
        }
    }
}

impl Registry {
    /// An empty registry, with no recognized components
    pub fn empty() -> Self {
        Self {
            dataset_sources: BTreeSet::new(),
            transforms: BTreeSet::new(),
            architectures: BTreeSet::new(),
            losses: BTreeSet::new(),
            optimizers: BTreeSet::new(),
            metrics: BTreeSet::new(),
        }
    }

    fn tag_set(&self, kind: ComponentKind) -> &BTreeSet<String> {
        match kind {
            ComponentKind::DatasetSource => &self.dataset_sources,
            ComponentKind::Preprocess | ComponentKind::Augmentation => &self.transforms,
            ComponentKind::Architecture => &self.architectures,
            ComponentKind::Loss => &self.losses,
            ComponentKind::Optimizer => &self.optimizers,
            ComponentKind::Metric => &self.metrics,
        }
    }

    fn tag_set_mut(&mut self, kind: ComponentKind) -> &mut BTreeSet<String> {
        match kind {
            ComponentKind::DatasetSource => &mut self.dataset_sources,
            ComponentKind::Preprocess | ComponentKind::Augmentation => &mut self.transforms,
            ComponentKind::Architecture => &mut self.architectures,
            ComponentKind::Loss => &mut self.losses,
            ComponentKind::Optimizer => &mut self.optimizers,
            ComponentKind::Metric => &mut self.metrics,
        }
    }

    /// Register an additional component tag
    pub fn register(&mut self, kind: ComponentKind, tag: impl Into<String>) {
        self.tag_set_mut(kind).insert(tag.into());
    }

    /// Whether a tag is registered for the given kind
    pub fn contains(&self, kind: ComponentKind, tag: &str) -> bool {
        self.tag_set(kind).contains(tag)
    }

    /// Registered tags for the given kind, in sorted order
    pub fn tags(&self, kind: ComponentKind) -> impl Iterator<Item = &str> {
        self.tag_set(kind).iter().map(String::as_str)
    }

    /// Cross-check every component tag in a configuration
    ///
    /// Evaluation metrics are discriminated by their map key rather than a
    /// `component` field.
    pub fn check_config(&self, config: &BenchmarkConfig) -> Result<(), UnknownComponent> {
        for (name, dataset) in &config.datasets {
            self.check(ComponentKind::DatasetSource, name, &dataset.component)?;
        }
        for (stage, transform) in &config.preprocess {
            self.check(ComponentKind::Preprocess, stage, &transform.component)?;
        }
        for (stage, transform) in config
            .augmentations
            .train
            .iter()
            .chain(config.augmentations.test.iter())
        {
            self.check(ComponentKind::Augmentation, stage, &transform.component)?;
        }
        for (name, arch) in &config.architectures {
            self.check(ComponentKind::Architecture, name, &arch.component)?;
        }
        for (name, loss) in &config.losses {
            self.check(ComponentKind::Loss, name, &loss.component)?;
        }
        for (name, optim) in &config.optimizer {
            self.check(ComponentKind::Optimizer, name, &optim.component)?;
        }
        for name in config.evaluation.keys() {
            self.check(ComponentKind::Metric, name, name)?;
        }
        Ok(())
    }

    fn check(&self, kind: ComponentKind, name: &str, tag: &str) -> Result<(), UnknownComponent> {
        if self.contains(kind, tag) {
            Ok(())
        } else {
            Err(UnknownComponent {
                kind,
                name: name.to_string(),
                tag: tag.to_string(),
            })
        }
    }
}
