//! Simbench CLI
//!
//! Configuration front-end for image-similarity benchmark runs.
//!
//! # Usage
//!
//! ```bash
//! # Validate a configuration
//! simbench validate benchmark.json
//!
//! # Validate with a detailed summary
//! simbench validate benchmark.json --detailed
//!
//! # Dump a parsed configuration
//! simbench info benchmark.json --format json
//!
//! # Scaffold the cars196 benchmark
//! simbench init cars196-repro --template cars196
//!
//! # List registered component tags
//! simbench components
//! ```

use clap::Parser;
use simbench::config::{
    generate_config, load_config, save_config, Cli, Command, ComponentsArgs, InfoArgs, InitArgs,
    OutputFormat, ValidateArgs,
};
use simbench::registry::{ComponentKind, Registry};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    let log_level = if cli.quiet {
        LogLevel::Quiet
    } else if cli.verbose {
        LogLevel::Verbose
    } else {
        LogLevel::Normal
    };

    let result = match cli.command {
        Command::Validate(args) => run_validate(args, log_level),
        Command::Info(args) => run_info(args, log_level),
        Command::Init(args) => run_init(args, log_level),
        Command::Components(args) => run_components(args, log_level),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum LogLevel {
    Quiet,
    Normal,
    Verbose,
}

fn log(level: LogLevel, required: LogLevel, msg: &str) {
    if level != LogLevel::Quiet && (level == required || required == LogLevel::Normal) {
        println!("{msg}");
    }
}

fn run_validate(args: ValidateArgs, level: LogLevel) -> Result<(), String> {
    log(
        level,
        LogLevel::Normal,
        &format!("Validating config: {}", args.config.display()),
    );

    let config = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    log(level, LogLevel::Normal, "Configuration is valid");

    if args.detailed {
        println!();
        println!("Configuration Summary:");
        println!("  Schema version: {}", config.version);
        println!("  Random seed: {}", config.random_seed);
        println!();
        for (name, dataset) in &config.datasets {
            println!("  Dataset: {name}");
            println!("    Source: {} ({})", dataset.component, dataset.dataset_id);
            println!(
                "    Train classes: [{}, {}) ({} classes)",
                dataset.train_classes.start,
                dataset.train_classes.end,
                dataset.train_classes.len()
            );
            println!(
                "    Test classes: [{}, {}) ({} classes)",
                dataset.test_classes.start,
                dataset.test_classes.end,
                dataset.test_classes.len()
            );
            println!(
                "    Splits: {} at {:.0}% validation classes",
                dataset.train_val_splits.num_splits,
                dataset.train_val_splits.val_class_pctg * 100.0
            );
        }
        println!();
        for (name, arch) in &config.architectures {
            println!("  Architecture: {name}");
            println!("    Input shape: {:?}", arch.input_shape);
            println!("    Embedding sizes: {:?}", arch.embedding_sizes);
        }
        println!();
        for (name, loss) in &config.losses {
            println!("  Loss: {name} ({})", loss.component);
        }
        for (name, optim) in &config.optimizer {
            println!("  Optimizer: {name} ({}, lr={})", optim.component, optim.lr);
        }
        println!();
        for phase in &config.training {
            println!(
                "  Phase '{}': {} epochs x {} steps, batch {}x{}",
                phase.name,
                phase.epochs,
                phase.steps_per_epoch,
                phase.train.classes_per_batch,
                phase.train.examples_per_class_per_batch
            );
        }
        println!();
        println!(
            "  Metrics: {}",
            config
                .evaluation
                .keys()
                .cloned()
                .collect::<Vec<_>>()
                .join(", ")
        );
    }

    Ok(())
}

fn run_info(args: InfoArgs, level: LogLevel) -> Result<(), String> {
    let config = load_config(&args.config).map_err(|e| format!("Config error: {e}"))?;

    match args.format {
        OutputFormat::Text => {
            log(level, LogLevel::Normal, "Configuration Info:");
            println!();
            println!("Version: {}", config.version);
            println!("Seed: {}", config.random_seed);
            println!("Datasets: {}", config.datasets.len());
            println!("Preprocess stages: {}", config.preprocess.len());
            println!(
                "Augmentation stages: {} train, {} test",
                config.augmentations.train.len(),
                config.augmentations.test.len()
            );
            println!("Architectures: {}", config.architectures.len());
            println!("Losses: {}", config.losses.len());
            println!("Training phases: {}", config.training.len());
            println!("Metrics: {}", config.evaluation.len());
        }
        OutputFormat::Json => {
            let json = serde_json::to_string_pretty(&config)
                .map_err(|e| format!("JSON serialization error: {e}"))?;
            println!("{json}");
        }
        OutputFormat::Yaml => {
            let yaml = serde_yaml::to_string(&config)
                .map_err(|e| format!("YAML serialization error: {e}"))?;
            println!("{yaml}");
        }
    }

    Ok(())
}

fn run_init(args: InitArgs, level: LogLevel) -> Result<(), String> {
    let output = args
        .output
        .unwrap_or_else(|| PathBuf::from(format!("{}.json", args.name)));

    if output.exists() {
        return Err(format!("Refusing to overwrite {}", output.display()));
    }

    let config = generate_config(args.template.into());
    save_config(&config, &output).map_err(|e| format!("Failed to write config: {e}"))?;

    log(
        level,
        LogLevel::Normal,
        &format!("Created {} from {:?} template", output.display(), args.template),
    );
    log(
        level,
        LogLevel::Verbose,
        &format!(
            "  Datasets: {}",
            config.datasets.keys().cloned().collect::<Vec<_>>().join(", ")
        ),
    );

    Ok(())
}

fn run_components(args: ComponentsArgs, level: LogLevel) -> Result<(), String> {
    let registry = Registry::default();

    let kinds: Vec<ComponentKind> = match &args.kind {
        Some(filter) => {
            let filter = filter.to_lowercase();
            let matched: Vec<ComponentKind> = ComponentKind::ALL
                .into_iter()
                .filter(|kind| kind.as_str().contains(&filter))
                .collect();
            if matched.is_empty() {
                return Err(format!("Unknown component kind: {filter}"));
            }
            matched
        }
        None => ComponentKind::ALL.to_vec(),
    };

    log(level, LogLevel::Normal, "Registered components:");
    for kind in kinds {
        let tags: Vec<&str> = registry.tags(kind).collect();
        println!("  {kind}: {}", tags.join(", "));
    }

    Ok(())
}
