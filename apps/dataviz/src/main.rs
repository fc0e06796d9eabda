use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dataviz_config::{DatavizConfig, StructureKind, load_config};
use dataviz_containers::Visualizer;
use dataviz_logging::{LogLevel, Logger};
use std::io::{IsTerminal, Write};
use std::path::PathBuf;

mod structure;

use structure::{OutputFormat, Structure};

#[derive(Parser, Debug)]
#[command(name = "dataviz")]
#[command(about = "Build balanced trees and heaps from the command line and render them.", long_about = None)]
struct Cli {
    /// Configuration file (.json, .yaml or .yml).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Log level for stderr output; overrides the config file.
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Build a structure, then print it and optionally render an image.
    Build {
        /// Structure to build; defaults to the configured one.
        #[arg(long)]
        structure: Option<StructureKind>,
        /// Insert KEY with VALUE (the key's text when omitted). Repeatable.
        #[arg(long = "put", value_name = "KEY[=VALUE]", value_parser = parse_entry, allow_hyphen_values = true)]
        puts: Vec<Entry>,
        /// Remove KEY after all insertions. Repeatable.
        #[arg(long = "remove", value_name = "KEY", allow_hyphen_values = true)]
        removes: Vec<i64>,
        /// Start from a JSON document (object for trees, array for the heap).
        #[arg(long)]
        from_json: Option<PathBuf>,
        #[arg(long, value_enum, default_value = "ascii")]
        format: OutputFormat,
        /// Also render an image through Graphviz. Relative paths land in the
        /// configured output directory.
        #[arg(long)]
        image: Option<PathBuf>,
    },
}

#[derive(Debug, Clone)]
struct Entry {
    key: i64,
    value: Option<String>,
}

fn parse_entry(s: &str) -> Result<Entry> {
    let (key, value) = match s.split_once('=') {
        Some((key, value)) => (key, Some(value.to_string())),
        None => (s, None),
    };
    let key = key
        .trim()
        .parse()
        .with_context(|| format!("invalid key `{key}`: expected an integer"))?;
    Ok(Entry { key, value })
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => DatavizConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.logging.level = level;
    }
    if !std::io::stderr().is_terminal() {
        config.logging.colors = false;
    }
    let mut logger = Logger::stderr(config.logging.clone());

    match cli.cmd {
        Command::Build {
            structure,
            puts,
            removes,
            from_json,
            format,
            image,
        } => {
            let kind = structure.unwrap_or(config.default_structure);
            logger.info("build", format!("building {kind}"));
            let mut built = Structure::new(kind);

            if let Some(path) = from_json {
                let data = std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read {}", path.display()))?;
                built
                    .load_json(&data)
                    .with_context(|| format!("failed to load {}", path.display()))?;
                logger.info(
                    "build",
                    format!("loaded {} entries from {}", built.len(), path.display()),
                );
            }

            for Entry { key, value } in puts {
                if kind == StructureKind::Heap && value.is_some() {
                    logger.warn("build", format!("heap stores keys only; ignoring the value for {key}"));
                }
                let value = value.unwrap_or_else(|| key.to_string());
                match built.put(key, value) {
                    Some(old) => logger.debug("build", format!("replaced {key} (was {old})")),
                    None => logger.debug("build", format!("inserted {key}")),
                }
            }

            for key in removes {
                if built.remove(key) {
                    logger.debug("build", format!("removed {key}"));
                } else {
                    logger.warn("build", format!("key {key} not present"));
                }
            }

            logger.info(
                "build",
                format!(
                    "{} holds {} entries, height {}",
                    built.kind(),
                    built.len(),
                    built.height()
                ),
            );

            let output = built.render(format)?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(output.as_bytes())?;
            if !output.ends_with('\n') {
                writeln!(stdout)?;
            }
            stdout.flush()?;

            if let Some(image) = image {
                let path = config.output_path(&image);
                logger.info(
                    "render",
                    format!("rendering {} with {}", path.display(), config.render.binary),
                );
                built
                    .visualizer()
                    .visualize(&path, &config.render)
                    .with_context(|| format!("failed to render {}", path.display()))?;
                logger.info("render", format!("wrote {}", path.display()));
            }

            let warnings = logger.history().count(LogLevel::Warn);
            if warnings > 0 {
                logger.info("build", format!("finished with {warnings} warning(s)"));
            }
        }
    }

    Ok(())
}
