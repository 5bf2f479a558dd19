use clap::Parser;
use graymorph::io::{load_gray_image, load_marker, save_gray_image};
use graymorph::lowlevel::MarkerScan;
use graymorph::{MorphConfig, Morpher, Operation};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const SCHEMA_JSON: &str = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.schema.json"));
const EXAMPLE_JSON: &str =
    include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/config.example.json"));

#[derive(Parser, Debug)]
#[command(author, version, about = "graymorph CLI (JSON config driven)")]
struct Cli {
    /// Path to the JSON configuration file.
    #[arg(short, long, value_name = "FILE", default_value = "config.json")]
    config: PathBuf,
    /// Print the JSON schema and exit.
    #[arg(long)]
    print_schema: bool,
    /// Print an example config and exit.
    #[arg(long)]
    print_example: bool,
    /// Enable tracing output.
    #[arg(long)]
    trace: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
enum OperationConfig {
    Erode,
    Dilate,
    Open,
    Close,
    WhiteTopHat,
    BlackTopHat,
    Gradient,
}

impl From<OperationConfig> for Operation {
    fn from(value: OperationConfig) -> Self {
        match value {
            OperationConfig::Erode => Operation::Erode,
            OperationConfig::Dilate => Operation::Dilate,
            OperationConfig::Open => Operation::Open,
            OperationConfig::Close => Operation::Close,
            OperationConfig::WhiteTopHat => Operation::WhiteTopHat,
            OperationConfig::BlackTopHat => Operation::BlackTopHat,
            OperationConfig::Gradient => Operation::Gradient,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(default)]
struct Config {
    image_path: String,
    kernel_path: String,
    output_dir: String,
    /// Empty means the six classic outputs.
    operations: Vec<OperationConfig>,
    parallel: bool,
    strict_anchor: bool,
    /// Fail instead of warning when the marker image does not contain
    /// exactly one anchor pixel.
    require_single_anchor: bool,
}

impl Default for Config {
    fn default() -> Self {
        let cfg = MorphConfig::default();
        Self {
            image_path: String::new(),
            kernel_path: String::new(),
            output_dir: "output".to_string(),
            operations: Vec::new(),
            parallel: cfg.parallel,
            strict_anchor: cfg.strict_anchor,
            require_single_anchor: false,
        }
    }
}

#[derive(Debug, Serialize)]
struct OutputRecord {
    operation: &'static str,
    path: String,
    width: usize,
    height: usize,
}

#[derive(Debug, Serialize)]
struct Summary {
    kernel_size: (usize, usize),
    anchor: (usize, usize),
    anchor_markers: usize,
    outputs: Vec<OutputRecord>,
}

/// Operations to run, in order. An empty list selects the six classic
/// outputs.
fn resolve_operations(config: &Config) -> Vec<Operation> {
    if config.operations.is_empty() {
        Operation::ALL_CLASSIC.to_vec()
    } else {
        config.operations.iter().map(|&op| op.into()).collect()
    }
}

/// Fails on anything but exactly one anchor pixel when
/// `require_single_anchor` is set; otherwise only warns.
fn check_anchor_markers(scan: &MarkerScan, config: &Config) -> Result<(), String> {
    if scan.anchor_count == 1 {
        return Ok(());
    }
    if config.require_single_anchor {
        return Err(format!(
            "kernel image {} has {} anchor pixels, expected exactly one",
            config.kernel_path, scan.anchor_count
        ));
    }
    let (x, y) = scan.element.anchor();
    tracing::warn!(
        count = scan.anchor_count,
        x,
        y,
        "kernel image does not have exactly one anchor pixel"
    );
    Ok(())
}

fn output_path(output_dir: &Path, op: Operation) -> PathBuf {
    output_dir.join(format!("{}.png", op.file_stem()))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    if cli.trace {
        tracing_subscriber::fmt()
            .with_env_filter(EnvFilter::from_default_env().add_directive("graymorph=info".parse()?))
            .with_target(false)
            .init();
    }

    if cli.print_schema {
        println!("{SCHEMA_JSON}");
        return Ok(());
    }
    if cli.print_example {
        println!("{EXAMPLE_JSON}");
        return Ok(());
    }

    let config_text = fs::read_to_string(&cli.config)?;
    let config: Config = serde_json::from_str(&config_text)?;
    if config.image_path.is_empty() || config.kernel_path.is_empty() {
        return Err("image_path and kernel_path must be set".into());
    }

    let marker = load_marker(&config.kernel_path)?;
    check_anchor_markers(&marker, &config)?;
    let element = marker.element;
    let kernel_size = element.size();
    let anchor = element.anchor();

    let image = load_gray_image(&config.image_path)?;

    let operations = resolve_operations(&config);

    let morpher = Morpher::new(element).with_config(MorphConfig {
        parallel: config.parallel,
        strict_anchor: config.strict_anchor,
    });

    let output_dir = Path::new(&config.output_dir);
    fs::create_dir_all(output_dir)?;

    let mut outputs = Vec::with_capacity(operations.len());
    for op in operations {
        let result = morpher.apply(op, image.view())?;
        let path = output_path(output_dir, op);
        save_gray_image(&result, &path)?;
        tracing::info!(operation = op.file_stem(), path = %path.display(), "wrote output");
        outputs.push(OutputRecord {
            operation: op.file_stem(),
            path: path.display().to_string(),
            width: result.width(),
            height: result.height(),
        });
    }

    let summary = Summary {
        kernel_size,
        anchor,
        anchor_markers: marker.anchor_count,
        outputs,
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
