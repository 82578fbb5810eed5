#![forbid(unsafe_code)]

use std::fmt;
use std::path::{Path, PathBuf};
use std::process::exit;

use clap::Parser;
use serde::Serialize;
use tracing::{debug, warn};
use tracing_subscriber::EnvFilter;

use deep_struct::{DeepStruct, Field, KeyPolicy, Options, Value};

/// Load a YAML or JSON configuration file and print it back, or one field of it.
#[derive(Debug, Parser)]
#[command(name = "deep-struct", version)]
struct Cli {
    /// Configuration file. `.json` files are read as JSON, anything else as YAML.
    file: PathBuf,

    /// Path of the field to print, for example `server.listeners[0].port`.
    #[arg(long, value_name = "PATH")]
    get: Option<String>,

    /// Print structured output as JSON instead of YAML.
    #[arg(long)]
    json: bool,

    /// Accept boolean and numeric mapping keys by turning them into strings.
    #[arg(long)]
    stringify_keys: bool,
}

enum Failure {
    Read(std::io::Error),
    Parse(String),
    Lookup(deep_struct::Error),
    Render(String),
}

impl Failure {
    fn exit_code(&self) -> i32 {
        match self {
            Failure::Render(_) => 1,
            Failure::Read(_) => 3,
            Failure::Parse(_) => 4,
            Failure::Lookup(_) => 5,
        }
    }
}

impl fmt::Display for Failure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Failure::Read(err) => write!(f, "cannot read file: {err}"),
            Failure::Parse(msg) => write!(f, "invalid configuration: {msg}"),
            Failure::Lookup(err) => write!(f, "{err}"),
            Failure::Render(msg) => write!(f, "cannot render output: {msg}"),
        }
    }
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("json"))
}

fn load(path: &Path, options: &Options) -> Result<DeepStruct, Failure> {
    let content = std::fs::read_to_string(path).map_err(Failure::Read)?;

    let value: Value = if is_json(path) {
        debug!(file = %path.display(), format = "json", "parsing configuration");
        serde_json::from_str(&content).map_err(|err| Failure::Parse(err.to_string()))?
    } else {
        debug!(file = %path.display(), format = "yaml", "parsing configuration");
        // `on`, `y` and friends stay strings; they are common field names
        let yaml_options = serde_saphyr::options! { strict_booleans: true };
        serde_saphyr::from_str_with_options(&content, yaml_options)
            .map_err(|err| Failure::Parse(err.to_string()))?
    };

    let config = DeepStruct::from_value_with_options(&value, options)
        .map_err(|err| Failure::Parse(err.to_string()))?;
    debug!(fields = config.len(), "configuration loaded");
    Ok(config)
}

fn render<T: Serialize>(value: &T, json: bool) -> Result<String, Failure> {
    let mut out = if json {
        serde_json::to_string_pretty(value).map_err(|err| Failure::Render(err.to_string()))?
    } else {
        serde_saphyr::to_string(value).map_err(|err| Failure::Render(err.to_string()))?
    };
    if !out.ends_with('\n') {
        out.push('\n');
    }
    Ok(out)
}

/// Scalars print bare (strings without quotes); containers are re-serialized.
fn render_field(field: &Field, json: bool) -> Result<String, Failure> {
    match field {
        Field::Scalar(Value::String(s)) => Ok(format!("{s}\n")),
        Field::Scalar(value) => Ok(format!("{value}\n")),
        other => render(other, json),
    }
}

fn run(cli: &Cli) -> Result<String, Failure> {
    let options = Options {
        key_policy: if cli.stringify_keys {
            KeyPolicy::Stringify
        } else {
            KeyPolicy::StringsOnly
        },
        ..Options::default()
    };
    let config = load(&cli.file, &options)?;

    match &cli.get {
        Some(path) => {
            let field = config.dig(path).map_err(|err| {
                warn!(%path, %err, "field lookup failed");
                Failure::Lookup(err)
            })?;
            render_field(field, cli.json)
        }
        None => render(&config, cli.json),
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    match run(&cli) {
        Ok(out) => print!("{out}"),
        Err(failure) => {
            eprintln!("{}: {failure}", cli.file.display());
            exit(failure.exit_code());
        }
    }
}
