//! CI build record - command line entry point.
//!
//! Reads an execution snapshot (file argument or stdin), builds its record and prints
//! the JSON document a shipper would send.

use std::io::Read;
use std::path::PathBuf;

use chrono::Utc;
use tracing::{error, info, Level};
use tracing_subscriber::FmtSubscriber;

use ci_build_record::config::Config;
use ci_build_record::host::ExecutionSnapshot;
use ci_build_record::{RecordBuilder, RecordError, RecordResult};

/// Which builder to run the snapshot through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Variant {
    Generic,
    NodeBound,
    SelfContained,
}

impl Variant {
    fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "generic" => Some(Self::Generic),
            "node" | "node-bound" => Some(Self::NodeBound),
            "self" | "self-contained" => Some(Self::SelfContained),
            _ => None,
        }
    }
}

struct Args {
    variant: Variant,
    snapshot: Option<PathBuf>,
}

fn parse_args(args: &[String]) -> Result<Args, String> {
    let mut variant = Variant::NodeBound;
    let mut snapshot = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--variant" => {
                let value = iter.next().ok_or("--variant needs a value")?;
                variant = Variant::parse(value)
                    .ok_or_else(|| format!("unknown variant '{}'", value))?;
            }
            other if other.starts_with("--") => return Err(format!("unknown flag '{}'", other)),
            path => snapshot = Some(PathBuf::from(path)),
        }
    }

    Ok(Args { variant, snapshot })
}

fn load_snapshot(path: Option<&PathBuf>) -> RecordResult<ExecutionSnapshot> {
    match path {
        Some(path) => ExecutionSnapshot::from_path(path),
        None => {
            let mut content = String::new();
            std::io::stdin()
                .read_to_string(&mut content)
                .map_err(|e| RecordError::Io(format!("Failed to read stdin: {}", e)))?;
            ExecutionSnapshot::from_json_str(&content)
        }
    }
}

fn main() {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Logs go to stderr so stdout stays a clean JSON document
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .finish();
    if tracing::subscriber::set_global_default(subscriber).is_err() {
        eprintln!("Failed to set tracing subscriber");
    }

    let raw_args: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&raw_args) {
        Ok(args) => args,
        Err(e) => {
            error!("{}", e);
            error!("Usage: ci-build-record [--variant generic|node|self] [SNAPSHOT.json]");
            std::process::exit(2);
        }
    };

    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };
    let formatter = match config.formatter() {
        Ok(formatter) => formatter,
        Err(e) => {
            error!("Failed to build date formatter: {}", e);
            std::process::exit(1);
        }
    };

    let snapshot = match load_snapshot(args.snapshot.as_ref()) {
        Ok(snapshot) => snapshot,
        Err(e) => {
            error!("Failed to load snapshot: {}", e);
            std::process::exit(1);
        }
    };

    info!(
        "Building {:?} record for {} #{}",
        args.variant, snapshot.full_project_name, snapshot.number
    );

    let builder = RecordBuilder::new(&formatter);
    let now = Utc::now();
    let record = match args.variant {
        Variant::Generic => builder.build(&snapshot, now),
        Variant::NodeBound => builder.build_node_bound(&snapshot, now),
        Variant::SelfContained => builder.build_self_contained(&snapshot, now),
    };

    let output = if config.pretty {
        record.to_json_string_pretty()
    } else {
        record.to_json_string()
    };

    match output {
        Ok(json) => println!("{}", json),
        Err(e) => {
            error!("Failed to serialize record: {}", e);
            std::process::exit(1);
        }
    }
}
