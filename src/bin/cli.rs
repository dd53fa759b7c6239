//! adsbridge CLI
//!
//! Processes a JSON batch request against an in-process gateway image.
//! Useful for exercising the codec and batch semantics without a controller:
//! seed the gateway from an image file, feed a request, inspect the response.

use std::collections::BTreeMap;
use std::fs;
use std::io::Read;

use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use adsbridge::events::Verbosity;
use adsbridge::{BatchRequest, Config, MemoryGateway, RequestProcessor};

/// adsbridge CLI
#[derive(Parser, Debug)]
#[command(name = "adsbridge-cli")]
#[command(about = "Process a symbolic batch request against an in-process variable image")]
#[command(version)]
struct Args {
    /// Batch request JSON file ("-" for stdin)
    #[arg(short, long, default_value = "-")]
    request: String,

    /// Variable image JSON file: {"Var.Name": [bytes...], ...}
    #[arg(short, long)]
    image: Option<String>,

    /// AMS net id to report as the target route
    #[arg(long, default_value = "127.0.0.1.1.1")]
    ams_net_id: String,

    /// ADS port of the target runtime
    #[arg(long, default_value = "851")]
    ads_port: u16,

    /// Forward verbose events as well
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,adsbridge=debug"));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let args = Args::parse();

    let config = Config::builder()
        .ams_net_id(&args.ams_net_id)
        .ads_port(args.ads_port)
        .verbosity(if args.verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Important
        })
        .build();

    tracing::info!("adsbridge v{}", adsbridge::VERSION);
    tracing::info!(
        "Target route: {}:{} (in-process image)",
        config.ams_net_id,
        config.ads_port
    );

    // Seed the in-process gateway from the image file, if any
    let mut gateway = MemoryGateway::new();
    if let Some(path) = &args.image {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Failed to read image file {}: {}", path, e);
                std::process::exit(1);
            }
        };
        let image: BTreeMap<String, Vec<u8>> = match serde_json::from_str(&raw) {
            Ok(image) => image,
            Err(e) => {
                tracing::error!("Failed to parse image file {}: {}", path, e);
                std::process::exit(1);
            }
        };
        for (name, bytes) in image {
            gateway.define(name, bytes);
        }
    }

    // Read the batch request
    let raw_request = if args.request == "-" {
        let mut raw = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut raw) {
            tracing::error!("Failed to read request from stdin: {}", e);
            std::process::exit(1);
        }
        raw
    } else {
        match fs::read_to_string(&args.request) {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Failed to read request file {}: {}", args.request, e);
                std::process::exit(1);
            }
        }
    };

    let request: BatchRequest = match serde_json::from_str(&raw_request) {
        Ok(request) => request,
        Err(e) => {
            tracing::error!("Failed to parse batch request: {}", e);
            std::process::exit(1);
        }
    };

    // Process and print the response as JSON
    let sink = adsbridge::events::TracingSink::new(config.verbosity);
    let mut processor = RequestProcessor::with_sink(gateway, Box::new(sink));
    let response = processor.process(&request);

    match serde_json::to_string_pretty(&response) {
        Ok(json) => println!("{}", json),
        Err(e) => {
            tracing::error!("Failed to serialize response: {}", e);
            std::process::exit(1);
        }
    }

    if !response.is_ok() {
        std::process::exit(2);
    }
}
