//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `cert_status` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - Target validation and result rendering
//!
//! All probing is implemented in the library crate.

use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use std::process;

use cert_status::domain::validate_target_name;
use cert_status::initialization::{init_crypto_provider, init_logger_with, LogTarget};
use cert_status::output::{render, sort_by_input};
use cert_status::{check_hosts, EndpointSpec, Opt, ProbeConfig};

#[tokio::main]
async fn main() -> Result<()> {
    // Try the current directory first, then next to the executable
    if dotenvy::dotenv().is_err() {
        if let Ok(exe_path) = std::env::current_exe() {
            if let Some(exe_dir) = exe_path.parent() {
                let env_path = exe_dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                }
            }
        }
    }

    let opt = Opt::parse();

    let target = LogTarget::from_flags(opt.verbose, opt.logfile.clone());
    if let Err(e) = init_logger_with(opt.log_level.clone().into(), opt.log_format.clone(), target) {
        eprintln!("cert_status error: {e}");
        process::exit(1);
    }

    init_crypto_provider();

    for descriptor in &opt.domains {
        let spec = EndpointSpec::parse(descriptor);
        if let Err(e) = validate_target_name(&spec.target_name) {
            eprintln!("{e}");
            process::exit(1);
        }
    }

    let config = ProbeConfig::from(&opt);
    let mut results = match check_hosts(&config, &opt.domains).await {
        Ok(results) => results,
        Err(e) => {
            eprintln!("cert_status error: {e:#}");
            process::exit(1);
        }
    };

    if opt.sort {
        sort_by_input(&mut results);
    }

    let rendered =
        render(&results, opt.output_format(), Local::now()).context("Failed to render results")?;
    print!("{rendered}");
    Ok(())
}
