//! CINDER (CIN) parameter inspector
//!
//! Selects a network profile, applies any deployment overrides, and prints
//! the frozen rule eras and the wallet fee table. Doubles as a startup
//! smoke-check: a misconfigured profile or malformed override exits with a
//! diagnostic instead of a frozen table.

use cin_core::consensus::{Network, NetworkParams};
use cin_core::constants::{CHAIN_FULL_NAME, CHAIN_NAME, DUST_LIMIT};
use cin_core::policy::{fee_rate_for_priority, FeePriority};
use std::process::ExitCode;

fn usage() -> ExitCode {
    eprintln!("usage: cin-params [main|test|regtest] [--vbparams deployment:start:end[:heightstart:heightend]]...");
    ExitCode::FAILURE
}

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();

    let mut network = Network::Main;
    let mut overrides: Vec<String> = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--vbparams" => match iter.next() {
                Some(v) => overrides.push(v.clone()),
                None => return usage(),
            },
            name => match Network::from_name(name) {
                Some(n) => network = n,
                None => return usage(),
            },
        }
    }

    let params = match NetworkParams::with_overrides(network, &overrides) {
        Ok(params) => params,
        Err(e) => {
            eprintln!("fatal: {}", e);
            return ExitCode::FAILURE;
        }
    };

    println!("{} ({}) consensus parameters - {} network", CHAIN_FULL_NAME, CHAIN_NAME, network.name());
    println!();
    println!("Rule eras:");
    for era in params.rules.eras() {
        println!(
            "  from height {:>9}: spacing={}s timespan={}s tempered={} mindiff={} auxpow_from={}",
            era.effective_height,
            era.pow_target_spacing,
            era.pow_target_timespan,
            era.tempered_retarget,
            era.allow_min_difficulty_blocks,
            era.aux_pow_start_height,
        );
    }

    println!();
    println!("Fee tiers (dust limit {} base units):", DUST_LIMIT);
    for priority in FeePriority::ALL {
        let rate = fee_rate_for_priority(priority);
        println!("  {:<9} {:>12} /kB", priority.label(), rate.per_kb());
    }

    ExitCode::SUCCESS
}
