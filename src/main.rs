//! Versor - quaternion rotation explorer
//!
//! Prints the interpolation path and the random rotations described by the
//! configuration.

use std::process;

use rand::rngs::StdRng;
use rand::SeedableRng;

use versor::config::VersorConfig;
use versor::report;
use versor_math::QuaternionError;

fn run(config: &VersorConfig) -> Result<(), QuaternionError> {
    println!("Interpolation ({} steps)", config.interpolation.steps);
    for line in report::interpolation_lines(&config.interpolation, &config.display)? {
        println!("{}", line);
    }

    if config.random.count > 0 {
        let mut rng = match config.random.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        println!();
        println!("Random rotations");
        for line in report::random_lines(&mut rng, config.random.count, &config.display) {
            println!("{}", line);
        }
    }

    Ok(())
}

fn main() {
    let loaded = VersorConfig::load();
    let log_level = match &loaded {
        Ok(config) => config.debug.log_level.clone(),
        Err(_) => "info".to_string(),
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();

    let config = loaded.unwrap_or_else(|e| {
        log::warn!("Failed to load config: {}. Using defaults.", e);
        VersorConfig::default()
    });
    log::info!("Starting Versor");

    if let Err(e) = run(&config) {
        log::error!("{}", e);
        process::exit(1);
    }
}
