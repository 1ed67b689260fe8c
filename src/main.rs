use std::env;
use std::process;
use std::time::Instant;

use log::debug;

use brio::{execute, BrotliCodec, Config, DriverError, RunMetrics, USAGE};

fn main() {
    env_logger::init();
    if let Err(e) = run() {
        if e.is_usage() {
            debug!("usage fault: {e}");
            eprintln!("{USAGE}");
        } else {
            eprintln!("{e}");
        }
        process::exit(1);
    }
}

fn run() -> Result<(), DriverError> {
    let args: Vec<String> = env::args().collect();
    let config = Config::from_args(&args)?;
    let start = Instant::now();
    let transfer = execute(&config, &BrotliCodec)?;
    if config.verbose {
        RunMetrics::measure(&config, start.elapsed(), &transfer).report(&config);
    }
    Ok(())
}
