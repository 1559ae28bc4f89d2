//! # Meridian
//!
//! This application displays information about your location like latitude,
//! longitude, timezone or country, as reported by [ip-api](https://ip-api.com).
//!
pub mod error;
pub mod exec;
pub mod geo;
pub mod info;
pub mod init;
pub mod location;
pub mod work;

use log::{debug, LevelFilter};

use crate::{init::Init, work::Work};

/// Logger reading `MERIDIAN_LOG`, raised by `-v` flags.
pub fn logger(verbose: u8) -> env_logger::Builder {
    let env = env_logger::Env::new()
        .filter_or("MERIDIAN_LOG", "warn")
        .write_style("MERIDIAN_LOG_STYLE");
    let mut builder = env_logger::Builder::from_env(env);
    match verbose {
        0 => {}
        1 => {
            builder.filter_level(LevelFilter::Info);
        }
        2 => {
            builder.filter_level(LevelFilter::Debug);
        }
        _ => {
            builder.filter_level(LevelFilter::Trace);
        }
    }
    builder
}

/// Program entry point
fn main() {
    let init = Init::new();
    logger(init.verbose).init();
    debug!("request: {:?}", init.request);

    if let Err(e) = Work::new(init.request).run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
