pub mod app;
pub mod calendar;
pub mod cli;
pub mod config;
pub mod parser;

use std::io::Write;

use env_logger::Env;

/// Initialise logging: `info` by default, overridable through `RUST_LOG`
pub fn init_logger() {
    env_logger::Builder::from_env(Env::default().default_filter_or("info"))
        .format(|buf, record| {
            use chrono::Local;
            writeln!(
                buf,
                "{} [{}] {}",
                Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.level(),
                record.args()
            )
        })
        .init();
}

// Re-export commonly used types
pub use app::{Application, Pipeline, RunOutcome, RunReport};
pub use calendar::{Calendar, EventRecord};
pub use config::Config;
