use anyhow::Result;
use clap::Parser;
use log::info;

use textcal::app::prompt_for_input;
use textcal::cli::Cli;
use textcal::config::{get_config_path, Config};
use textcal::Application;

fn main() -> Result<()> {
    textcal::init_logger();
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => get_config_path()?,
    };

    if cli.init_config {
        Config::default().save_to(&config_path)?;
        println!("Wrote default configuration to {}", config_path.display());
        return Ok(());
    }

    let mut config = Config::load_from(&config_path)?;
    cli.apply(&mut config);

    info!("Starting TextCal");
    let app = Application::new(config)?;

    let input = match cli.text {
        Some(text) => text,
        None => match prompt_for_input()? {
            Some(line) => line,
            None => return Ok(()),
        },
    };

    // Skipped phrases were already reported as warnings during assembly
    let report = app.run(&input);
    println!("{}", report.outcome);
    Ok(())
}
