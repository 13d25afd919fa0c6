use std::process;

use anyhow::{bail, Result};

use momentum_lab::app::{config::AppConfig, App};

const USAGE: &str = "Momentum Lab: watch momentum = mass × velocity in the terminal\n\nUsage:\n  momentum-lab";

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    if let Err(e) = run() {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run() -> Result<()> {
    if std::env::args().nth(1).is_some() {
        bail!(USAGE);
    }
    let mut app = App::new(AppConfig::load())?;
    app.run()
}
