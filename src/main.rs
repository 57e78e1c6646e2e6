//! glcli - a command-line client for GitLab.

use std::io;
use std::process;

use clap::Parser;
use glcli::cli::{Cli, Commands};
use glcli::config;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Commands) -> glcli::Result<()> {
    match command {
        Commands::Status => {
            let creds = config::load()?;
            println!("host:        {}", creds.host);
            println!("user:        {}", creds.user);
            println!("token:       {}", creds.masked_token());
            if let Some(ca_file) = &creds.ca_file {
                println!("ca_file:     {}", ca_file.display());
            }
            println!("skip_verify: {}", creds.skip_verify);
            Ok(())
        }
        Commands::Init => {
            let confpath = config::default_config_path()?;
            let stdin = io::stdin();
            let mut input = stdin.lock();
            config::setup::run(&confpath, &mut input)
        }
    }
}
