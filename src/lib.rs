pub mod align_cmd;
pub mod cli;
pub mod config;
pub mod emit;
pub mod error;
pub mod generate;
pub mod io_utils;
pub mod schema_file;
pub mod table;
pub mod transform;
pub mod workbook;

use std::{env, sync::OnceLock};

use anyhow::Result;
use clap::Parser;
use log::{LevelFilter, debug};

use crate::{
    cli::{Cli, Commands},
    config::GeneratorConfig,
};

static LOGGER: OnceLock<()> = OnceLock::new();

fn init_logging() {
    LOGGER.get_or_init(|| {
        let mut builder = env_logger::Builder::from_env(env_logger::Env::default());
        if env::var("RUST_LOG").is_err() {
            builder.filter_module("lakehouse_sqlgen", LevelFilter::Info);
        }
        let _ = builder.format_timestamp_millis().try_init();
    });
}

pub fn run() -> Result<()> {
    init_logging();
    let cli = Cli::parse();
    let config = GeneratorConfig::resolve(&cli.paths)?;
    debug!("Resolved configuration: {config:?}");
    match cli.command {
        None | Some(Commands::Generate) => generate::execute(&config).map(|_| ()),
        Some(Commands::Align(args)) => align_cmd::execute(&config, &args),
    }
}
