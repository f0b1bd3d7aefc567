#![warn(clippy::pedantic)]

use std::{
    io,
    sync::{Arc, Mutex},
};

use anyhow::Context;
use clap::Parser;
use log::debug;
use ppling_app::log as app_log;
use ppling_domain::{Service, SystemClock};
use ppling_storage::{
    file_store::FileStore,
    local_storage::{LocalStorage, Log},
};

mod args;
mod commands;
mod display;
mod interactive;

use args::Cli;
use commands::App;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let data_dir = cli
        .data_dir
        .or_else(|| dirs::data_dir().map(|dir| dir.join("ppling")))
        .context("no data directory found, use --data-dir or PPLING_DATA_DIR")?;
    let store = FileStore::new(&data_dir);

    app_log::init(
        Arc::new(Mutex::new(Log::new(store.clone()))),
        app_log::level_filter(cli.verbose, cli.quiet),
    )?;
    debug!("using data directory {}", data_dir.display());

    let mut app = App::new(
        Service::load(LocalStorage::new(store.clone()), SystemClock, rand::rng()),
        LocalStorage::new(store.clone()),
        Box::new(Log::new(store)),
    );

    app.execute(cli.command, &mut io::stdin().lock(), &mut io::stdout().lock())
}
