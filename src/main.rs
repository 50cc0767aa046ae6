use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use pairchat::cli::Cli;
use pairchat::console;
use pairchat::logging::init_tracing;
use pairchat::storage::ChatStorage;
use pairchat::store::{ChatProvider, ChatStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.resolve_config().context("loading configuration")?;
    init_tracing(&config.logging.filter);

    let storage = ChatStorage::open(&config.storage);
    let store = Arc::new(ChatStore::open(storage));
    let provider = ChatProvider::start(store, &config.sync);

    console::run(provider, cli.user).await
}
