use std::env;

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use mldata_cli::builtin;
use mldata_cli::run::{build_command, dispatch, finalize_registry};
use mldata_lib::Config;

fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env();
    let providers = builtin::providers();

    // Step one: finalize the registry. The extractor pulls `--extra <name>`
    // out of the argument list before clap ever sees it, because the set of
    // subcommands depends on the merged registry.
    let mut args: Vec<String> = env::args().collect();
    let registry = finalize_registry(&config, providers, &mut args)
        .context("failed to assemble the downloader registry")?;

    // Step two: build the grammar from the finalized registry and dispatch.
    let mut command = build_command(&registry);
    let matches = command.clone().get_matches_from(args);
    dispatch(&registry, &mut command, &matches)?;
    Ok(())
}

fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
