use ansvg::cli::{self, CliArgs, Env};
use anyhow::Context;
use clap::Parser;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    )
    .format_timestamp_millis()
    .init();

    let args = CliArgs::parse();
    cli::run(args, Env::process()).context("ansvg failed")
}
