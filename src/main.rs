mod auth;
mod cli;
mod error;
mod http;
mod logging;
mod output;

use clap::Parser;

use cli::CliConfig;
use http::client::call;

fn main() -> anyhow::Result<()> {
    let cli = CliConfig::parse();
    logging::init(cli.verbose);

    let config = cli.request_config()?;
    let outcome = call(&config);

    // Failed calls are reported on stdout and still exit 0.
    println!("{}", output::render(&outcome, cli.format));
    Ok(())
}
