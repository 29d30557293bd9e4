use anyhow::Result;
use clap::Parser;
use walktally::cli::Cli;
use walktally::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logger(cli.verbose);
    cli.run()
}
