mod commands;
mod io;
mod terminal;

use commands::{CommandLine, Commands, check, sweep};
use pingr_common::config::Config;
use terminal::{disclaimer, logging, print};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    logging::init_logging(commands.verbose, commands.log_file.as_deref())?;

    let cfg = Config {
        no_dns: commands.no_dns,
        quiet: commands.quiet,
        no_disclaimer: commands.no_disclaimer,
    };

    print::banner(cfg.quiet);
    disclaimer::show_once(cfg.no_disclaimer, cfg.quiet);

    match &commands.command {
        Commands::Sweep(args) => sweep::sweep(args, &cfg).await,
        Commands::Check(args) => check::check(args, &cfg).await,
    }
}
