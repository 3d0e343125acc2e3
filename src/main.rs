use std::io;

use clap::Parser;
use iplocator::{run_ip_lookup, Cli};

fn main() -> anyhow::Result<()> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // --help and --version
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            e.print()?;
            std::process::exit(1);
        }
    };

    env_logger::Builder::new()
        .filter_level(cli.log_level_filter())
        .format_timestamp(None)
        .try_init()?;

    let reporter = cli.reporter()?;
    run_ip_lookup(&reporter, &cli.addresses(), &mut io::stdout().lock())?;

    Ok(())
}
