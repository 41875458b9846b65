use anyhow::Result;
use clap::{CommandFactory, Parser as ClapParser};
use genbench::cli::{self, Cli, Commands};
use genbench::style::{Palette, Style};
use tracing_subscriber::EnvFilter;

fn init_logging(verbose: bool) {
    let default = if verbose { "genbench=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(cli_args: Cli, palette: &Palette) -> Result<()> {
    if let Commands::Completions { shell } = cli_args.command {
        let mut cmd = Cli::command();
        clap_complete::generate(shell, &mut cmd, "genbench", &mut std::io::stdout());
        return Ok(());
    }

    let config = cli::load_config(cli_args.config.as_ref())?;

    match cli_args.command {
        Commands::Bench { report } => cli::bench(&config, palette, report),
        Commands::Stats { json } => cli::stats(&config, palette, json),
        Commands::Types => cli::types(&config, palette),
        Commands::Outputs { lines } => cli::outputs(&config, palette, lines),
        Commands::Report { output } => cli::report(&config, palette, output.as_deref()).map(|_| ()),
        Commands::Completions { .. } => Ok(()),
    }
}

fn main() {
    let cli_args = Cli::parse();
    init_logging(cli_args.verbose);
    let palette = Palette::default();

    if let Err(e) = run(cli_args, &palette) {
        eprintln!("{} {:#}", palette.paint(Style::Error, "Error:"), e);
        std::process::exit(1);
    }
}
