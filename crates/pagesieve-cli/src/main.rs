mod cli;
mod extract_cmd;
mod find_cmd;
mod shared;

use clap::Parser;
use cli::Cli;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        cli::Commands::Extract {
            ref source_dir,
            ref dest_dir,
            ref search,
            from,
            to,
            quiet,
        } => extract_cmd::run(source_dir, dest_dir, search, from, to, quiet),
        cli::Commands::Find {
            ref source_dir,
            ref search,
            from,
            to,
            ref format,
        } => find_cmd::run(source_dir, search, from, to, format),
    };

    if let Err(code) = result {
        std::process::exit(code);
    }
}
