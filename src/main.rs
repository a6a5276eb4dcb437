use clap::Parser;
use clap::Subcommand;
use commands::open::Open;
use commands::propose::Propose;
use git::Git;

mod actions;
mod commands;
mod config;
mod core;
mod errors;
mod git;
mod github;
mod process;
mod proposal;
mod review;
mod state;
mod template;

#[derive(Debug, Parser)] // requires `derive` feature
#[command(name = "pr-opener")]
#[command(about = "Propose, review and open draft pull requests", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    Propose(Propose),
    Open(Open),
}

fn main() {
    env_logger::init();

    let args = Cli::parse();

    let result = Git::open(".").and_then(|git| match args.command {
        Commands::Propose(propose) => propose.execute(git),
        Commands::Open(open) => open.execute(git),
    });

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
