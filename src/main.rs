use clap::Parser;
use codexc::cli::Cli;
use colored::Colorize;

fn main() {
    let cli = Cli::parse();
    if let Err(err) = codexc::run(cli) {
        eprintln!("{} {:#}", "error:".red().bold(), err);
        std::process::exit(1);
    }
}
