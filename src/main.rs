use clap::Parser;

use crate::cli::Cli;

mod cli;
mod domain;
mod errors;
mod export;
mod fetch;
mod parse;
mod pipeline;
mod zones;


fn main() {
    let args = Cli::parse();

    match pipeline::run(&args) {
        Ok(summary) => {
            eprintln!(
                "🏁 Run complete: kept {} of {} listings, {} written to {}",
                summary.kept,
                summary.parsed,
                summary.format.label(),
                args.output.display()
            );
        }
        Err(e) => {
            eprintln!("❌ {e}");
            std::process::exit(1);
        }
    }
}
