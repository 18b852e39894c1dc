// src/cli.rs

use std::path::PathBuf;

use clap::Parser;

/// Search astalegale.net court-auction notices for a city and export the
/// matches as CSV or JSON.
#[derive(Debug, Parser)]
#[command(name = "asta_scout", version, about = "Court-auction listing finder for astalegale.net")]
pub struct Cli {
    /// Maximum price in EUR.
    #[arg(long, default_value_t = 150_000)]
    pub budget: u64,

    /// Target city name.
    #[arg(long, default_value = "torino")]
    pub city: String,

    /// Look-ahead window in months.
    #[arg(long, default_value_t = 3)]
    pub months: u32,

    /// Output file path; the extension (.csv or .json) selects the format.
    #[arg(long, default_value = "auctions_torino.csv")]
    pub output: PathBuf,

    /// Per-request network and browser timeout in seconds.
    #[arg(long, default_value_t = 30)]
    pub timeout: u64,

    /// Disable the headless-browser fallback for client-rendered pages.
    #[arg(long)]
    pub no_browser: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_surface() {
        let cli = Cli::parse_from(["asta_scout"]);

        assert_eq!(cli.budget, 150_000);
        assert_eq!(cli.city, "torino");
        assert_eq!(cli.months, 3);
        assert_eq!(cli.output, PathBuf::from("auctions_torino.csv"));
        assert_eq!(cli.timeout, 30);
        assert!(!cli.no_browser);
    }

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "asta_scout",
            "--budget",
            "90000",
            "--city",
            "moncalieri",
            "--months",
            "6",
            "--output",
            "out.json",
            "--no-browser",
        ]);

        assert_eq!(cli.budget, 90_000);
        assert_eq!(cli.city, "moncalieri");
        assert_eq!(cli.months, 6);
        assert_eq!(cli.output, PathBuf::from("out.json"));
        assert!(cli.no_browser);
    }
}
