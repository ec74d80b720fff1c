use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mangawatch", about = "Tracks manga chapters across sites", version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Poll every tracked source and report new chapters (the default)
    Check,
    /// List tracked titles with their latest known chapter
    List {
        /// Also print the chapter link of the authoritative source
        #[arg(short = 'L', long)]
        latest: bool,
    },
    /// Print the number of tracked titles
    Count,
    /// Start tracking one or more titles by their page url
    Add {
        #[arg(required = true)]
        urls: Vec<String>,
    },
    /// Stop tracking a title
    Remove { title: String },
}
