use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Label restaurant menus from PDFs and web pages.
#[derive(Parser, Debug)]
#[command(name = "menu-labeler")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyze one or more menus and export the labels.
    Label {
        #[command(flatten)]
        input: InputSource,

        /// Restaurant name used with --url.
        #[arg(long, requires = "url")]
        name: Option<String>,

        /// Output file (.json or .csv). A unique suffix is added to the name.
        #[arg(short, long)]
        output: PathBuf,

        /// Timeout for fetching a page, in seconds.
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
    },

    /// Serve the analyzer over HTTP.
    Serve {
        #[arg(long, default_value = "0.0.0.0:3000")]
        bind: String,
    },
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct InputSource {
    /// Path to a single PDF file.
    #[arg(long)]
    pub pdf: Option<PathBuf>,

    /// URL to scrape.
    #[arg(long)]
    pub url: Option<String>,

    /// Directory containing PDF files.
    #[arg(long)]
    pub pdfs_dir: Option<PathBuf>,

    /// JSON file mapping restaurant names to URLs.
    #[arg(long)]
    pub restaurants_json: Option<PathBuf>,
}
