use clap::Subcommand;
use std::path::PathBuf;

pub mod batch;
pub mod extract;
pub mod inspect;

#[derive(Subcommand)]
pub enum Commands {
    /// Inspect an XNO file and display its structure
    Inspect {
        /// XNO file to inspect
        path: PathBuf,
    },

    /// Extract the decoded model to JSON
    Extract {
        /// Source XNO file
        path: PathBuf,

        /// Output JSON file
        #[arg(short, long)]
        output: PathBuf,
    },

    /// Batch decode XNO files in a directory
    Batch {
        /// Directory containing XNO files
        #[arg(short, long)]
        source: PathBuf,

        /// Search subdirectories recursively
        #[arg(short, long)]
        recursive: bool,

        /// Suppress progress bar
        #[arg(short, long)]
        quiet: bool,
    },
}

impl Commands {
    pub fn execute(&self) -> anyhow::Result<()> {
        match self {
            Commands::Inspect { path } => inspect::execute(path),
            Commands::Extract { path, output } => extract::execute(path, output),
            Commands::Batch {
                source,
                recursive,
                quiet,
            } => batch::execute(source, *recursive, *quiet),
        }
    }
}
