use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "stencil",
    about = "Expand a directory of template files against a data object",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Expand a template into an output directory
    Export {
        /// Template root directory (must contain an assets/ subdirectory)
        template: String,

        /// Output directory
        output: String,

        /// JSON data file (default: test-data.json at the template root)
        #[arg(short, long, value_name = "FILE")]
        data: Option<String>,

        /// Write into the output directory even if it already exists
        #[arg(long)]
        overwrite: bool,

        /// With --overwrite, remove the existing output directory first
        #[arg(long)]
        clean: bool,

        /// Show what would be written without touching the output directory
        #[arg(long)]
        dry_run: bool,
    },

    /// List a template's files and how each would be treated
    List {
        /// Template root directory
        template: String,

        /// JSON data file (default: test-data.json at the template root)
        #[arg(short, long, value_name = "FILE")]
        data: Option<String>,
    },

    /// Validate a template directory
    Check {
        /// Template root directory (default: current directory)
        #[arg(default_value = ".")]
        template: String,
    },
}
