mod commands;
mod output;

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing::Level;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "checklist",
    version,
    about = "Convert competency checklist PDFs into bundles and sign-off workbooks"
)]
struct Cli {
    /// Log pipeline details to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a checklist PDF into a template + dataset bundle
    Convert {
        /// Path to the checklist PDF
        #[arg(default_value = commands::convert::DEFAULT_PDF)]
        pdf_file: PathBuf,

        /// Where to write the bundle JSON
        #[arg(short = 'O', long = "out", value_name = "FILE", default_value = commands::convert::DEFAULT_OUTPUT)]
        out: PathBuf,

        /// Earlier bundle whose dataset defaults are carried forward
        #[arg(long, value_name = "FILE", default_value = commands::LEGACY_BUNDLE)]
        legacy: PathBuf,

        /// Custom layout profile (default: built-in PGR layout)
        #[arg(short, long, value_name = "FILE")]
        layout: Option<PathBuf>,
    },
    /// Parse a checklist PDF into sections (without building a bundle)
    Parse {
        /// Path to the checklist PDF
        pdf_file: PathBuf,

        /// Output format: table (default) or json
        #[arg(short, long, default_value = "table")]
        output: String,

        /// Custom layout profile (default: built-in PGR layout)
        #[arg(short, long, value_name = "FILE")]
        layout: Option<PathBuf>,
    },
    /// Render a bundle into the sign-off workbook
    Workbook {
        /// Path to the competency bundle (JSON or legacy TXT)
        #[arg(short, long, value_name = "FILE", default_value = commands::convert::DEFAULT_OUTPUT)]
        input: PathBuf,

        /// Destination for the generated workbook
        #[arg(short, long, value_name = "FILE", default_value = commands::workbook::DEFAULT_OUTPUT)]
        output: PathBuf,
    },
    /// Inspect and validate layout profiles
    Layout {
        #[command(subcommand)]
        action: LayoutAction,
    },
}

#[derive(Subcommand)]
enum LayoutAction {
    /// Print a built-in layout profile
    Show {
        /// Preset name
        #[arg(default_value = "pgr")]
        preset: String,

        /// Print the raw JSON instead of a summary
        #[arg(long)]
        json: bool,
    },
    /// Validate a custom layout profile
    Validate {
        /// Path to JSON layout file
        file: PathBuf,
    },
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(level.into()))
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Convert {
            pdf_file,
            out,
            legacy,
            layout,
        } => commands::convert::run(&pdf_file, &out, &legacy, layout.as_deref()),
        Commands::Parse {
            pdf_file,
            output,
            layout,
        } => commands::parse::run(&pdf_file, &output, layout.as_deref()),
        Commands::Workbook { input, output } => commands::workbook::run(&input, &output),
        Commands::Layout { action } => match action {
            LayoutAction::Show { preset, json } => commands::layout::show(&preset, json),
            LayoutAction::Validate { file } => commands::layout::validate(&file),
        },
    };

    if let Err(e) = result {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
