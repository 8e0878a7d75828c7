//! Weft CLI - Literate Tutorial Builder

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

use weft::config::ConfigUpdate;
use weft::errors::Result;
use weft::highlight::ThemeName;
use weft::interface::Context;

#[derive(Parser)]
#[command(name = "weft")]
#[command(author, version, about = "Literate tutorial builder", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    directory: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Highlight style for code blocks (overrides config file)
    #[arg(long, global = true, value_enum)]
    style: Option<ThemeName>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build all tutorials, assets, materials and the reference
    Build {
        /// Do not embed the live demo in tutorial pages
        #[arg(short, long)]
        disable_demo: bool,

        /// Output folder (overrides config file)
        #[arg(short, long, value_name = "DIR")]
        output_folder: Option<PathBuf>,

        /// Serve the output folder after building
        #[arg(short, long)]
        server: bool,

        /// Dry run - show what would be done without doing it
        #[arg(short = 'n', long)]
        dry_run: bool,
    },

    /// Assemble the script of one tutorial
    Tangle {
        /// Tutorial name
        name: String,

        /// Print to standard output instead of writing the file
        #[arg(long)]
        stdout: bool,
    },

    /// Render the page of one tutorial
    Weave {
        /// Tutorial name
        name: String,

        /// Print to standard output instead of writing the file
        #[arg(long)]
        stdout: bool,
    },

    /// Build the API reference page
    Reference {
        /// Print the doc tree as JSON instead
        #[arg(long)]
        json: bool,
    },

    /// Serve a directory over HTTP
    Serve {
        /// Directory to serve (defaults to the output folder)
        #[arg(value_name = "DIR")]
        dir: Option<PathBuf>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Rebuild whenever an input changes
    Watch {
        /// Debounce delay in milliseconds
        #[arg(short, long, default_value = "0")]
        debounce: u64,
    },
}

/// Command-line overrides, merged over the configuration file.
fn config_overrides(cli: &Cli, cwd: &Path) -> ConfigUpdate {
    let mut update = ConfigUpdate::new();
    if let Some(style) = cli.style {
        update = update.with_style(style);
    }
    if let Commands::Build {
        disable_demo,
        output_folder,
        ..
    } = &cli.command
    {
        if *disable_demo {
            update = update.with_embed_demo(false);
        }
        if let Some(dir) = output_folder {
            update = update.with_output_dir(cwd.join(dir));
        }
    }
    update
}

fn make_context(cli: &Cli, cwd: &Path) -> Result<Context> {
    let base_dir = match &cli.directory {
        Some(dir) => cwd.join(dir),
        None => cwd.to_path_buf(),
    };

    let mut ctx = match &cli.config {
        Some(path) => Context::from_config_file(&base_dir.join(path), &base_dir)?,
        None => Context::from_dir(&base_dir)?,
    };

    ctx.config = config_overrides(cli, cwd).merge_into(&ctx.config);
    Ok(ctx)
}

fn run(cli: Cli) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let ctx = make_context(&cli, &cwd)?;

    match cli.command {
        Commands::Build { server, dry_run, .. } => {
            let options = commands::BuildOptions { server, dry_run };
            commands::build(&ctx, options)
        }

        Commands::Tangle { name, stdout } => {
            commands::tangle(&ctx, commands::TangleOptions { name, stdout })
        }

        Commands::Weave { name, stdout } => {
            commands::weave(&ctx, commands::WeaveOptions { name, stdout })
        }

        Commands::Reference { json } => {
            commands::reference(&ctx, commands::ReferenceOptions { json })
        }

        Commands::Serve { dir, port } => {
            let options = commands::ServeOptions {
                dir: dir.map(|d| cwd.join(d)),
                port,
            };
            commands::serve(&ctx, options)
        }

        Commands::Watch { debounce } => {
            let options = commands::WatchOptions {
                debounce_ms: debounce,
            };
            commands::watch(&ctx, options)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Set up logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(u8::try_from(e.exit_code()).unwrap_or(1))
        }
    }
}
