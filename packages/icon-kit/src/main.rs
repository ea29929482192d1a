use std::{env, path::PathBuf, process::ExitCode};

use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use icon_kit_build::Options;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

/// Generate icon components from a tree of SVG assets.
#[derive(Parser)]
#[command(name = "icon-kit", version, args_conflicts_with_subcommands = true)]
struct Cli {
    /// Log more (-v debug, -vv trace); RUST_LOG takes precedence
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,

    #[command(flatten)]
    generate: GenerateArgs,
}

#[derive(Subcommand)]
enum Command {
    /// Write every icon's folder (the default)
    Generate(GenerateArgs),
    /// Print the icons that would be generated
    List(SourceArgs),
}

#[derive(Args)]
struct SourceArgs {
    /// Config file, relative to --dir
    #[arg(short, long, env = "ICON_KIT_CONFIG", default_value = "icons.toml")]
    config: PathBuf,

    /// Directory to resolve the config from [default: current directory]
    #[arg(short = 'C', long)]
    dir: Option<PathBuf>,
}

impl SourceArgs {
    fn options(&self) -> Result<Options> {
        let dir = match &self.dir {
            Some(dir) => dir.clone(),
            None => env::current_dir()?,
        };
        Ok(Options::new(dir).with_config_file(self.config.clone()))
    }
}

#[derive(Args)]
struct GenerateArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Output root, overriding the config file
    #[arg(short, long)]
    out: Option<PathBuf>,

    /// Remove existing category folders first
    #[arg(long)]
    clean: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Some(Command::Generate(args)) => generate(args),
        Some(Command::List(args)) => list(args),
        None => generate(cli.generate),
    };
    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn generate(args: GenerateArgs) -> Result<bool> {
    let mut opts = args.source.options()?;
    if let Some(out) = args.out {
        opts = opts.with_output_dir(out);
    }
    if args.clean {
        opts = opts.with_clean(true);
    }

    info!("⏳ creating icons");
    let report = icon_kit_build::generate(opts)?;
    info!("👌 {} icons created", report.emitted);

    for diagnostic in &report.diagnostics {
        warn!("{diagnostic}");
    }
    for failure in &report.failures {
        error!("{}: {:#}", failure.folder.display(), failure.error);
    }
    Ok(report.is_success())
}

fn list(args: SourceArgs) -> Result<bool> {
    let discovery = icon_kit_build::scan(args.options()?)?;
    for icon in &discovery.icons {
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            icon.category,
            icon.name,
            icon.size,
            icon.color,
            icon.component_name,
            icon.css_selector
        );
    }
    for diagnostic in &discovery.diagnostics {
        warn!("{diagnostic}");
    }
    info!("{} icons found", discovery.icons.len());
    Ok(true)
}
