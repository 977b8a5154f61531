use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use trustlens::config::Config;
use trustlens::error::TrustLensError;
use trustlens::host::{Action, EditorCliDispatcher};
use trustlens::output::OutputFormat;
use trustlens::risk::{Classifier, RiskLevel};
use trustlens::ScanOptions;

#[derive(Parser)]
#[command(
    name = "trustlens",
    about = "Trust risk report for installed editor extensions",
    version,
    author
)]
struct Cli {
    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct SourceArgs {
    /// Extensions directory (default: ~/.vscode/extensions)
    #[arg(long, env = "TRUSTLENS_EXTENSIONS_DIR")]
    extensions_dir: Option<PathBuf>,

    /// Directory of extensions shipped with the editor (repeatable)
    #[arg(long = "builtin-dir")]
    builtin_dirs: Vec<PathBuf>,

    /// Config file path
    #[arg(long, short = 'c')]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Assess installed extensions and print the ranked report
    Scan {
        #[command(flatten)]
        source: SourceArgs,

        /// Output format (console, json, sarif)
        #[arg(long, short = 'f', default_value = "console")]
        format: String,

        /// Lowest risk tier that fails the scan (low, medium, high)
        #[arg(long)]
        fail_on: Option<String>,

        /// Write output to file instead of stdout
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },

    /// Ask the editor to disable an extension
    Disable {
        /// Extension identifier (publisher.name)
        id: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Print the editor command instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Ask the editor to uninstall an extension
    Uninstall {
        /// Extension identifier (publisher.name)
        id: String,

        #[command(flatten)]
        source: SourceArgs,

        /// Print the editor command instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// List the scoring rules
    ListRules {
        /// Output format (table, json)
        #[arg(long, short = 'f', default_value = "table")]
        format: String,
    },

    /// Generate a starter .trustlens.toml config file
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Scan {
            source,
            format,
            fail_on,
            output,
        } => cmd_scan(source, format, fail_on, output),
        Commands::Disable {
            id,
            source,
            dry_run,
        } => cmd_action(Action::disable(id), source, dry_run),
        Commands::Uninstall {
            id,
            source,
            dry_run,
        } => cmd_action(Action::uninstall(id), source, dry_run),
        Commands::ListRules { format } => cmd_list_rules(format),
        Commands::Init { force } => cmd_init(force),
    };

    match result {
        Ok(exit_code) => process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {}", e);
            process::exit(e.exit_code());
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("TRUSTLENS_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn scan_options(source: SourceArgs) -> ScanOptions {
    ScanOptions {
        config_path: source.config,
        extensions_dir: source.extensions_dir,
        builtin_dirs: source.builtin_dirs,
        ..Default::default()
    }
}

fn cmd_scan(
    source: SourceArgs,
    format_str: String,
    fail_on_str: Option<String>,
    output_path: Option<PathBuf>,
) -> Result<i32, TrustLensError> {
    let format = OutputFormat::from_str_lenient(&format_str).unwrap_or_else(|| {
        eprintln!("Warning: unknown format '{}', using console", format_str);
        OutputFormat::Console
    });

    let fail_on = fail_on_str.and_then(|s| {
        let level = RiskLevel::from_str_lenient(&s);
        if level.is_none() {
            eprintln!("Warning: unknown risk level '{}', using config default", s);
        }
        level
    });

    let options = ScanOptions {
        format,
        fail_on_override: fail_on,
        ..scan_options(source)
    };

    let report = trustlens::scan(&options)?;
    let rendered = trustlens::render_report(&report, format)?;

    match output_path {
        Some(out) => std::fs::write(&out, &rendered)?,
        None => print!("{}", rendered),
    }

    // Exit code: 0 = pass, 1 = extensions at or above threshold
    Ok(if report.verdict.pass { 0 } else { 1 })
}

fn cmd_action(action: Action, source: SourceArgs, dry_run: bool) -> Result<i32, TrustLensError> {
    let config = trustlens::load_config(&scan_options(source))?;
    let mut provider = trustlens::open_provider(&config, dry_run)?;
    provider.refresh()?;

    let result = match action.kind {
        trustlens::host::ActionKind::Disable => provider.disable(&action.identifier),
        trustlens::host::ActionKind::Uninstall => provider.uninstall(&action.identifier),
    };

    match result {
        Ok(()) => {
            if dry_run {
                let argv = EditorCliDispatcher::new(config.editor_command()).command_line(&action);
                println!("Would run: {}", argv.join(" "));
            } else {
                println!("Requested {} of {}", action.kind, action.identifier);
            }
            Ok(0)
        }
        Err(TrustLensError::UnknownExtension(id)) => {
            eprintln!("No installed extension '{}' in the current report.", id);
            Ok(1)
        }
        Err(e) => Err(e),
    }
}

fn cmd_list_rules(format_str: String) -> Result<i32, TrustLensError> {
    let rules = Classifier::new().list_rules();

    match format_str.as_str() {
        "json" => {
            let json = serde_json::to_string_pretty(&rules)?;
            println!("{}", json);
        }
        _ => {
            println!("{:<8} {:<24} {:<7} REASON", "ID", "NAME", "POINTS");
            println!("{}", "-".repeat(72));
            for rule in &rules {
                println!(
                    "{:<8} {:<24} {:<7} {}",
                    rule.id, rule.name, rule.points, rule.reason
                );
            }
            println!();
            println!(
                "Tiers: high >= {}, medium >= {}, otherwise low",
                RiskLevel::HIGH_THRESHOLD,
                RiskLevel::MEDIUM_THRESHOLD
            );
        }
    }

    Ok(0)
}

fn cmd_init(force: bool) -> Result<i32, TrustLensError> {
    let path = PathBuf::from(trustlens::CONFIG_FILE_NAME);

    if path.exists() && !force {
        eprintln!(".trustlens.toml already exists. Use --force to overwrite.");
        return Ok(1);
    }

    std::fs::write(&path, Config::starter_toml())?;
    println!("Created .trustlens.toml");

    Ok(0)
}
