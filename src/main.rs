use clap::{CommandFactory, Parser};
use clap_complete::{generate, Shell};
use colored::Colorize;
use miette::Result;
use omitparens::analysis::Linter;
use omitparens::config::Config;
use omitparens::discovery::FileFinder;
use omitparens::refactor::FileEditor;
use omitparens::report::{ReportFormat, ReportOptions, Reporter};
use std::path::PathBuf;
use std::time::Instant;
use tracing::info;

/// omitparens - Find and remove unnecessary parentheses, brackets and braces in JavaScript
#[derive(Parser, Debug)]
#[command(name = "omitparens")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Files or directories to lint (defaults to the configured targets, or `.`)
    paths: Vec<PathBuf>,

    /// Path to configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Patterns to exclude (can be specified multiple times)
    #[arg(short, long)]
    exclude: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "terminal")]
    format: OutputFormat,

    /// Output file (for json format)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Rewrite files, removing what can be removed safely
    #[arg(long)]
    fix: bool,

    /// Show which files --fix would change without writing them
    #[arg(long)]
    dry_run: bool,

    /// Ask before writing each fixed file
    #[arg(long)]
    interactive: bool,

    /// Maximum fix passes per file (overrides the config file)
    #[arg(long, value_name = "N")]
    max_passes: Option<usize>,

    /// Lint files in parallel (enabled by default)
    #[arg(long, default_value = "true", action = clap::ArgAction::Set)]
    parallel: bool,

    /// Turn the rule off (nothing is reported)
    #[arg(long)]
    disable: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Quiet mode - only output results
    #[arg(short, long)]
    quiet: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL")]
    completions: Option<Shell>,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug, Default)]
enum OutputFormat {
    #[default]
    Terminal,
    Compact,
    Json,
}

impl From<OutputFormat> for ReportFormat {
    fn from(format: OutputFormat) -> Self {
        match format {
            OutputFormat::Terminal => ReportFormat::Terminal,
            OutputFormat::Compact => ReportFormat::Compact,
            OutputFormat::Json => ReportFormat::Json,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    if let Some(shell) = cli.completions {
        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(shell, &mut cmd, name, &mut std::io::stdout());
        return Ok(());
    }

    init_logging(cli.verbose, cli.quiet);

    info!("omitparens v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&cli)?;
    let remaining = run(&config, &cli)?;

    if remaining > 0 {
        std::process::exit(1);
    }
    Ok(())
}

fn init_logging(verbose: bool, quiet: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let filter = if quiet {
        EnvFilter::new("error")
    } else if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(cli: &Cli) -> Result<Config> {
    let root = cli.paths.first().cloned().unwrap_or_else(|| PathBuf::from("."));
    let mut config = if let Some(config_path) = &cli.config {
        Config::from_file(config_path)?
    } else {
        Config::from_default_locations(&root)?
    };

    // Override with CLI arguments
    if !cli.paths.is_empty() {
        config.targets = cli.paths.clone();
    }
    if !cli.exclude.is_empty() {
        config.exclude.extend(cli.exclude.clone());
    }
    if let Some(passes) = cli.max_passes {
        config.max_fix_passes = passes.max(1);
    }
    if cli.disable {
        config.enabled = false;
    }

    Ok(config)
}

/// Lint (and maybe fix) everything; returns the number of findings left
fn run(config: &Config, cli: &Cli) -> Result<usize> {
    let start_time = Instant::now();
    let human_output = !matches!(cli.format, OutputFormat::Json);
    let root = PathBuf::from(".");

    info!("Discovering files...");
    let files = FileFinder::new(config).find_files(&root)?;
    info!("Found {} files to lint", files.len());

    if files.is_empty() {
        if human_output {
            println!("{}", "No JavaScript files found.".yellow());
        }
        return Ok(0);
    }

    let linter = Linter::new(config).with_progress(human_output && !cli.quiet);
    let fixing = cli.fix || cli.dry_run || cli.interactive;

    let (run, fixed_count) = if fixing {
        let editor = FileEditor::new(cli.dry_run, cli.interactive, config.max_fix_passes)
            .with_messages(human_output);
        let (run, applied) = editor.fix_files(&linter, &files, cli.parallel);
        (run, Some(applied))
    } else {
        (linter.lint_files(&files, cli.parallel), None)
    };

    let options = ReportOptions {
        output_path: cli.output.clone(),
        base_path: Some(root),
        fixed_count,
        dry_run: cli.dry_run,
    };
    Reporter::with_options(cli.format.into(), options).report(&run)?;

    let elapsed = start_time.elapsed();
    if human_output && !cli.quiet {
        println!(
            "{}",
            format!(
                "⏱  Linted {} files in {:.2}s",
                files.len(),
                elapsed.as_secs_f64()
            )
            .dimmed()
        );
    }
    info!("Completed in {:.2}s", elapsed.as_secs_f64());

    Ok(run.total_findings())
}
