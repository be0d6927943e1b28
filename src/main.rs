//! treedump command-line interface.
//!
//! This is the main entry point for the treedump CLI tool. It uses clap for
//! argument parsing and wires together the library modules to either dump a
//! file tree into one text file or compare two directory trees.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::*;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process;
use tracing::info;
use tracing_subscriber::EnvFilter;
use treedump::{
    collect, reconcile, write_comparison, write_files, CollectConfig, CompareFormat, DumpFormat,
    FileSet, FilterConfig, FilterError, OutputError, OutputOptions, TreedumpError,
};

/// treedump - dump file trees to text or compare two directory trees
///
/// In single-path mode every file under PATH is written to the output file,
/// either in full or as a grep-style `path:lines` summary. In compare mode
/// (-d) two directory trees are reconciled and the differences reported.
#[derive(Parser)]
#[command(name = "treedump")]
#[command(version)]
#[command(about = "Dump file trees to a text file or compare two directory trees", long_about = None)]
struct Cli {
    /// File or directory to dump, or the two directories to compare with -d
    #[arg(value_name = "PATH", required = true, num_args = 1..=2)]
    paths: Vec<PathBuf>,

    /// Grep-style summary (`path:lines`) instead of full contents
    #[arg(short = 'g', long)]
    grep: bool,

    /// With -g, include each file's contents after its summary line
    #[arg(short = 'v', long, requires = "grep")]
    show_content: bool,

    /// Compare two directory trees
    #[arg(short = 'd', long, conflicts_with = "grep")]
    compare: bool,

    /// With -d, write a unified-diff-style report instead of a summary
    #[arg(long = "diff", requires = "compare")]
    unified: bool,

    /// Output file, or `-` for stdout
    #[arg(short, long, value_name = "FILE", default_value = "output.txt")]
    output: PathBuf,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value = "text")]
    format: FormatArg,

    /// Skip relative paths matching PATTERN (repeatable, e.g. `target/**`)
    #[arg(long, value_name = "PATTERN")]
    ignore: Vec<String>,

    /// Only collect relative paths matching PATTERN (repeatable)
    #[arg(long, value_name = "PATTERN")]
    only: Vec<String>,

    /// Follow symbolic links (loops are detected and skipped)
    #[arg(long)]
    follow_symlinks: bool,

    /// Skip dot-files and dot-directories
    #[arg(long)]
    skip_hidden: bool,

    /// Colour diff output
    #[arg(long)]
    color: bool,

    /// Do not print where the output was written
    #[arg(short, long)]
    quiet: bool,

    /// Log level used when RUST_LOG is not set
    #[arg(long, value_name = "LEVEL", default_value = "warn")]
    log_level: String,
}

/// Output format argument for clap
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// JSON document
    Json,
}

impl Cli {
    fn dump_format(&self) -> DumpFormat {
        match (self.format, self.grep) {
            (FormatArg::Json, _) => DumpFormat::Json,
            (FormatArg::Text, true) => DumpFormat::Grep,
            (FormatArg::Text, false) => DumpFormat::Full,
        }
    }

    fn compare_format(&self) -> CompareFormat {
        match (self.format, self.unified) {
            (FormatArg::Json, _) => CompareFormat::Json,
            (FormatArg::Text, true) => CompareFormat::Diff,
            (FormatArg::Text, false) => CompareFormat::Simple,
        }
    }

    fn collect_config(&self) -> Result<CollectConfig, FilterError> {
        let builder = self
            .ignore
            .iter()
            .fold(FilterConfig::builder(), |builder, pattern| builder.ignore(pattern));
        let filter = self
            .only
            .iter()
            .fold(builder, |builder, pattern| builder.only(pattern))
            .build()?;

        Ok(CollectConfig {
            follow_symlinks: self.follow_symlinks,
            include_hidden: !self.skip_hidden,
            filter,
        })
    }

    fn output_options(&self) -> OutputOptions {
        OutputOptions {
            show_content: self.show_content,
            color: self.color,
        }
    }

    fn writes_to_stdout(&self) -> bool {
        self.output == Path::new("-")
    }
}

fn main() {
    let cli = Cli::parse();
    init_logging(&cli.log_level);

    if cli.color {
        colored::control::set_override(true);
    }

    if let Err(err) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        process::exit(2);
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let config = cli
        .collect_config()
        .map_err(TreedumpError::from)
        .context("Invalid --ignore/--only pattern")?;
    let options = cli.output_options();

    if cli.compare {
        let [left, right] = cli.paths.as_slice() else {
            return Err(TreedumpError::usage("compare mode (-d) requires exactly two paths").into());
        };

        let left_files = collect_tree(left, &config)
            .with_context(|| format!("Failed to collect first tree: {}", left.display()))?;
        let right_files = collect_tree(right, &config)
            .with_context(|| format!("Failed to collect second tree: {}", right.display()))?;

        info!("Comparing trees...");
        let result = reconcile(left_files, right_files);

        emit(&cli.output, |sink| {
            write_comparison(&result, cli.compare_format(), &options, sink)
        })
        .context("Failed to write comparison report")?;
    } else {
        let [path] = cli.paths.as_slice() else {
            return Err(TreedumpError::usage(
                "expected a single path (use -d to compare two directories)",
            )
            .into());
        };

        let files = collect_tree(path, &config)
            .with_context(|| format!("Failed to collect {}", path.display()))?;

        emit(&cli.output, |sink| {
            write_files(&files, cli.dump_format(), &options, sink)
        })
        .context("Failed to write file contents")?;
    }

    if !cli.quiet && !cli.writes_to_stdout() {
        println!("{} {}", "Output written to".green(), cli.output.display());
    }

    Ok(())
}

fn collect_tree(path: &Path, config: &CollectConfig) -> Result<FileSet, TreedumpError> {
    info!("Collecting {}...", path.display());
    Ok(collect(path, config)?)
}

/// Opens the output sink, renders into it and flushes.
fn emit<F>(output: &Path, render: F) -> Result<(), TreedumpError>
where
    F: FnOnce(&mut dyn Write) -> Result<(), OutputError>,
{
    let mut sink = open_output(output)?;
    render(&mut *sink)?;
    sink.flush().map_err(OutputError::from)?;
    Ok(())
}

/// Opens the output sink; `-` means stdout.
fn open_output(path: &Path) -> Result<Box<dyn Write>, OutputError> {
    if path == Path::new("-") {
        return Ok(Box::new(BufWriter::new(io::stdout().lock())));
    }

    let file = File::create(path).map_err(|e| OutputError::create(path, e))?;
    Ok(Box::new(BufWriter::new(file)))
}
