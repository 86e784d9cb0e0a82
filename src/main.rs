use anyhow::{Context, Result};
use clap::Parser;
use partpack::{NameBlacklist, PartitionConfig, Partitioner, RunReport, SortOrder};
use std::path::PathBuf;
use std::process::ExitCode;

/// Split and merge text documents to fit upload size and file-count limits
#[derive(Parser, Debug)]
#[command(name = "partpack", version, about)]
struct Cli {
    /// Directory holding the documents
    input_dir: PathBuf,

    /// JSON config file; flags below override its values
    #[arg(long)]
    config: Option<PathBuf>,

    /// Maximum characters per output file
    #[arg(long)]
    max_size: Option<usize>,

    /// Maximum number of output files
    #[arg(long)]
    max_files: Option<usize>,

    /// Regular expression separating blocks inside a document
    #[arg(long)]
    split_pattern: Option<String>,

    /// Separator inserted between merged blocks and documents
    #[arg(long)]
    join: Option<String>,

    /// Encoding label of the documents
    #[arg(long)]
    encoding: Option<String>,

    /// File name prefix for merged bins
    #[arg(long)]
    prefix: Option<String>,

    /// Write parts and bins here instead of the input directory
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Extension of files to pick up (without dot)
    #[arg(long)]
    extension: Option<String>,

    /// Descend into subdirectories
    #[arg(long)]
    recursive: bool,

    /// Process the largest documents first
    #[arg(long)]
    largest_first: bool,

    /// Skip documents whose name or folder contains this text (repeatable)
    #[arg(long = "exclude")]
    excludes: Vec<String>,

    /// Plan only, do not write or delete anything
    #[arg(long)]
    dry_run: bool,

    /// Write a JSON run report to this path
    #[arg(long)]
    report: Option<PathBuf>,

    /// Only log warnings and errors
    #[arg(short, long)]
    quiet: bool,

    /// Log planning details
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn into_config(self) -> Result<(PartitionConfig, Options)> {
        let mut config = match &self.config {
            Some(path) => PartitionConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => {
                let max_size = self
                    .max_size
                    .context("--max-size is required without --config")?;
                let max_files = self
                    .max_files
                    .context("--max-files is required without --config")?;
                PartitionConfig::new(max_size, max_files)
            }
        };

        if let Some(max_size) = self.max_size {
            config.max_size = max_size;
        }
        if let Some(max_files) = self.max_files {
            config.max_files = max_files;
        }
        if let Some(pattern) = self.split_pattern {
            config.split_pattern = pattern;
        }
        if let Some(join) = self.join {
            config.join_separator = join;
        }
        if let Some(encoding) = self.encoding {
            config.encoding = encoding;
        }
        if let Some(prefix) = self.prefix {
            config.bin_prefix = prefix;
        }
        if let Some(dir) = self.output_dir {
            config.output_dir = Some(dir);
        }
        if let Some(extension) = self.extension {
            config.collect.extension = extension;
        }
        if self.recursive {
            config.collect.recursive = true;
        }
        if self.largest_first {
            config.order = SortOrder::SizeDescending;
        }

        let options = Options {
            input_dir: self.input_dir,
            blacklist: NameBlacklist::new(self.excludes),
            dry_run: self.dry_run,
            report: self.report,
        };
        Ok((config, options))
    }
}

struct Options {
    input_dir: PathBuf,
    blacklist: NameBlacklist,
    dry_run: bool,
    report: Option<PathBuf>,
}

fn init_logging(quiet: bool, verbose: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if quiet {
        builder.filter_level(log::LevelFilter::Warn);
    } else if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.target(env_logger::Target::Stderr).init();
}

fn run(cli: Cli) -> Result<()> {
    let (config, options) = cli.into_config()?;
    let partitioner = Partitioner::new(config).context("Invalid configuration")?;
    let mut store = partitioner.disk_store()?;

    let plan = partitioner.run_dir(
        &mut store,
        &options.input_dir,
        |path| options.blacklist.allows(path),
        options.dry_run,
    )?;

    for output in &plan.outputs {
        println!(
            "{}\t{}\t{}",
            output.kind.label(),
            output.size,
            output.path.display()
        );
    }
    eprintln!(
        "{} {} files from {} documents ({} split, {} merged)",
        if options.dry_run { "Would produce" } else { "Produced" },
        plan.outputs.len(),
        plan.input_count,
        plan.split_documents,
        plan.merges
    );

    if let Some(path) = &options.report {
        RunReport::new(&plan, partitioner.config(), options.dry_run).write_to_file(path)?;
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let infeasible = e
                .downcast_ref::<partpack::PartitionError>()
                .is_some_and(|e| e.is_infeasible());
            log::error!("{:#}", e);
            if infeasible {
                ExitCode::from(2)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}
