//! nba11y CLI - Jupyter notebook accessibility tool

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};

use notebook_a11y::audit::CheckRegistry;
use notebook_a11y::{
    is_notebook_path, render, IssueSet, NotebookA11y, Remediator, ReportFormat, ReportOptions,
    Summary,
};

/// Exit status when an audit finds CRITICAL issues.
const EXIT_CRITICAL: i32 = 1;
/// Exit status for usage, I/O and format errors.
const EXIT_ERROR: i32 = 2;

#[derive(Parser)]
#[command(name = "nba11y")]
#[command(author = "iyulab")]
#[command(version)]
#[command(about = "Audit and fix accessibility of Jupyter notebooks", long_about = None)]
struct Cli {
    /// Notebook to audit
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit notebooks and print or save a report
    Audit {
        /// Notebooks or directories containing notebooks
        #[arg(value_name = "PATH", required = true)]
        paths: Vec<PathBuf>,

        /// Report format
        #[arg(short, long, value_enum, default_value = "text", env = "NBA11Y_FORMAT")]
        format: Format,

        /// Output file (one input) or directory (several inputs)
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        /// Omit passed checks from the report
        #[arg(long)]
        no_success: bool,

        /// Skip a check by name (repeatable)
        #[arg(long, value_name = "CHECK")]
        skip: Vec<String>,

        /// Evaluate checks on a single thread
        #[arg(long)]
        sequential: bool,

        /// Skip malformed cells instead of failing
        #[arg(long)]
        lenient: bool,
    },

    /// Apply automatic fixes and save an accessible copy
    #[command(alias = "fix")]
    Remediate {
        /// Input notebook
        #[arg(value_name = "INPUT")]
        input: PathBuf,

        /// Output notebook (default: <stem>_accessible.ipynb)
        #[arg(short, long, value_name = "OUT")]
        output: Option<PathBuf>,

        /// Title for notebooks without one
        #[arg(long)]
        title: Option<String>,

        /// Alt text inserted for undescribed images
        #[arg(long)]
        placeholder: Option<String>,

        /// Print the changes without writing a file
        #[arg(long)]
        dry_run: bool,

        /// Audit the result and print its summary
        #[arg(long)]
        verify: bool,
    },

    /// Show notebook information
    Info {
        /// Input notebook
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// List available checks and fixes
    Checks,

    /// Show version information
    Version,
}

#[derive(Copy, Clone, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Plain text
    Text,
    /// Markdown
    #[value(alias = "md")]
    Markdown,
    /// Standalone HTML page
    Html,
    /// Structured JSON
    Json,
}

impl From<Format> for ReportFormat {
    fn from(format: Format) -> Self {
        match format {
            Format::Text => ReportFormat::Text,
            Format::Markdown => ReportFormat::Markdown,
            Format::Html => ReportFormat::Html,
            Format::Json => ReportFormat::Json,
        }
    }
}

/// Flags shared by every audited notebook.
struct AuditFlags {
    skip: Vec<String>,
    sequential: bool,
    lenient: bool,
}

impl AuditFlags {
    fn builder(&self) -> NotebookA11y {
        let mut builder = NotebookA11y::new();
        if self.sequential {
            builder = builder.sequential();
        }
        if self.lenient {
            builder = builder.lenient();
        }
        for name in &self.skip {
            builder = builder.skip_check(name.clone());
        }
        builder
    }

    fn audit(&self, path: &Path) -> IssueSet {
        match self.builder().load(path) {
            Ok(loaded) => loaded.audit(),
            Err(e) => {
                log::error!("Failed to load {}: {}", path.display(), e);
                IssueSet::file_error(path, &e)
            }
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    let result = match cli.command {
        Some(Commands::Audit {
            paths,
            format,
            output,
            no_success,
            skip,
            sequential,
            lenient,
        }) => {
            let flags = AuditFlags {
                skip,
                sequential,
                lenient,
            };
            cmd_audit(&paths, format.into(), output.as_deref(), !no_success, &flags)
        }
        Some(Commands::Remediate {
            input,
            output,
            title,
            placeholder,
            dry_run,
            verify,
        }) => cmd_remediate(
            &input,
            output.as_deref(),
            title,
            placeholder,
            dry_run,
            verify,
        ),
        Some(Commands::Info { input }) => cmd_info(&input).map(|_| 0),
        Some(Commands::Checks) => {
            cmd_checks();
            Ok(0)
        }
        Some(Commands::Version) => {
            cmd_version();
            Ok(0)
        }
        None => {
            // Default behavior: text audit of the given notebook
            if let Some(input) = cli.input {
                let flags = AuditFlags {
                    skip: Vec::new(),
                    sequential: false,
                    lenient: false,
                };
                cmd_audit(&[input], ReportFormat::Text, None, true, &flags)
            } else {
                println!("{}", "Usage: nba11y <FILE>".yellow());
                println!("       nba11y --help for more information");
                Ok(0)
            }
        }
    };

    match result {
        Ok(0) => {}
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "Error".red().bold(), e);
            std::process::exit(EXIT_ERROR);
        }
    }
}

/// Expand directories into the notebooks they contain.
fn collect_notebooks(paths: &[PathBuf]) -> Result<Vec<PathBuf>, Box<dyn std::error::Error>> {
    let mut notebooks = Vec::new();
    let mut pending: Vec<PathBuf> = paths.to_vec();
    pending.reverse();

    while let Some(path) = pending.pop() {
        if !path.is_dir() {
            notebooks.push(path);
            continue;
        }
        if path.file_name().is_some_and(|n| n == ".ipynb_checkpoints") {
            continue;
        }

        let mut entries: Vec<PathBuf> = fs::read_dir(&path)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|p| p.is_dir() || is_notebook_path(p))
            .collect();
        entries.sort();
        entries.reverse();
        pending.extend(entries);
    }

    Ok(notebooks)
}

fn cmd_audit(
    paths: &[PathBuf],
    format: ReportFormat,
    output: Option<&Path>,
    include_successes: bool,
    flags: &AuditFlags,
) -> Result<i32, Box<dyn std::error::Error>> {
    let notebooks = collect_notebooks(paths)?;
    if notebooks.is_empty() {
        return Err("no notebooks found".into());
    }

    let report_options = |path: &Path| {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        ReportOptions::new()
            .with_notebook_name(name)
            .with_successes(include_successes)
    };

    if let [path] = notebooks.as_slice() {
        let issues = flags.audit(path);
        let report = render::render(&issues, format, &report_options(path))?;

        if let Some(out) = output {
            fs::write(out, &report)?;
            println!("{} {}", "Saved to".green(), out.display());
            print_summary(path, &issues.summary());
        } else {
            println!("{}", report);
        }
        return Ok(exit_code(issues.has_critical()));
    }

    if let Some(dir) = output {
        fs::create_dir_all(dir)?;
    }

    let pb = ProgressBar::new(notebooks.len() as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut any_critical = false;
    let mut results = Vec::with_capacity(notebooks.len());
    for path in &notebooks {
        pb.set_message(path.display().to_string());
        let issues = flags.audit(path);
        any_critical |= issues.has_critical();

        if let Some(dir) = output {
            let stem = path.file_stem().unwrap_or_default().to_string_lossy();
            let target = dir.join(format!("{}_audit_report.{}", stem, format.extension()));
            let report = render::render(&issues, format, &report_options(path))?;
            fs::write(&target, report)?;
        }
        results.push((path, issues.summary()));
        pb.inc(1);
    }
    pb.finish_and_clear();

    for (path, summary) in &results {
        print_summary(path, summary);
    }
    if let Some(dir) = output {
        println!("\n{} {}", "Reports saved to".green(), dir.display());
    }

    Ok(exit_code(any_critical))
}

fn exit_code(any_critical: bool) -> i32 {
    if any_critical {
        EXIT_CRITICAL
    } else {
        0
    }
}

fn print_summary(path: &Path, summary: &Summary) {
    let status = if summary.critical > 0 {
        "FAIL".red().bold()
    } else if summary.warning > 0 {
        "WARN".yellow().bold()
    } else {
        "PASS".green().bold()
    };
    println!(
        "{} {} {} critical, {} warnings, {} passed",
        status,
        path.display(),
        summary.critical.to_string().red(),
        summary.warning.to_string().yellow(),
        summary.success.to_string().green()
    );
}

fn cmd_remediate(
    input: &Path,
    output: Option<&Path>,
    title: Option<String>,
    placeholder: Option<String>,
    dry_run: bool,
    verify: bool,
) -> Result<i32, Box<dyn std::error::Error>> {
    let mut builder = NotebookA11y::new();
    if let Some(title) = title {
        builder = builder.with_title(title);
    }
    if let Some(placeholder) = placeholder {
        builder = builder.with_placeholder(placeholder);
    }
    let mut loaded = builder.load(input)?;

    let report = loaded.remediate();

    if report.changes.is_empty() {
        println!("{}", "No changes needed".green());
    } else {
        println!("{}", "Changes:".cyan().bold());
        for change in report.changes.iter() {
            println!("  {} {}", "•".dimmed(), change);
        }
    }
    for diagnostic in &report.diagnostics {
        eprintln!("{} {}", "Skipped fix".yellow(), diagnostic);
    }

    if !dry_run {
        let output_path = output.map(Path::to_path_buf).unwrap_or_else(|| {
            let stem = input.file_stem().unwrap_or_default().to_string_lossy();
            input.with_file_name(format!("{}_accessible.ipynb", stem))
        });
        loaded.save(&output_path)?;
        println!("{} {}", "Saved to".green(), output_path.display());
    }

    if verify {
        let summary = loaded.audit().summary();
        println!();
        print_summary(input, &summary);
    }

    Ok(0)
}

fn cmd_info(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    // Lenient so that a partly broken notebook still reports its shape
    let loaded = NotebookA11y::new().lenient().load(input)?;
    let nb = loaded.notebook();

    println!("{}", "Notebook Information".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    println!("{}: {}", "File".bold(), input.display());
    match nb.format() {
        Some(format) => println!("{}: {}", "Format".bold(), format),
        None => println!("{}: unknown", "Format".bold()),
    }
    if let Some(kernel) = nb
        .metadata()
        .and_then(|m| m.get("kernelspec"))
        .and_then(|k| k.get("display_name"))
        .and_then(|n| n.as_str())
    {
        println!("{}: {}", "Kernel".bold(), kernel);
    }

    println!();
    println!("{}", "Content Statistics".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());

    let markdown = nb.markdown_cells().count();
    let code = nb.code_cells().count();
    let images: usize = nb
        .cells()
        .iter()
        .map(|c| c.outputs().iter().filter(|o| o.has_image()).count())
        .sum();

    println!("{}: {}", "Cells".bold(), nb.cell_count());
    println!("{}: {}", "Markdown".bold(), markdown);
    println!("{}: {}", "Code".bold(), code);
    println!("{}: {}", "Other".bold(), nb.cell_count() - markdown - code);
    println!("{}: {}", "Image outputs".bold(), images);

    Ok(())
}

fn cmd_checks() {
    println!("{}", "Checks".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for check in CheckRegistry::with_defaults().iter() {
        println!("  {:<12} {}", check.name().bold(), check.description());
    }

    println!();
    println!("{}", "Fixes".cyan().bold());
    println!("{}", "─".repeat(40).dimmed());
    for fix in Remediator::new().fixes() {
        println!("  {:<12} {}", fix.name().bold(), fix.description());
    }
}

fn cmd_version() {
    println!("{} {}", "nba11y".cyan().bold(), env!("CARGO_PKG_VERSION"));
    println!("Jupyter notebook accessibility auditor");
    println!();
    println!(
        "Repository: {}",
        "https://github.com/iyulab/notebook-a11y".dimmed()
    );
    println!("License: MIT");
}
