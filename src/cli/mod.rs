//! CLI tools for buildparams
//!
//! - `check`: Decode and validate a settings document
//! - `lint`: Report suspicious parameters and ids
//! - `doc`: Generate a reference of the known entity kinds
//! - `export`: Write a normalized YAML or JSON document
//! - `completions`: Generate shell completions

pub mod check;
pub mod completions;
pub mod doc;
pub mod export;
pub mod lint;

use anyhow::{Context, Result};
use buildparams::infrastructure::Config;
use buildparams::params::ApiVersion;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

/// CLI arguments for buildparams
#[derive(Parser, Debug)]
#[command(name = "buildparams")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// API version assumed when a document declares none
    #[arg(long, global = true, value_parser = parse_version)]
    api_version: Option<ApiVersion>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode and validate a settings document
    Check {
        /// Settings file (YAML or JSON)
        file: PathBuf,
        /// Fail on lint warnings too
        #[arg(long)]
        deny_warnings: bool,
    },

    /// Report suspicious parameters and ids
    Lint {
        /// Settings file (YAML or JSON)
        file: PathBuf,
        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<LintFormat>,
        /// Minimum severity to show
        #[arg(short, long, value_enum)]
        severity: Option<LintSeverityArg>,
        /// Show suggestions
        #[arg(long)]
        suggestions: bool,
    },

    /// Generate a reference of the known entity kinds
    Doc {
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum)]
        format: Option<DocFormatArg>,
        /// Document a single kind
        #[arg(short, long)]
        kind: Option<String>,
    },

    /// Write a normalized settings document
    Export {
        /// Settings file (YAML or JSON)
        file: PathBuf,
        /// Export format
        #[arg(short, long, value_enum)]
        format: ExportFormatArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Generate shell completions
    Completions {
        /// Shell type
        #[arg(value_enum)]
        shell: ShellArg,
        /// Output file (stdout if not specified)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LintFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum LintSeverityArg {
    Info,
    Warning,
    Error,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum DocFormatArg {
    Markdown,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ExportFormatArg {
    Yaml,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum ShellArg {
    Bash,
    Zsh,
    Fish,
    PowerShell,
}

fn parse_version(value: &str) -> Result<ApiVersion, String> {
    value.parse()
}

/// Build the CLI command for completion generation
pub fn build_cli() -> clap::Command {
    Args::command()
}

/// Writes `content` to `output`, or prints it when no path is given
fn emit(content: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, content)
            .with_context(|| format!("Failed to write output to: {}", path.display())),
        None => {
            println!("{content}");
            Ok(())
        }
    }
}

/// Parse and execute CLI arguments
pub fn run(config: &Config) -> Result<()> {
    let args = Args::parse();
    let version = args.api_version.unwrap_or(config.default_version);

    match args.command {
        Command::Check {
            file,
            deny_warnings,
        } => {
            let report = check::check_settings(&file, version)?;
            print!("{}", report.render());
            if !report.is_ok(deny_warnings || config.deny_warnings) {
                anyhow::bail!(
                    "{} failed with {} problem(s)",
                    file.display(),
                    report.problem_count(deny_warnings || config.deny_warnings)
                );
            }
        }
        Command::Lint {
            file,
            format,
            severity,
            suggestions,
        } => {
            let lint_config = lint::LintConfig {
                min_severity: match severity {
                    Some(LintSeverityArg::Warning) => lint::LintSeverity::Warning,
                    Some(LintSeverityArg::Error) => lint::LintSeverity::Error,
                    Some(LintSeverityArg::Info) | None => lint::LintSeverity::Info,
                },
                show_suggestions: suggestions,
                format: match format {
                    Some(LintFormat::Json) => lint::OutputFormat::Json,
                    Some(LintFormat::Text) | None => lint::OutputFormat::Text,
                },
            };

            let messages = lint::lint_settings(&file, version, &lint_config)?;
            println!("{}", lint::format_lint_messages(&messages, &lint_config));
        }
        Command::Doc {
            output,
            format,
            kind,
        } => {
            let doc_format = match format {
                Some(DocFormatArg::Json) => doc::DocFormat::Json,
                Some(DocFormatArg::Markdown) | None => doc::DocFormat::Markdown,
            };
            let documentation = doc::generate_doc(version, kind.as_deref(), doc_format)?;
            emit(&documentation, output.as_deref())?;
        }
        Command::Export {
            file,
            format,
            output,
        } => {
            let export_format = match format {
                ExportFormatArg::Yaml => export::ExportFormat::Yaml,
                ExportFormatArg::Json => export::ExportFormat::Json,
            };
            let exported = export::export_settings(&file, version, export_format)?;
            emit(&exported, output.as_deref())?;
        }
        Command::Completions { shell, output } => {
            use clap_complete::Shell;

            let shell_enum = match shell {
                ShellArg::Bash => Shell::Bash,
                ShellArg::Zsh => Shell::Zsh,
                ShellArg::Fish => Shell::Fish,
                ShellArg::PowerShell => Shell::PowerShell,
            };

            let completions = completions::generate_completions(shell_enum)?;
            emit(&completions, output.as_deref())?;
        }
    }

    Ok(())
}
