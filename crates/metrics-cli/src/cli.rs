//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "metrics-import",
    version,
    about = "Map heterogeneous metric exports onto canonical per-platform schemas",
    long_about = "Infer column types for a spreadsheet export, map the columns onto a\n\
                  platform's canonical metric fields, coerce and validate the values,\n\
                  and report an aggregate confidence with a review decision."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Append logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Import a CSV export and print the mapping and review summary.
    Import(ImportArgs),

    /// List the canonical field catalog for a platform.
    Fields(FieldsArgs),

    /// Record a reviewer's mapping correction in the correction log.
    Correct(CorrectArgs),
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Path to the CSV export.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Platform key (linkedin, google_ads, facebook_ads, custom).
    #[arg(long = "platform", value_name = "KEY")]
    pub platform: String,

    /// Directory of stored mapping templates to consult and save into.
    #[arg(long = "template-dir", value_name = "DIR")]
    pub template_dir: Option<PathBuf>,

    /// Save the accepted mapping as a template for this header layout.
    ///
    /// Templates are only written when the import does not require
    /// review; this flag is the explicit confirmation the template
    /// store contract asks for.
    #[arg(long = "save-template", requires = "template_dir")]
    pub save_template: bool,

    /// Emit the full import result as JSON instead of tables.
    #[arg(long = "json")]
    pub json: bool,

    /// Only read the first N data rows.
    #[arg(long = "max-rows", value_name = "N")]
    pub max_rows: Option<usize>,
}

#[derive(Parser)]
pub struct FieldsArgs {
    /// Platform key to list fields for.
    #[arg(long = "platform", value_name = "KEY")]
    pub platform: String,
}

#[derive(Parser)]
pub struct CorrectArgs {
    /// Platform key the correction applies to.
    #[arg(long = "platform", value_name = "KEY")]
    pub platform: String,

    /// Raw source header the correction is about.
    #[arg(long = "header", value_name = "HEADER")]
    pub header: String,

    /// Field the reviewer assigned.
    #[arg(long = "field", value_name = "FIELD")]
    pub field: String,

    /// Field the engine had suggested, if any.
    #[arg(long = "suggested", value_name = "FIELD")]
    pub suggested: Option<String>,

    /// Path of the JSONL correction log to append to.
    #[arg(long = "log", value_name = "PATH")]
    pub log: PathBuf,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn import_arguments_parse() {
        let cli = Cli::try_parse_from([
            "metrics-import",
            "import",
            "export.csv",
            "--platform",
            "google_ads",
            "--json",
            "--max-rows",
            "100",
        ])
        .unwrap();
        let Command::Import(args) = cli.command else {
            panic!("expected import subcommand");
        };
        assert_eq!(args.platform, "google_ads");
        assert!(args.json);
        assert_eq!(args.max_rows, Some(100));
        assert!(!args.save_template);
    }

    #[test]
    fn save_template_requires_a_template_dir() {
        let result = Cli::try_parse_from([
            "metrics-import",
            "import",
            "export.csv",
            "--platform",
            "linkedin",
            "--save-template",
        ]);
        assert!(result.is_err());
    }
}
