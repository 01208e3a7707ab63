use std::path::PathBuf;

use almanac_core::config::NewlineStyle;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "almanac", version)]
#[command(about = "Parse, check and reformat iCalendar (RFC 5545) files")]
pub struct Cli {
    /// Extra configuration file, layered over `almanac.toml` and the environment
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Re-serialize a calendar with canonical folding and escaping
    Fmt(FmtArgs),
    /// Parse each file and report the first error, if any
    Check(CheckArgs),
    /// Print the parsed component tree
    Dump(DumpArgs),
}

#[derive(Debug, Args)]
pub struct FmtArgs {
    /// Input file; stdin when omitted or `-`
    pub input: Option<PathBuf>,

    /// Output file; stdout when omitted
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Maximum octets per physical line
    #[arg(long)]
    pub line_length: Option<usize>,

    /// Line terminator: `crlf` or `lf`
    #[arg(long)]
    pub newline: Option<NewlineStyle>,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[arg(required = true)]
    pub files: Vec<PathBuf>,
}

#[derive(Debug, Args)]
pub struct DumpArgs {
    /// Input file; stdin when omitted or `-`
    pub input: Option<PathBuf>,

    /// Emit JSON instead of an indented outline
    #[arg(long)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn command_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn fmt_flags_parse() {
        let cli = Cli::try_parse_from([
            "almanac",
            "fmt",
            "in.ics",
            "-o",
            "out.ics",
            "--line-length",
            "60",
            "--newline",
            "lf",
        ])
        .unwrap();
        let Command::Fmt(args) = cli.command else {
            panic!("expected fmt");
        };
        assert_eq!(args.input, Some(PathBuf::from("in.ics")));
        assert_eq!(args.output, Some(PathBuf::from("out.ics")));
        assert_eq!(args.line_length, Some(60));
        assert_eq!(args.newline, Some(NewlineStyle::Lf));
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["almanac", "check", "a.ics", "--config", "x.toml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn check_requires_a_file() {
        assert!(Cli::try_parse_from(["almanac", "check"]).is_err());
        assert!(Cli::try_parse_from(["almanac", "fmt", "--newline", "cr"]).is_err());
    }
}
