use anyhow::Result;
use clap::{CommandFactory, Parser, ValueEnum, error::ErrorKind};
use colored::Colorize;
use colored::control::set_override as set_color_override;
use regex::Regex;
use std::path::PathBuf;
use structure_oracle::generator::VerificationUnit;
use structure_oracle::i18n;
use structure_oracle::report::{OutputKind, print_human};
use structure_oracle::{DescriptorIntrospector, generate_units, load_oracle, run_units};
use structure_oracle::{t, t_args};
use tracing::{error, info, warn};

#[cfg(feature = "mimalloc")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
enum OutputFormat {
    Compact,
    Terse,
    Final,
    Normal,
    Json,
}

impl From<OutputFormat> for OutputKind {
    fn from(v: OutputFormat) -> Self {
        match v {
            OutputFormat::Normal => OutputKind::Normal,
            OutputFormat::Compact => OutputKind::Compact,
            OutputFormat::Terse => OutputKind::Terse,
            OutputFormat::Final => OutputKind::Final,
            OutputFormat::Json => OutputKind::Json,
        }
    }
}

#[derive(Parser, Debug, Clone)]
#[command(version, author, about = t!("cli-about"))]
struct Cli {
    // ORACLE_PATHS: structure oracle files or directories (test.json, *.yaml)
    #[arg(value_name = "ORACLE_PATHS", required = true)]
    oracle: Vec<PathBuf>,

    // Class descriptors of the submission
    #[arg(
        short = 'd',
        long = "classes",
        value_name = "PATH",
        required = true,
        visible_alias = "descriptors",
        help = t!("cli-classes")
    )]
    classes: Vec<PathBuf>,

    #[arg(short = 'q', long = "silent", help = t!("cli-silent"))]
    silent: bool,

    #[arg(short = 'c', long = "color", alias = "colour", help = t!("cli-color"))]
    color: bool,

    #[arg(long = "no-color", help = t!("cli-no-color"))]
    no_color: bool,

    #[arg(short = 'v', long = "verbose", help = t!("cli-verbose"))]
    verbose: bool,

    #[arg(
        short = 'f',
        long = "hide-fails",
        conflicts_with = "hide_passes",
        help = t!("cli-hide-fails")
    )]
    hide_fails: bool,

    #[arg(
        short = 'p',
        long = "hide-passes",
        conflicts_with = "hide_fails",
        help = t!("cli-hide-passes")
    )]
    hide_passes: bool,

    // -t/--test: number (1..N) or class name. 0 / null / list lists all units and exits.
    #[arg(short = 't', long = "test", value_name = "TEST", help = t!("cli-test"))]
    test: Option<String>,

    #[arg(
        short = 'o',
        long = "output",
        value_enum,
        default_value = "normal",
        help = t!("cli-output")
    )]
    output: OutputFormat,

    // Serial execution (opt-out of default parallel processing)
    #[arg(long = "serial", help = t!("cli-serial"))]
    use_serial: bool,
}

impl Cli {
    /// Colors: default on, --no-color turns off, --color forces on. Applies
    /// to log lines and the report alike.
    fn use_color(&self) -> bool {
        self.color || !self.no_color
    }
}

/// Format CLI flags to be bold using regex matching
fn format_flags_bold(text: &str) -> String {
    let Ok(flag_regex) = Regex::new(r"(?m)^(\s*)(--?\w+(?:-\w+[^<\n]*)*)") else {
        return text.to_string();
    };
    flag_regex
        .replace_all(text, |caps: &regex::Captures| {
            format!("{}{}", &caps[1], caps[2].bold())
        })
        .to_string()
}

/// Localize the section labels clap prints in help and error output.
fn localize_clap_text(text: &str) -> String {
    let mut out = text.to_string();
    out = out.replace("Usage:", &t!("cli-usage").bold().underline().to_string());
    out = out.replace("Arguments:", &t!("cli-help-arguments").bold().underline().to_string());
    out = out.replace("Options:", &t!("cli-help-options").bold().underline().to_string());
    out = out.replace("[default:", &format!("[{}:", t!("cli-help-default")));
    out = out.replace("[aliases:", &format!("[{}:", t!("cli-help-aliases")));
    out = out.replace("[possible values:", &format!("[{}:", t!("cli-help-possible-values")));
    out = out.replace("Print help", &t!("cli-help-print-help"));
    out = out.replace("Print version", &t!("cli-help-print-version"));
    out = out.replace("error:", &t!("cli-error-label").red().bold().to_string());
    out = out.replace("For more information, try '--help'.", &t!("cli-error-help-info"));
    out = out.replace("structure-oracle", &"structure-oracle".bold().to_string());
    format_flags_bold(&out)
}

fn parse_cli() -> Cli {
    match Cli::try_parse() {
        Ok(cli) => cli,
        Err(error) => match error.kind() {
            ErrorKind::DisplayHelp => {
                let help = Cli::command().render_long_help().to_string();
                println!("{}", localize_clap_text(&help));
                std::process::exit(0);
            }
            ErrorKind::DisplayVersion => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            _ => {
                eprintln!("{}", localize_clap_text(&error.to_string()));
                std::process::exit(2);
            }
        },
    }
}

fn list_units(units: &[VerificationUnit]) -> Vec<String> {
    units
        .iter()
        .enumerate()
        .map(|(idx, u)| {
            t_args!("test-list-item",
                "index" => (idx + 1),
                "class" => &u.expected.identity,
                "name" => &u.name
            )
        })
        .collect()
}

/// Narrows `units` to the selection given with `-t`. `Ok(None)` means the
/// selection only asked for the list.
fn select_units(
    units: Vec<VerificationUnit>,
    selection: &str,
) -> Result<Option<Vec<VerificationUnit>>, String> {
    let trimmed = selection.trim();
    if trimmed == "0" || trimmed.eq_ignore_ascii_case("null") || trimmed.eq_ignore_ascii_case("list")
    {
        println!("{}", t!("available-tests"));
        for line in list_units(&units) {
            println!("{line}");
        }
        return Ok(None);
    }
    if let Ok(n) = trimmed.parse::<usize>() {
        if n == 0 || n > units.len() {
            return Err(t_args!("error-invalid-test-number", "number" => n, "max" => units.len()));
        }
        return Ok(Some(vec![units[n - 1].clone()]));
    }
    let selected: Vec<VerificationUnit> = units
        .iter()
        .filter(|u| {
            u.name == trimmed
                || u.expected.identity.name == trimmed
                || u.expected.identity.qualified_name() == trimmed
        })
        .cloned()
        .collect();
    if selected.is_empty() {
        return Err(t_args!("error-test-not-found", "test" => trimmed));
    }
    Ok(Some(selected))
}

fn main() -> Result<()> {
    // Initialize localization first
    i18n::init();

    let cli = parse_cli();

    let filter = if cli.verbose {
        // With -v, show INFO and above, but allow RUST_LOG to override for debug/trace
        std::env::var("RUST_LOG").unwrap_or_else(|_| "structure_oracle=info".to_string())
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "structure_oracle=warn".to_string())
    };
    let use_color = cli.use_color();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(use_color)
        .init();
    set_color_override(use_color);

    // Unreadable or malformed inputs are configuration errors, not failed units
    let oracle = match load_oracle(&cli.oracle) {
        Ok(oracle) => oracle,
        Err(e) => {
            error!("{e:#}");
            std::process::exit(2);
        }
    };
    let units = match generate_units(oracle.as_ref()) {
        Ok(units) => units,
        Err(e) => {
            error!("{e}");
            std::process::exit(2);
        }
    };

    let units = match &cli.test {
        Some(selection) => match select_units(units, selection) {
            Ok(Some(selected)) => selected,
            Ok(None) => return Ok(()),
            Err(msg) => {
                error!("{msg}");
                std::process::exit(2);
            }
        },
        None => units,
    };

    let introspector = match DescriptorIntrospector::load(&cli.classes) {
        Ok(introspector) => introspector,
        Err(e) => {
            error!("{e:#}");
            std::process::exit(2);
        }
    };
    if introspector.is_empty() {
        warn!("{}", t!("warn-no-descriptors"));
    }
    if cli.verbose && !cli.silent {
        info!(
            "{}",
            t_args!("info-version",
                "name" => env!("CARGO_PKG_NAME"),
                "version" => env!("CARGO_PKG_VERSION")
            )
        );
        info!(
            "{}",
            t_args!("info-starting",
                "units" => units.len(),
                "classes" => introspector.len()
            )
        );
    }

    let summary = run_units(&introspector, &units, cli.use_serial);

    if cli.verbose && !cli.silent {
        info!(
            "{}",
            t_args!("info-all-finished",
                "total" => summary.total,
                "passed" => summary.passed,
                "failed" => summary.failed
            )
        );
    }

    if !cli.silent {
        print_human(&summary, cli.hide_fails, cli.hide_passes, cli.output.into())?;
    }

    if summary.failed > 0 {
        std::process::exit(1);
    }

    Ok(())
}
