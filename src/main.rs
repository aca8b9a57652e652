use chrono::NaiveDate;
use clap::{ArgAction, Parser};
use eyre::{Error, WrapErr};
use rollcall::config::Config;
use rollcall::display::{display_distribution, display_empty, display_registers, display_unmapped};
use rollcall::funds::{distribute, unmapped_programs};
use rollcall::loaders::{load_mapping, load_roster};
use rollcall::registers::build_registers;
use rollcall::semester::filter_for_semester;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::EnvFilter;

const DEFAULT_CONFIG: &str = "rollcall.toml";
const UNMAPPED_FILE: &str = "unknown_faks.txt";
const DISTRIBUTION_FILE: &str = "funds-distribution.json";

fn valid_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| format!("not a valid date: '{s}'. Use format: YYYY-MM-DD"))
}

#[derive(Parser)]
#[command(version, about)]
struct Options {
    /// Roster of enrolled students
    #[arg(long, value_name = "FILE")]
    students_csv: PathBuf,
    /// Mapping of programs to groups
    #[arg(long, value_name = "FILE")]
    mapping: PathBuf,
    /// Reference date (YYYY-MM-DD)
    #[arg(long, value_parser = valid_date)]
    date: NaiveDate,
    /// Use FILE instead of rollcall.toml
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Do not write result files
    #[arg(short = 'n', long)]
    dry_run: bool,
    /// Print every register entry
    #[arg(short, long)]
    details: bool,
    /// Increase verbosity (repeat for more)
    #[arg(short, action = ArgAction::Count)]
    verbose: u8,
    /// Directory receiving the result files
    output_directory: PathBuf,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "error",
        1 => "warn",
        2 => "info",
        3 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("rollcall={level}")));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(file_name: Option<&Path>) -> Result<Config, Error> {
    match file_name {
        Some(file_name) => Config::load(file_name),
        None if Path::new(DEFAULT_CONFIG).exists() => Config::load(Path::new(DEFAULT_CONFIG)),
        None => Ok(Config::default()),
    }
}

fn write_file(path: &Path, content: &str) -> Result<(), Error> {
    info!(path = %path.display(), "writing");
    fs::write(path, content).wrap_err_with(|| format!("cannot write {}", path.display()))
}

fn main() -> Result<(), Error> {
    color_eyre::install()?;
    let options = Options::parse();
    init_logging(options.verbose);
    let config = load_config(options.config.as_deref())?;
    let students = load_roster(&options.students_csv, config.delimiter())?;
    let mapping = load_mapping(&options.mapping, config.mapping.header_lines)?;
    let unmapped = unmapped_programs(&mapping, &students);
    let students = filter_for_semester(&students, options.date);
    let distribution = distribute(&mapping, &students);
    let registers = build_registers(&mapping, &students, options.date, &config.registers)?;
    if !options.dry_run {
        fs::create_dir_all(&options.output_directory).wrap_err_with(|| {
            format!("cannot create {}", options.output_directory.display())
        })?;
        write_file(
            &options.output_directory.join(UNMAPPED_FILE),
            &unmapped.join("\n"),
        )?;
        write_file(
            &options.output_directory.join(DISTRIBUTION_FILE),
            &distribution.to_json()?,
        )?;
    }
    display_registers(&registers, options.details);
    display_distribution(&distribution);
    display_unmapped(&unmapped);
    display_empty(&registers);
    Ok(())
}
