mod debug_report;

use chrono::{Local, NaiveDateTime};
use gateboard::{Board, ConfigOverrides, FlightBatch};
use std::io::{self, IsTerminal, Read};
use std::path::PathBuf;

const REFERENCE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const DEBUG_ENV: &str = "GATEBOARD_DEBUG_RULES";

fn main() {
    init_logging();

    let config = match parse_args() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let overrides = match config.config_path.as_ref().map(ConfigOverrides::from_path).transpose() {
        Ok(overrides) => overrides,
        Err(err) => {
            eprintln!("error: failed to load configuration: {err}");
            std::process::exit(1);
        }
    };
    let mut board = match Board::new(overrides) {
        Ok(board) => board,
        Err(err) => {
            eprintln!("error: invalid configuration: {err}");
            std::process::exit(1);
        }
    };

    let batch = match read_flights(config.flights_path.as_ref()) {
        Ok(batch) => batch,
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    };

    let report = board.assign_verbose(batch);

    if config.json {
        match board.state().to_json_pretty() {
            Ok(json) => println!("{json}"),
            Err(err) => {
                eprintln!("error: failed to encode flights: {err}");
                std::process::exit(1);
            }
        }
        return;
    }

    debug_report::print_board(board.state(), config.reference_time, config.color);
    if config.trace {
        debug_report::print_trace(&report, config.color);
    }
}

struct CliConfig {
    config_path: Option<PathBuf>,
    flights_path: Option<PathBuf>,
    reference_time: NaiveDateTime,
    json: bool,
    trace: bool,
    color: bool,
}

fn parse_args() -> Result<CliConfig, String> {
    let mut config_path: Option<PathBuf> = None;
    let mut flights_path: Option<PathBuf> = None;
    let mut reference_time = Local::now().naive_local();
    let mut json = false;
    let mut trace = false;
    let mut color = io::stdout().is_terminal();
    let mut args = std::env::args().skip(1);

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            "-V" | "--version" => {
                println!("gateboard {}", env!("CARGO_PKG_VERSION"));
                std::process::exit(0);
            }
            "--color" => color = true,
            "--no-color" => color = false,
            "--json" => json = true,
            "--trace" => trace = true,
            "--reference" => {
                let value = args.next().ok_or_else(|| "error: --reference expects a value".to_string())?;
                reference_time = parse_reference(&value)?;
            }
            "--config" | "-c" => {
                let value = args.next().ok_or_else(|| "error: --config expects a path".to_string())?;
                set_once(&mut config_path, value, "--config")?;
            }
            "--flights" | "-f" => {
                let value = args.next().ok_or_else(|| "error: --flights expects a path".to_string())?;
                set_once(&mut flights_path, value, "--flights")?;
            }
            _ if arg.starts_with("--reference=") => {
                reference_time = parse_reference(arg.trim_start_matches("--reference="))?;
            }
            _ if arg.starts_with("--config=") => {
                set_once(&mut config_path, arg.trim_start_matches("--config=").to_string(), "--config")?;
            }
            _ if arg.starts_with("--flights=") => {
                set_once(&mut flights_path, arg.trim_start_matches("--flights=").to_string(), "--flights")?;
            }
            _ => return Err(format!("error: unknown option '{arg}'\n\n{}", help_text())),
        }
    }

    Ok(CliConfig { config_path, flights_path, reference_time, json, trace, color })
}

fn set_once(slot: &mut Option<PathBuf>, value: String, flag: &str) -> Result<(), String> {
    if slot.is_some() {
        return Err(format!("error: {flag} provided multiple times"));
    }
    *slot = Some(PathBuf::from(value));
    Ok(())
}

fn read_flights(path: Option<&PathBuf>) -> Result<FlightBatch, String> {
    let text = match path {
        Some(path) => std::fs::read_to_string(path)
            .map_err(|err| format!("error: failed to read {}: {err}", path.display()))?,
        None => {
            if io::stdin().is_terminal() {
                return Err(format!("error: no flights provided\n\n{}", help_text()));
            }
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer).map_err(|err| format!("error: failed to read stdin: {err}"))?;
            buffer
        }
    };
    FlightBatch::from_json_str(&text).map_err(|err| format!("error: invalid flight batch: {err}"))
}

fn parse_reference(value: &str) -> Result<NaiveDateTime, String> {
    NaiveDateTime::parse_from_str(value, REFERENCE_FORMAT)
        .map_err(|_| format!("error: invalid --reference '{value}' (expected YYYY-MM-DDTHH:MM:SS)"))
}

/// Route `log` records to stderr when the debug variable is set.
fn init_logging() {
    struct StderrLogger;

    impl log::Log for StderrLogger {
        fn enabled(&self, _metadata: &log::Metadata) -> bool {
            true
        }

        fn log(&self, record: &log::Record) {
            eprintln!("{:<5} {}", record.level(), record.args());
        }

        fn flush(&self) {}
    }

    static LOGGER: StderrLogger = StderrLogger;

    if std::env::var_os(DEBUG_ENV).is_some() && log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(log::LevelFilter::Trace);
    }
}

fn print_help() {
    println!("{}", help_text());
}

fn help_text() -> String {
    format!(
        "gateboard {version}

Assigns terminals and gates to a batch of flights and prints the board.

Usage:
  gateboard [OPTIONS] --flights <path>
  gateboard [OPTIONS] < flights.json

Options:
  -c, --config <path>        JSON configuration (terminals, gates, constraints).
                             Default: one terminal 'Main' with gate 'A'.
  -f, --flights <path>       JSON flight batch {{\"departures\": [..], \"arrivals\": [..]}}.
                             Read from stdin when omitted.
  --reference <timestamp>    Board time in YYYY-MM-DDTHH:MM:SS. Default: now.
  --json                     Print the assigned batch as JSON instead of the board.
  --trace                    Also print how each flight was placed.
  --color                    Force ANSI color output.
  --no-color                 Disable ANSI color output.
  -h, --help                 Show this help message.
  -V, --version              Print version information.

Environment:
  {debug_env}=1   Log range expansion and per-flight decisions to stderr.

Exit codes:
  0  Success.
  1  Invalid configuration.
  2  Invalid arguments or flight input.
",
        version = env!("CARGO_PKG_VERSION"),
        debug_env = DEBUG_ENV
    )
}
