use std::process;
use std::time::Duration;

use seating::config::table_count;
use seating::{Cafe, CafeConfig, JsonSink, SeatingError, ServiceTime, TextSink, logging};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Text,
    Json,
}

#[derive(Debug, Default)]
struct CliArgs {
    tables: Option<i64>,
    seed: Option<u64>,
    min_secs: Option<u64>,
    max_secs: Option<u64>,
    poll_ms: Option<u64>,
    format: Option<Format>,
    names: Vec<String>,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();

    let cli = match parse_args(&args) {
        Ok(v) => v,
        Err(msg) => {
            if !msg.is_empty() {
                eprintln!("error: {msg}");
                eprintln!();
            }
            print_usage();
            process::exit(2);
        }
    };

    logging::init_tracing();

    let format = cli.format.unwrap_or(Format::Text);
    let config = match build_config(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    };

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            eprintln!("error: failed to start runtime: {e}");
            process::exit(1);
        }
    };

    runtime.block_on(run(config, format));
}

fn print_usage() {
    eprintln!("Usage: seating [options] [NAME ...]");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  [NAME ...]          Guest names in arrival order [default: the twelve classic guests]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --tables <n>        Number of tables, 0 or less for none [default: 5]");
    eprintln!("  --seed <n>          Seed for service-time draws [default: random]");
    eprintln!("  --min-secs <n>      Shortest visit in seconds [default: 3]");
    eprintln!("  --max-secs <n>      Longest visit in seconds [default: 10]");
    eprintln!("  --poll-ms <n>       Delay between reclamation passes [default: 100]");
    eprintln!("  --format <fmt>      Event output: text or json [default: text]");
    eprintln!();
    eprintln!("Environment: SEATING_TABLES, SEATING_SEED, SEATING_MIN_SECS, SEATING_MAX_SECS,");
    eprintln!("SEATING_POLL_MS, SEATING_LOG, LOG_FORMAT, RUST_LOG");
}

fn parse_args(args: &[String]) -> Result<CliArgs, String> {
    let mut cli = CliArgs::default();

    let mut i = 1; // skip argv[0]
    while i < args.len() {
        match args[i].as_str() {
            "--tables" => {
                i += 1;
                cli.tables = Some(parse_value(args, i, "--tables")?);
            }
            "--seed" => {
                i += 1;
                cli.seed = Some(parse_value(args, i, "--seed")?);
            }
            "--min-secs" => {
                i += 1;
                cli.min_secs = Some(parse_value(args, i, "--min-secs")?);
            }
            "--max-secs" => {
                i += 1;
                cli.max_secs = Some(parse_value(args, i, "--max-secs")?);
            }
            "--poll-ms" => {
                i += 1;
                cli.poll_ms = Some(parse_value(args, i, "--poll-ms")?);
            }
            "--format" => {
                i += 1;
                cli.format = Some(match args.get(i).map(String::as_str) {
                    Some("text") => Format::Text,
                    Some("json") => Format::Json,
                    Some(other) => {
                        return Err(format!(
                            "invalid format '{other}', expected 'text' or 'json'"
                        ));
                    }
                    None => return Err("--format requires a value".to_string()),
                });
            }
            "--help" | "-h" => return Err(String::new()),
            arg if arg.starts_with('-') => return Err(format!("unknown flag: {arg}")),
            name => cli.names.push(name.to_string()),
        }
        i += 1;
    }

    Ok(cli)
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> Result<T, String> {
    let raw = args.get(i).ok_or(format!("{flag} requires a value"))?;
    raw.parse()
        .map_err(|_| format!("invalid value for {flag}: '{raw}'"))
}

/// Environment first, then command-line flags on top.
fn build_config(cli: CliArgs) -> Result<CafeConfig, SeatingError> {
    let mut config = CafeConfig::from_env()?;

    if let Some(count) = cli.tables {
        config.tables = table_count(count);
    }
    if cli.min_secs.is_some() || cli.max_secs.is_some() {
        config.service_time = ServiceTime::new(
            cli.min_secs.unwrap_or(config.service_time.min_secs()),
            cli.max_secs.unwrap_or(config.service_time.max_secs()),
        )?;
    }
    if let Some(ms) = cli.poll_ms {
        config.poll_interval = Duration::from_millis(ms);
    }
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if !cli.names.is_empty() {
        config.guests = cli.names;
    }

    config.validate()?;
    Ok(config)
}

async fn run(config: CafeConfig, format: Format) {
    let mut rng = config.rng();
    let guests = config.build_guests(&mut rng);

    let mut cafe = match format {
        Format::Text => Cafe::from_config(&config, TextSink),
        Format::Json => Cafe::from_config(&config, JsonSink),
    };

    tracing::debug!(
        tables = config.tables,
        guests = guests.len(),
        min_secs = config.service_time.min_secs(),
        max_secs = config.service_time.max_secs(),
        seed = ?config.seed,
        "Opening cafe"
    );

    let summary = cafe.serve(guests).await;

    tracing::info!(
        seated = summary.seated,
        queued = summary.queued,
        promoted = summary.promoted,
        departed = summary.departed,
        waiting = summary.waiting,
        elapsed = ?summary.elapsed,
        "Cafe closed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(rest: &[&str]) -> Vec<String> {
        std::iter::once("seating")
            .chain(rest.iter().copied())
            .map(String::from)
            .collect()
    }

    #[test]
    fn parses_flags_and_names() {
        let cli = parse_args(&argv(&[
            "--tables", "3", "--seed", "7", "--format", "json", "Ann", "Bob",
        ]))
        .unwrap();
        assert_eq!(cli.tables, Some(3));
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.format, Some(Format::Json));
        assert_eq!(cli.names, vec!["Ann", "Bob"]);
    }

    #[test]
    fn negative_tables_value_is_not_a_flag() {
        let cli = parse_args(&argv(&["--tables", "-2", "Ann"])).unwrap();
        assert_eq!(cli.tables, Some(-2));
        assert_eq!(cli.names, vec!["Ann"]);
    }

    #[test]
    fn missing_value_is_an_error() {
        let err = parse_args(&argv(&["--tables"])).unwrap_err();
        assert_eq!(err, "--tables requires a value");
    }

    #[test]
    fn bad_number_is_an_error() {
        let err = parse_args(&argv(&["--poll-ms", "soon"])).unwrap_err();
        assert_eq!(err, "invalid value for --poll-ms: 'soon'");
    }

    #[test]
    fn unknown_flag_is_an_error() {
        let err = parse_args(&argv(&["--fast"])).unwrap_err();
        assert_eq!(err, "unknown flag: --fast");
    }

    #[test]
    fn help_yields_empty_message() {
        assert_eq!(parse_args(&argv(&["-h"])).unwrap_err(), "");
    }
}
