use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use indexmap::IndexMap;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use nestseek::config::Config;
use nestseek::document::node::{Key, Value};
use nestseek::document::parser::{parse_yaml, to_json_value, to_yaml_string};
use nestseek::file::loader::{load_file, load_from_stdin};
use nestseek::search::{Finder, Found, Match};

/// nestseek - search nested YAML/JSON documents by key and value
#[derive(Parser)]
#[command(name = "nestseek")]
#[command(version)]
#[command(about = "Search nested YAML/JSON documents by key and value", long_about = None)]
struct Cli {
    /// Document to search (omit to read from piped stdin)
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Report only the first match
    #[arg(long)]
    first: bool,

    /// Stop after this many matches (0 for no limit)
    #[arg(short, long)]
    limit: Option<usize>,

    /// Output format
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Print match paths only, one per line
    #[arg(long)]
    paths_only: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Pairs whose key equals KEY; reports the value under the key
    Keys { key: String },
    /// Pairs whose value equals VALUE; reports the holding container
    Values { value: String },
    /// Pairs matching both KEY and VALUE; reports the holding container
    Keyvalues { key: String, value: String },
    /// Pairs where TARGET is the key or the value; reports the holding container
    Any { target: String },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum OutputFormat {
    Yaml,
    Json,
}

fn init_logging(config: &Config) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(io::stderr))
        .init();
}

/// Command-line targets are YAML scalars: `5` is a number, `'5'` a string.
fn parse_target(text: &str) -> Result<Value> {
    parse_yaml(text).with_context(|| format!("Invalid target {:?}", text))
}

fn parse_key(text: &str) -> Result<Key> {
    match Key::from_value(&parse_target(text)?) {
        Some(key) => Ok(key),
        None => bail!("Key {:?} must be a scalar", text),
    }
}

/// Pulls at most `limit` items (0 for all); the search stops with the last one.
fn take_limited<T>(items: impl Iterator<Item = T>, limit: usize) -> Vec<T> {
    if limit == 0 {
        items.collect()
    } else {
        items.take(limit).collect()
    }
}

fn run_query<'a>(
    finder: Finder<'a>,
    command: &Command,
    first: bool,
    limit: usize,
) -> Result<Vec<Found<&'a Value>>> {
    let by_value = |m: Match<'a>| Found {
        value: m.value,
        path: m.path,
    };
    let by_container = |m: Match<'a>| Found {
        value: m.container,
        path: m.path,
    };

    let found = match command {
        Command::Keys { key } => {
            let key = parse_key(key)?;
            if first {
                finder.find_key(key).into_iter().collect()
            } else {
                take_limited(finder.find_keys(key).map(by_value), limit)
            }
        }
        Command::Values { value } => {
            let value = parse_target(value)?;
            if first {
                finder.find_value(value).into_iter().collect()
            } else {
                take_limited(finder.find_values(value).map(by_container), limit)
            }
        }
        Command::Keyvalues { key, value } => {
            let key = parse_key(key)?;
            let value = parse_target(value)?;
            if first {
                finder.find_keyvalue(key, value).into_iter().collect()
            } else {
                take_limited(finder.find_keyvalues(key, value).map(by_container), limit)
            }
        }
        Command::Any { target } => {
            let matches = finder
                .find_any_keyvalues(parse_target(target)?)
                .map(by_container);
            take_limited(matches, if first { 1 } else { limit })
        }
    };

    Ok(found)
}

fn render(found: &[Found<&Value>], format: OutputFormat) -> Result<String> {
    let report = Value::Sequence(
        found
            .iter()
            .map(|f| {
                let mut entry = IndexMap::new();
                entry.insert(Key::from("path"), Value::from(f.path.as_str()));
                entry.insert(Key::from("value"), f.value.clone());
                Value::Mapping(entry)
            })
            .collect(),
    );

    match format {
        OutputFormat::Yaml => to_yaml_string(&report),
        OutputFormat::Json => {
            let mut text = serde_json::to_string_pretty(&to_json_value(&report))?;
            text.push('\n');
            Ok(text)
        }
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let (config, config_error) = match Config::load() {
        Ok(config) => (config, None),
        Err(err) => (Config::default(), Some(err)),
    };
    init_logging(&config);
    if let Some(err) = config_error {
        tracing::warn!("{:#}, using defaults", err);
    }

    let tree = match &cli.file {
        Some(path) => load_file(path)?,
        None if !io::stdin().is_terminal() => load_from_stdin()?,
        None => bail!("No input: pass --file or pipe a document on stdin"),
    };

    // CLI flags override config values
    let limit = cli.limit.unwrap_or(config.max_results);
    let found = run_query(tree.finder(), &cli.command, cli.first, limit)?;
    tracing::debug!(matches = found.len(), "query finished");

    if cli.paths_only {
        for f in &found {
            println!("{}", f.path);
        }
    } else {
        let format = cli.format.unwrap_or(match config.output_format.as_str() {
            "json" => OutputFormat::Json,
            _ => OutputFormat::Yaml,
        });
        print!("{}", render(&found, format)?);
    }

    Ok(ExitCode::from(exit_status(&found)))
}

/// 0 when anything matched, 1 otherwise.
fn exit_status(found: &[Found<&Value>]) -> u8 {
    if found.is_empty() {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = "a: 1\nb: {c: 2, d: [3, 4, {e: 5}]}\nf: [6, 7, {g: 8}]\nids: {'5': text, 5: number}\n";

    fn doc() -> Value {
        parse_yaml(DOC).unwrap()
    }

    fn keys(key: &str) -> Command {
        Command::Keys {
            key: key.to_string(),
        }
    }

    fn values(value: &str) -> Command {
        Command::Values {
            value: value.to_string(),
        }
    }

    fn paths(found: &[Found<&Value>]) -> Vec<String> {
        found.iter().map(|f| f.path.clone()).collect()
    }

    #[test]
    fn test_targets_parse_as_yaml_scalars() {
        assert_eq!(parse_target("5").unwrap(), Value::from(5));
        assert_eq!(parse_target("'5'").unwrap(), Value::from("5"));
        assert_eq!(parse_target("true").unwrap(), Value::from(true));
        assert_eq!(parse_key("5").unwrap(), Key::from(5));
        assert_eq!(parse_key("'5'").unwrap(), Key::from("5"));
        assert!(parse_key("[1, 2]").is_err());
    }

    #[test]
    fn test_quoted_key_selects_string_key() {
        let d = doc();
        let finder = Finder::new(&d);

        let found = run_query(finder, &keys("'5'"), true, 0).unwrap();
        assert_eq!(found[0].value, &Value::from("text"));

        let found = run_query(finder, &keys("5"), true, 0).unwrap();
        assert_eq!(found[0].value, &Value::from("number"));
    }

    #[test]
    fn test_first_keys_reports_value_others_container() {
        let d = doc();
        let finder = Finder::new(&d);

        let found = run_query(finder, &keys("c"), true, 0).unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].value, &Value::from(2));
        assert_eq!(found[0].path, "['b']['c']");

        let found = run_query(finder, &values("5"), true, 0).unwrap();
        assert_eq!(found[0].value, &parse_yaml("{e: 5}").unwrap());

        let pair = Command::Keyvalues {
            key: "g".to_string(),
            value: "8".to_string(),
        };
        let found = run_query(finder, &pair, true, 0).unwrap();
        assert_eq!(found[0].value, &parse_yaml("{g: 8}").unwrap());
        assert_eq!(found[0].path, "['f'][2]['g']");
    }

    #[test]
    fn test_any_first_stops_after_one() {
        let d = doc();
        let any = Command::Any {
            target: "2".to_string(),
        };

        let all = run_query(Finder::new(&d), &any, false, 0).unwrap();
        assert!(all.len() > 1);

        let first = run_query(Finder::new(&d), &any, true, 0).unwrap();
        assert_eq!(paths(&first), vec![all[0].path.clone()]);
    }

    #[test]
    fn test_limit_caps_results() {
        let d = doc();
        let finder = Finder::new(&d);
        let any = Command::Any {
            target: "2".to_string(),
        };

        let unlimited = run_query(finder, &any, false, 0).unwrap();
        assert_eq!(paths(&unlimited), vec!["['b']['c']", "['b']['d'][2]", "['f'][2]"]);

        let limited = run_query(finder, &any, false, 2).unwrap();
        assert_eq!(paths(&limited), vec!["['b']['c']", "['b']['d'][2]"]);

        assert_eq!(run_query(finder, &values("4"), false, 5).unwrap().len(), 1);
    }

    #[test]
    fn test_take_limited() {
        assert_eq!(take_limited(1..=5, 0), vec![1, 2, 3, 4, 5]);
        assert_eq!(take_limited(1..=5, 2), vec![1, 2]);
        assert_eq!(take_limited(1..=2, 10), vec![1, 2]);
    }

    #[test]
    fn test_exit_status_reflects_matches() {
        let d = doc();
        let finder = Finder::new(&d);

        let none = run_query(finder, &keys("missing"), false, 0).unwrap();
        assert_eq!(exit_status(&none), 1);

        let some = run_query(finder, &keys("a"), false, 0).unwrap();
        assert_eq!(exit_status(&some), 0);
    }

    #[test]
    fn test_render_formats() {
        let d = doc();
        let found = run_query(Finder::new(&d), &keys("c"), false, 0).unwrap();

        let yaml = render(&found, OutputFormat::Yaml).unwrap();
        assert_eq!(
            parse_yaml(&yaml).unwrap(),
            parse_yaml("[{path: \"['b']['c']\", value: 2}]").unwrap()
        );

        let json = render(&found, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, serde_json::json!([{"path": "['b']['c']", "value": 2}]));
    }
}
