use clap::{Arg, ArgAction, ArgGroup, Command};
use std::path::PathBuf;
use std::time::{Duration, Instant};
use workday_cards::config::{parse_requirement, DEFAULT_GROUPING_FIELD, DEFAULT_PRIMARY_KEY_FIELD};
use workday_cards::{logging, present, Config, FetchOptions, FilterState, Outcome, Schema, Source};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let matches = Command::new("cards")
        .about("Render a workday job sheet as printable cards")
        .arg(Arg::new("url").long("url").help("CSV export URL"))
        .arg(Arg::new("path").long("path").value_parser(clap::value_parser!(PathBuf)).help("CSV file on disk (.csv, .csv.gz, .csv.zst)"))
        .arg(Arg::new("sheet-id").long("sheet-id").help("Spreadsheet document id; exported as CSV"))
        .arg(Arg::new("gid").long("gid").value_parser(clap::value_parser!(u64)).default_value("0").help("Tab id used with --sheet-id"))
        .group(ArgGroup::new("source").args(["url", "path", "sheet-id"]).required(true))
        .arg(Arg::new("require").long("require").action(ArgAction::Append).help("Required column as \"Source Column=Label\"; replaces the default job schema"))
        .arg(Arg::new("work-day-column").long("work-day-column").help("Header of this season's \"which work day\" column, for the default job schema"))
        .arg(Arg::new("group-by").long("group-by").default_value(DEFAULT_GROUPING_FIELD))
        .arg(Arg::new("primary-key").long("primary-key").default_value(DEFAULT_PRIMARY_KEY_FIELD))
        .arg(Arg::new("filter").long("filter").help("Only show this group"))
        .arg(Arg::new("query").long("query").conflicts_with("filter").help("Page query string, e.g. \"?filter=Kitchen\""))
        .arg(Arg::new("output").long("output").short('o').value_parser(clap::value_parser!(PathBuf)).help("Write HTML here instead of stdout"))
        .arg(Arg::new("timeout").long("timeout").value_parser(clap::value_parser!(u64)).default_value("30").help("Fetch timeout in seconds"))
        .arg(Arg::new("max-bytes").long("max-bytes").value_parser(clap::value_parser!(usize)).help("Largest accepted sheet"))
        .arg(Arg::new("no-proxy").long("no-proxy").help("Ignore proxy environment variables").action(ArgAction::SetTrue))
        .arg(Arg::new("summary").long("summary").help("Print counts instead of HTML").action(ArgAction::SetTrue))
        .get_matches();

    logging::init();

    let source = if let Some(url) = matches.get_one::<String>("url") {
        Source::Url(url.clone())
    } else if let Some(path) = matches.get_one::<PathBuf>("path") {
        Source::Path(path.clone())
    } else {
        let id = matches
            .get_one::<String>("sheet-id")
            .ok_or_else(|| anyhow::anyhow!("provide --url, --path or --sheet-id"))?;
        let gid = matches.get_one::<u64>("gid").copied().unwrap_or(0);
        Source::google_sheet(id, gid)
    };

    let schema = match matches.get_many::<String>("require") {
        Some(specs) => specs
            .map(|s| parse_requirement(s))
            .collect::<Result<Schema, _>>()?,
        None => {
            let column = matches
                .get_one::<String>("work-day-column")
                .ok_or_else(|| anyhow::anyhow!("--work-day-column is needed unless --require is given"))?;
            Schema::workday(column.as_str())
        }
    };

    let mut fetch = FetchOptions::default();
    if let Some(secs) = matches.get_one::<u64>("timeout") {
        fetch.timeout = Duration::from_secs(*secs);
    }
    if let Some(max) = matches.get_one::<usize>("max-bytes") {
        fetch.max_bytes = *max;
    }
    fetch.use_proxy = !matches.get_flag("no-proxy");

    let mut config = Config::new(source, schema).with_fetch_options(fetch);
    if let Some(field) = matches.get_one::<String>("group-by") {
        config = config.with_grouping_field(field.as_str());
    }
    if let Some(field) = matches.get_one::<String>("primary-key") {
        config = config.with_primary_key_field(field.as_str());
    }

    let filter = match (matches.get_one::<String>("filter"), matches.get_one::<String>("query")) {
        (Some(value), _) => FilterState::new(Some(value.clone())),
        (None, Some(query)) => FilterState::from_query(query),
        (None, None) => FilterState::all(),
    };

    let start = Instant::now();
    let result = workday_cards::run(&config, &filter).await;
    let elapsed = start.elapsed().as_secs_f64();

    let outcome = match result {
        Ok(outcome) => outcome,
        Err(err) => {
            if !matches.get_flag("summary") {
                emit(matches.get_one::<PathBuf>("output"), &present::render_fatal(&err))?;
            }
            return Err(err.into());
        }
    };

    if matches.get_flag("summary") {
        print_summary(&config, &outcome, elapsed);
        return Ok(());
    }

    emit(
        matches.get_one::<PathBuf>("output"),
        &present::render_page(&outcome, &config, &filter),
    )
}

fn emit(output: Option<&PathBuf>, html: &str) -> anyhow::Result<()> {
    match output {
        Some(path) => std::fs::write(path, html)?,
        None => print!("{html}"),
    }
    Ok(())
}

fn print_summary(config: &Config, outcome: &Outcome, elapsed: f64) {
    println!(
        "source={} visible={} skipped={} warnings={}\nelapsed={:.2}s",
        config.source.describe(),
        outcome.visible.len(),
        outcome.skipped,
        outcome.errors.len(),
        elapsed
    );
    for (group, count) in outcome.groups.iter() {
        println!("  {group}: {count}");
    }
    for e in &outcome.errors {
        println!("  missing {} -> [{}]", e.label, e.missing.join(" & "));
    }
}
