use anyhow::{Context, Result};
use clap::Parser;
use listcomplete::{Autocomplete, SortOrder, SourceSpec, VocabConfig, WordMatch};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(clap::Parser, Debug)]
#[command(name = "listcomplete")]
#[command(about = "Complete words harvested from listing exports")]
struct Args {
    /// TOML config with query options and sources
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Source as KIND=PATH (remax, combined, scraped, spreadsheet, zolo, custom).
    /// Replaces the configured sources; repeat for several files.
    #[arg(short, long = "source", value_parser = parse_source)]
    sources: Vec<SourceSpec>,

    /// Complete a single prefix and exit instead of prompting
    #[arg(short, long)]
    prefix: Option<String>,

    /// Maximum number of completions
    #[arg(short, long)]
    limit: Option<usize>,

    /// Result order: lexicographic (lex, alpha) or frequency (freq)
    #[arg(long, value_parser = parse_order, conflicts_with = "by_frequency")]
    order: Option<SortOrder>,

    /// Most frequent words first; shorthand for `--order frequency`
    #[arg(long)]
    by_frequency: bool,

    /// Print each word's frequency
    #[arg(long)]
    show_frequency: bool,

    /// Emit completions as JSON
    #[arg(long)]
    json: bool,

    /// Read sources on parallel threads
    #[arg(long)]
    parallel: bool,

    /// Log filter used when RUST_LOG is unset
    #[arg(long, default_value = "warn")]
    log_level: String,
}

fn parse_source(s: &str) -> Result<SourceSpec, String> {
    s.parse().map_err(|e: listcomplete::IngestError| e.to_string())
}

fn parse_order(s: &str) -> Result<SortOrder, String> {
    s.parse()
}

fn load_config(args: &Args) -> Result<VocabConfig> {
    let mut config = match &args.config {
        Some(path) => VocabConfig::load_toml(path)
            .map_err(|e| anyhow::anyhow!("Failed to load config {}: {}", path.display(), e))?,
        None => VocabConfig::default(),
    };

    if !args.sources.is_empty() {
        config.sources = args.sources.clone();
    }
    if let Some(limit) = args.limit {
        config.base.max_results = Some(limit);
    }
    if let Some(order) = args.order {
        config.base.order = order;
    }
    if args.by_frequency {
        config.base.order = SortOrder::Frequency;
    }
    if args.show_frequency {
        config.base.show_frequency = true;
    }
    if args.parallel {
        config.parallel = true;
    }
    Ok(config)
}

fn print_suggestions(
    out: &mut impl Write,
    matches: &[WordMatch],
    show_frequency: bool,
    json: bool,
) -> Result<()> {
    if json {
        serde_json::to_writer(&mut *out, matches).context("Failed to encode suggestions")?;
        writeln!(out)?;
        return Ok(());
    }
    writeln!(out, "Suggestions:")?;
    for m in matches {
        if show_frequency {
            writeln!(out, "{}\t{}", m.word, m.frequency)?;
        } else {
            writeln!(out, "{}", m.word)?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level)),
        )
        .init();

    let config = load_config(&args)?;
    let (autocomplete, report) = Autocomplete::from_config(&config);
    for failure in &report.failures {
        eprintln!("⚠ Skipped {}: {}", failure.path.display(), failure.reason);
    }
    tracing::info!(
        words = autocomplete.index().len(),
        inserted = report.words_inserted(),
        skipped_rows = report.records_skipped(),
        "vocabulary ready"
    );

    let show_frequency = autocomplete.config().show_frequency;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if let Some(prefix) = &args.prefix {
        let matches = autocomplete.suggestions(prefix);
        return print_suggestions(&mut out, &matches, show_frequency, args.json);
    }

    if !args.json {
        writeln!(out, "Enter a prefix to get word completions:")?;
        out.flush()?;
    }

    let stdin = io::stdin();
    for line in stdin.lock().lines() {
        let line = line.context("Failed to read prefix from stdin")?;
        let matches = autocomplete.suggestions(&line);
        print_suggestions(&mut out, &matches, show_frequency, args.json)?;
        out.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_config() {
        let args = Args::parse_from([
            "listcomplete",
            "--source",
            "zolo=z.csv",
            "--limit",
            "3",
            "--by-frequency",
            "--parallel",
        ]);
        let cfg = load_config(&args).unwrap();
        assert_eq!(cfg.sources.len(), 1);
        assert_eq!(cfg.base.max_results, Some(3));
        assert_eq!(cfg.base.order, SortOrder::Frequency);
        assert!(cfg.parallel);
    }

    #[test]
    fn order_flag_overrides_config() {
        let args = Args::parse_from(["listcomplete", "--order", "freq"]);
        assert_eq!(load_config(&args).unwrap().base.order, SortOrder::Frequency);

        let args = Args::parse_from(["listcomplete", "--order", "Lexicographic"]);
        assert_eq!(load_config(&args).unwrap().base.order, SortOrder::Lexicographic);

        assert!(Args::try_parse_from(["listcomplete", "--order", "random"]).is_err());
        assert!(
            Args::try_parse_from(["listcomplete", "--order", "lex", "--by-frequency"]).is_err()
        );
    }

    #[test]
    fn bad_source_flag_is_rejected() {
        assert!(Args::try_parse_from(["listcomplete", "--source", "z.csv"]).is_err());
    }

    #[test]
    fn plain_output_one_word_per_line() {
        let mut buf = Vec::new();
        let matches = vec![WordMatch::new("road", 3), WordMatch::new("roadway", 1)];
        print_suggestions(&mut buf, &matches, true, false).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "Suggestions:\nroad\t3\nroadway\t1\n");
    }

    #[test]
    fn json_output() {
        let mut buf = Vec::new();
        print_suggestions(&mut buf, &[WordMatch::new("map", 1)], false, true).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "[{\"word\":\"map\",\"frequency\":1}]\n"
        );
    }
}
