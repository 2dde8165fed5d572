use std::time::Duration;

use studymeter_core::{
    truncate_display, AggregationObserver, AggregationReport, DurationAggregator, DurationLookup,
    ItemOutcome,
};
use studymeter_video::{read_reference_list, WatchPage, YtDlp};

use crate::cli::{Provider, WatchtimeArgs};

const URL_DISPLAY_CHARS: usize = 60;

/// Prints one progress line before and one outcome line after each lookup
struct ConsoleProgress;

impl AggregationObserver for ConsoleProgress {
    fn started(&mut self, index: usize, total: usize, input: &str) {
        println!(
            "[{}/{}] Processing: {}",
            index + 1,
            total,
            truncate_display(input, URL_DISPLAY_CHARS)
        );
    }

    fn finished(&mut self, _index: usize, outcome: &ItemOutcome) {
        println!("{}", outcome);
    }
}

pub fn run(args: &WatchtimeArgs) -> anyhow::Result<()> {
    let urls = read_reference_list(&args.csv)?;

    println!("\nProcessing YouTube videos from {}\n", args.csv.display());
    println!("{}", "=".repeat(60));
    if !urls.is_empty() {
        println!("Found {} videos to process\n", urls.len());
    }

    let report = aggregate(&urls, build_lookup(args)?);

    println!("\n{}", "=".repeat(60));
    println!("\n{}\n", report.summary());
    Ok(())
}

fn build_lookup(args: &WatchtimeArgs) -> anyhow::Result<Box<dyn DurationLookup>> {
    Ok(match args.provider {
        Provider::YtDlp => Box::new(YtDlp::with_program(&args.yt_dlp)),
        Provider::WatchPage => Box::new(WatchPage::new(Duration::from_secs(args.timeout))?),
    })
}

fn aggregate(urls: &[String], lookup: Box<dyn DurationLookup>) -> AggregationReport {
    let report = DurationAggregator::new(lookup).run(urls, &mut ConsoleProgress);
    tracing::info!(
        attempted = report.totals.attempted,
        succeeded = report.totals.succeeded,
        skipped = report.totals.skipped,
        seconds = report.totals.total_seconds,
        "watch time aggregated"
    );
    report
}
