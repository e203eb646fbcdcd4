//! Entry point for the `crime-report` binary
//!
//! Loads the dataset once, computes a single page payload and prints it as
//! JSON, which makes the engine usable from scripts without the webserver.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;

use engine::{CsvDatasetSource, DashboardEngine, Dataset};
use shared::{ColorScale, FilterState, MapMetric, MapSelection, Page, ProcessId, RegionSelection, RegionTable, logging, process_debug};

/// Print one dashboard page as JSON
#[derive(Parser, Debug)]
#[command(name = "crime-report")]
#[command(about = "Computes a crime dashboard page from the Communities and Crime dataset")]
pub struct Args {
    /// Path to the headerless communities dataset
    #[arg(long, default_value = "communities_crime.data")]
    pub data: PathBuf,

    /// Page to compute (overview, map)
    #[arg(long, default_value = "overview")]
    pub page: Page,

    /// Region filter: "all" or a numeric state code
    #[arg(long, default_value = "all")]
    pub region: RegionSelection,

    /// Lower crime-rate bound (defaults to the dataset minimum)
    #[arg(long)]
    pub low: Option<f64>,

    /// Upper crime-rate bound (defaults to the dataset maximum)
    #[arg(long)]
    pub high: Option<f64>,

    /// Map metric (crimeMean, crimeMedian, count)
    #[arg(long, default_value = "crimeMean")]
    pub metric: MapMetric,

    /// Map colour scale (Reds, Blues, Viridis, Plasma)
    #[arg(long, default_value = "Reds")]
    pub color_scale: ColorScale,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Filter state from the flags, filling missing bounds from the dataset
    fn filter_state(&self, dataset: &Dataset) -> FilterState {
        let full = dataset.initial_filter().crime_range;
        FilterState::new(
            self.region,
            self.low.unwrap_or(full.low),
            self.high.unwrap_or(full.high),
        )
    }
}

fn to_json<T: serde::Serialize>(value: &T, pretty: bool) -> serde_json::Result<String> {
    if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    ProcessId::init_report();
    logging::init_tracing_with_level(Some(&args.log_level));
    logging::log_startup(ProcessId::current(), "crime report");

    let source = CsvDatasetSource::new(&args.data);
    let dataset = Dataset::from_source(&source, RegionTable::us_states())
        .await
        .with_context(|| format!("failed to load dataset from {}", args.data.display()))?;
    let engine = DashboardEngine::new(Arc::new(dataset));

    let output = match args.page {
        Page::Overview => {
            let state = args.filter_state(engine.dataset());
            process_debug!(
                ProcessId::current(),
                "Computing overview for region {} in [{}, {}]",
                state.selected_region,
                state.crime_range.low,
                state.crime_range.high
            );
            let view = engine.overview(&state).context("invalid filter")?;
            to_json(&view, args.pretty)?
        }
        Page::Map => {
            let view = engine.map(MapSelection::new(args.metric, args.color_scale));
            to_json(&view, args.pretty)?
        }
    };

    println!("{output}");
    logging::log_success(ProcessId::current(), &format!("{} page written", args.page));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{CommunityRecord, CrimeRange};

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["crime-report"]).unwrap();
        assert_eq!(args.page, Page::Overview);
        assert_eq!(args.region, RegionSelection::All);
        assert_eq!(args.metric, MapMetric::CrimeMean);
        assert_eq!(args.color_scale, ColorScale::Reds);
        assert!(!args.pretty);
    }

    #[test]
    fn test_rejects_unknown_metric() {
        assert!(Args::try_parse_from(["crime-report", "--metric", "avg_income"]).is_err());
    }

    #[test]
    fn test_missing_bounds_come_from_dataset() {
        let dataset = Dataset::new(
            vec![CommunityRecord::new(6, 0.1), CommunityRecord::new(36, 0.7)],
            RegionTable::us_states(),
        );
        let args = Args::try_parse_from(["crime-report", "--region", "6", "--high", "0.4"]).unwrap();
        let state = args.filter_state(&dataset);
        assert_eq!(state.selected_region, RegionSelection::State(6));
        assert_eq!(state.crime_range, CrimeRange::new(0.1, 0.4));
    }
}
