//! Choropleth and ranking datasets for the map page
//!
//! Both only consider aggregates that carry an abbreviation; the rest remain
//! in the statistics but cannot be placed on a map.

use shared::{ChoroplethEntry, MapMetric, MapSelection, MapViewSet, RANKING_LIMIT, RankingEntry, StateAggregate};

/// One entry per mappable aggregate, in aggregate order
pub fn choropleth(aggregates: &[StateAggregate], metric: MapMetric) -> Vec<ChoroplethEntry> {
    aggregates
        .iter()
        .filter_map(|aggregate| {
            let abbreviation = aggregate.state_abbreviation.clone()?;
            Some(ChoroplethEntry {
                state_code: aggregate.state_code,
                state_abbreviation: abbreviation,
                value: metric.value_of(aggregate),
                crime_mean: aggregate.crime_mean,
                count: aggregate.count,
                mean_income: aggregate.mean_income,
                mean_poverty_pct: aggregate.mean_poverty_pct,
            })
        })
        .collect()
}

/// Top `limit` mappable aggregates by descending metric value, ties by ascending code
pub fn ranking(aggregates: &[StateAggregate], metric: MapMetric, limit: usize) -> Vec<RankingEntry> {
    let mut candidates: Vec<(&StateAggregate, &str, f64)> = aggregates
        .iter()
        .filter_map(|a| Some((a, a.state_abbreviation.as_deref()?, metric.value_of(a))))
        .collect();

    candidates.sort_by(|x, y| y.2.total_cmp(&x.2).then(x.0.state_code.cmp(&y.0.state_code)));

    candidates
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, (aggregate, abbreviation, value))| RankingEntry {
            rank: i + 1,
            state_code: aggregate.state_code,
            state_abbreviation: abbreviation.to_string(),
            value,
        })
        .collect()
}

pub fn build_map_view_set(aggregates: &[StateAggregate], selection: MapSelection) -> MapViewSet {
    MapViewSet {
        metric: selection.metric,
        color_scale: selection.color_scale,
        choropleth_entries: choropleth(aggregates, selection.metric),
        ranking_entries: ranking(aggregates, selection.metric, RANKING_LIMIT),
    }
}
