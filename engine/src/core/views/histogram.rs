//! Equal-width histogram of the crime rate over the filtered subset
//!
//! Bins span `[min, max]` of the subset itself. Every bin is half-open
//! `[lower, upper)` except the last, which is closed on both ends so the
//! maximum is always counted.

use shared::{CommunityRecord, HISTOGRAM_BINS, Histogram, HistogramBin};

pub fn histogram(subset: &[&CommunityRecord]) -> Histogram {
    let values: Vec<f64> = subset.iter().map(|r| r.violent_crimes_per_pop).collect();
    histogram_of(&values, HISTOGRAM_BINS)
}

/// Bin arbitrary values into `bins` equal-width buckets
pub fn histogram_of(values: &[f64], bins: usize) -> Histogram {
    let bins = bins.max(1);
    let (min, max) = match bounds(values) {
        Some(bounds) => bounds,
        None => return zero_width(0.0, bins, 0),
    };

    // A single observation carries no spread to bin
    if values.len() < 2 {
        return zero_width(min, bins, 0);
    }

    if max <= min {
        // Identical values all land in the first bucket
        let mut histogram = zero_width(min, bins, values.len());
        histogram.bins[0].count = values.len();
        return histogram;
    }

    let width = (max - min) / bins as f64;
    let mut out: Vec<HistogramBin> = (0..bins)
        .map(|i| HistogramBin {
            lower: min + width * i as f64,
            upper: if i + 1 == bins { max } else { min + width * (i + 1) as f64 },
            count: 0,
        })
        .collect();

    for value in values {
        let index = bin_index(&out, *value, min, width);
        out[index].count += 1;
    }

    Histogram {
        bins: out,
        total: values.len(),
        degenerate: false,
    }
}

/// Bin whose reported `[lower, upper)` edges hold `value`
///
/// The division only gives a first guess; the stored edges have the final say
/// so a value sitting exactly on an edge counts in the bin that edge opens.
fn bin_index(bins: &[HistogramBin], value: f64, min: f64, width: f64) -> usize {
    let last = bins.len() - 1;
    let mut index = (((value - min) / width).floor() as usize).min(last);
    while index < last && value >= bins[index + 1].lower {
        index += 1;
    }
    while index > 0 && value < bins[index].lower {
        index -= 1;
    }
    index
}

fn bounds(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(values.iter().fold((first, first), |(lo, hi), v| (lo.min(*v), hi.max(*v))))
}

fn zero_width(at: f64, bins: usize, total: usize) -> Histogram {
    Histogram {
        bins: vec![
            HistogramBin {
                lower: at,
                upper: at,
                count: 0,
            };
            bins
        ],
        total,
        degenerate: true,
    }
}
