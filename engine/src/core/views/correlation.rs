//! Pairwise-complete Pearson correlation matrix

use shared::{Attribute, CommunityRecord, CorrelationMatrix};

use crate::core::stats;

/// Matrix over the fixed overview attribute set
pub fn correlation_matrix(subset: &[&CommunityRecord]) -> CorrelationMatrix {
    correlation_matrix_for(subset, &Attribute::CORRELATION_SET)
}

/// Each cell uses only records where both attributes are present.
///
/// The diagonal is exactly 1.0 when the attribute has at least two
/// observations with some variance, undefined otherwise. Only the upper
/// triangle is computed and mirrored so the matrix is exactly symmetric.
pub fn correlation_matrix_for(subset: &[&CommunityRecord], attributes: &[Attribute]) -> CorrelationMatrix {
    let n = attributes.len();
    let mut values = vec![vec![None; n]; n];

    for i in 0..n {
        for j in i..n {
            let (xs, ys) = complete_pairs(subset, attributes[i], attributes[j]);
            let cell = if i == j {
                stats::has_variance(&xs).then_some(1.0)
            } else {
                stats::pearson(&xs, &ys)
            };
            values[i][j] = cell;
            values[j][i] = cell;
        }
    }

    CorrelationMatrix {
        attributes: attributes.to_vec(),
        values,
    }
}

fn complete_pairs(subset: &[&CommunityRecord], a: Attribute, b: Attribute) -> (Vec<f64>, Vec<f64>) {
    subset
        .iter()
        .filter_map(|record| Some((record.value(a)?, record.value(b)?)))
        .unzip()
}
