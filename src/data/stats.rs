use std::collections::HashSet;

use super::model::ZooDataset;

/// Bins in the overall MLE histogram.
pub const HISTOGRAM_BINS: usize = 30;
/// Rows shown in the top species chart.
pub const TOP_SPECIES: usize = 10;
/// Rows shown in the male/female comparison.
pub const SEX_COMPARISON_ROWS: usize = 20;

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SummaryMetrics {
    /// Distinct non-missing common names.
    pub distinct_species: usize,
    /// Mean overall MLE; NaN for an empty selection.
    pub average_overall_mle: f64,
}

impl SummaryMetrics {
    pub fn compute(dataset: &ZooDataset, indices: &[usize]) -> Self {
        let distinct_species = indices
            .iter()
            .filter_map(|&i| dataset.records[i].common_name.as_deref())
            .collect::<HashSet<_>>()
            .len();

        let total: f64 = indices.iter().map(|&i| dataset.records[i].overall_mle).sum();
        let average_overall_mle = if indices.is_empty() {
            f64::NAN
        } else {
            total / indices.len() as f64
        };

        SummaryMetrics {
            distinct_species,
            average_overall_mle,
        }
    }

    /// Mean formatted to two decimals (`NaN` when undefined).
    pub fn average_label(&self) -> String {
        format!("{:.2}", self.average_overall_mle)
    }
}

// ---------------------------------------------------------------------------
// Histogram
// ---------------------------------------------------------------------------

/// Counts for one `TaxonClass` (or the missing class).
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramSeries {
    pub taxon_class: Option<String>,
    pub counts: Vec<usize>,
}

/// Fixed-width histogram of overall MLE, split by class.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    /// `bins + 1` ascending edges; empty when there is no data.
    pub edges: Vec<f64>,
    pub series: Vec<HistogramSeries>,
}

impl Histogram {
    /// Bin the selected records over their observed range. The last bin is
    /// closed on the right; a zero-width range is widened by 0.5 each side.
    pub fn build(dataset: &ZooDataset, indices: &[usize], bins: usize) -> Self {
        if indices.is_empty() || bins == 0 {
            return Histogram {
                edges: Vec::new(),
                series: Vec::new(),
            };
        }

        let values = indices.iter().map(|&i| dataset.records[i].overall_mle);
        let (mut lo, mut hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }
        let width = (hi - lo) / bins as f64;
        let mut edges: Vec<f64> = (0..=bins).map(|i| lo + width * i as f64).collect();
        edges[bins] = hi;

        // Known classes first, in dataset order, then the missing class.
        let mut series: Vec<HistogramSeries> = dataset
            .taxon_classes
            .iter()
            .map(|c| HistogramSeries {
                taxon_class: Some(c.clone()),
                counts: vec![0; bins],
            })
            .collect();
        series.push(HistogramSeries {
            taxon_class: None,
            counts: vec![0; bins],
        });

        for &i in indices {
            let rec = &dataset.records[i];
            let bin = (((rec.overall_mle - lo) / width) as usize).min(bins - 1);
            let slot = match &rec.taxon_class {
                Some(class) => dataset
                    .taxon_classes
                    .iter()
                    .position(|c| c == class)
                    .unwrap_or(series.len() - 1),
                None => series.len() - 1,
            };
            series[slot].counts[bin] += 1;
        }

        series.retain(|s| s.counts.iter().any(|&c| c > 0));
        Histogram { edges, series }
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// Width of a single bin.
    pub fn bin_width(&self) -> f64 {
        match self.edges.as_slice() {
            [first, second, ..] => second - first,
            _ => 0.0,
        }
    }

    /// Midpoint of each bin.
    pub fn centers(&self) -> Vec<f64> {
        self.edges.windows(2).map(|w| (w[0] + w[1]) / 2.0).collect()
    }
}

// ---------------------------------------------------------------------------
// Derived row selections
// ---------------------------------------------------------------------------

/// Selected rows sorted by overall MLE descending, ties in original order,
/// truncated to `limit`.
pub fn top_species(dataset: &ZooDataset, indices: &[usize], limit: usize) -> Vec<usize> {
    let mut sorted = indices.to_vec();
    sorted.sort_by(|&a, &b| {
        dataset.records[b]
            .overall_mle
            .total_cmp(&dataset.records[a].overall_mle)
    });
    sorted.truncate(limit);
    sorted
}

/// First `limit` selected rows carrying both male and female values.
pub fn sex_comparison(dataset: &ZooDataset, indices: &[usize], limit: usize) -> Vec<usize> {
    indices
        .iter()
        .copied()
        .filter(|&i| dataset.records[i].sex_pair().is_some())
        .take(limit)
        .collect()
}

// ---------------------------------------------------------------------------
// DashboardView – everything the charts need for one filter state
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub metrics: SummaryMetrics,
    pub histogram: Histogram,
    pub top_species: Vec<usize>,
    pub sex_comparison: Vec<usize>,
}

impl DashboardView {
    pub fn compute(dataset: &ZooDataset, indices: &[usize]) -> Self {
        DashboardView {
            metrics: SummaryMetrics::compute(dataset, indices),
            histogram: Histogram::build(dataset, indices, HISTOGRAM_BINS),
            top_species: top_species(dataset, indices, TOP_SPECIES),
            sex_comparison: sex_comparison(dataset, indices, SEX_COMPARISON_ROWS),
        }
    }
}
