use std::path::{Path, PathBuf};

use crate::color::ColorMap;
use crate::data::export::write_filtered_csv;
use crate::data::filter::{FilterState, filtered_indices};
use crate::data::model::ZooDataset;
use crate::data::stats::DashboardView;

// ---------------------------------------------------------------------------
// Tabs and export feedback
// ---------------------------------------------------------------------------

/// Chart shown in the central tab strip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChartTab {
    #[default]
    Distribution,
    TopSpecies,
    SexComparison,
}

impl ChartTab {
    pub const ALL: [ChartTab; 3] = [
        ChartTab::Distribution,
        ChartTab::TopSpecies,
        ChartTab::SexComparison,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ChartTab::Distribution => "📈 Overall Distribution",
            ChartTab::TopSpecies => "🏆 Top Species",
            ChartTab::SexComparison => "⚥ Male vs Female Comparison",
        }
    }
}

/// Result of the last export, shown until the next one.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportStatus {
    Saved { path: PathBuf, rows: usize },
    Failed(String),
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    /// Dataset loaded once at startup.
    pub dataset: &'static ZooDataset,

    /// Class selection and name search.
    pub filters: FilterState,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Metrics and chart inputs for `visible_indices`.
    pub view: DashboardView,

    /// One colour per taxon class.
    pub color_map: ColorMap,

    pub active_tab: ChartTab,

    /// Fixed export destination.
    pub export_path: PathBuf,

    pub export_status: Option<ExportStatus>,
}

impl AppState {
    pub fn new(dataset: &'static ZooDataset, export_path: PathBuf) -> Self {
        let visible_indices: Vec<usize> = (0..dataset.len()).collect();
        let view = DashboardView::compute(dataset, &visible_indices);
        Self {
            dataset,
            filters: FilterState::default(),
            visible_indices,
            view,
            color_map: ColorMap::new(&dataset.taxon_classes),
            active_tab: ChartTab::default(),
            export_path,
            export_status: None,
        }
    }

    /// Recompute `visible_indices` and the derived view after a filter change.
    pub fn refilter(&mut self) {
        self.visible_indices = filtered_indices(self.dataset, &self.filters);
        self.view = DashboardView::compute(self.dataset, &self.visible_indices);
    }

    /// Select a class, or every class with `None`.
    pub fn set_taxon_class(&mut self, class: Option<String>) {
        if self.filters.taxon_class != class {
            self.filters.taxon_class = class;
            self.refilter();
        }
    }

    /// Replace the species name search.
    pub fn set_search(&mut self, search: &str) {
        if self.filters.search != search {
            self.filters.search = search.to_string();
            self.refilter();
        }
    }

    /// Write the filtered rows to the fixed export path.
    pub fn export_filtered(&mut self) {
        let path = self.export_path.clone();
        self.export_to(&path);
    }

    /// Write the filtered rows to `path` and record the outcome.
    pub fn export_to(&mut self, path: &Path) {
        self.export_status = Some(
            match write_filtered_csv(path, self.dataset, &self.visible_indices) {
                Ok(rows) => ExportStatus::Saved {
                    path: path.to_path_buf(),
                    rows,
                },
                Err(e) => {
                    log::error!("Export failed: {e}");
                    ExportStatus::Failed(e.to_string())
                }
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::tests::lion_and_flamingo;

    fn state_with(export_path: PathBuf) -> AppState {
        let dataset: &'static ZooDataset = Box::leak(Box::new(lion_and_flamingo()));
        AppState::new(dataset, export_path)
    }

    #[test]
    fn starts_unfiltered() {
        let state = state_with(PathBuf::from("unused.csv"));
        assert_eq!(state.visible_indices, vec![0, 1]);
        assert_eq!(state.view.metrics.distinct_species, 2);
        assert_eq!(state.view.sex_comparison, vec![0]);
    }

    #[test]
    fn filter_changes_recompute_the_view() {
        let mut state = state_with(PathBuf::from("unused.csv"));

        state.set_taxon_class(Some("Aves".into()));
        assert_eq!(state.visible_indices, vec![1]);
        assert!(state.view.sex_comparison.is_empty());

        state.set_search("lion");
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.view.metrics.average_label(), "NaN");

        state.set_taxon_class(None);
        assert_eq!(state.visible_indices, vec![0]);
        assert_eq!(state.view.top_species, vec![0]);
    }

    #[test]
    fn export_reports_success_and_failure() {
        let dir = tempfile::tempdir().unwrap();
        let good = dir.path().join("filtered_aza_mle.csv");
        let mut state = state_with(good.clone());

        state.export_filtered();
        assert_eq!(
            state.export_status,
            Some(ExportStatus::Saved {
                path: good,
                rows: 2
            })
        );

        state.export_to(&dir.path().join("nope").join("out.csv"));
        assert!(matches!(state.export_status, Some(ExportStatus::Failed(_))));
    }
}
