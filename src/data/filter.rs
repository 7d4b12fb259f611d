use super::model::{Record, ZooDataset};

// ---------------------------------------------------------------------------
// Filter predicate: class selection + species name search
// ---------------------------------------------------------------------------

/// Active filters. `taxon_class: None` shows every class; an empty `search`
/// disables the name search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub taxon_class: Option<String>,
    pub search: String,
}

impl FilterState {
    /// Whether any filter narrows the dataset.
    pub fn is_active(&self) -> bool {
        self.taxon_class.is_some() || !self.search.is_empty()
    }
}

/// A record passes when:
/// * a class is selected and the record's class equals it exactly, or no
///   class is selected;
/// * the search is empty, or the record has a common name containing the
///   search text case-insensitively.
pub fn matches(record: &Record, filters: &FilterState) -> bool {
    if let Some(class) = &filters.taxon_class {
        if record.taxon_class.as_deref() != Some(class.as_str()) {
            return false;
        }
    }
    if filters.search.is_empty() {
        return true;
    }
    match &record.common_name {
        Some(name) => name
            .to_lowercase()
            .contains(&filters.search.to_lowercase()),
        None => false,
    }
}

/// Return indices of records that pass the active filters, in dataset order.
pub fn filtered_indices(dataset: &ZooDataset, filters: &FilterState) -> Vec<usize> {
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| matches(rec, filters))
        .map(|(i, _)| i)
        .collect()
}
