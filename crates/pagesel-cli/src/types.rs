use pagesel_model::SelectionModel;
use serde::Serialize;

/// Selection state at the end of a session, in display form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SelectionSummary {
    pub baseline: u64,
    pub include: Vec<String>,
    pub exclude: Vec<String>,
    pub effective_count: u64,
}

impl From<&SelectionModel> for SelectionSummary {
    fn from(model: &SelectionModel) -> Self {
        Self {
            baseline: model.baseline(),
            include: model.included().iter().map(ToString::to_string).collect(),
            exclude: model.excluded().iter().map(ToString::to_string).collect(),
            effective_count: model.effective_count(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct BrowseReport {
    pub page_number: u64,
    pub page_size: u64,
    pub total_count: u64,
    pub selection: SelectionSummary,
    pub pages_loaded: usize,
    pub fetch_failures: usize,
    pub ignored_events: usize,
    /// Validation and fetch problems, prefixed with their script line.
    pub messages: Vec<String>,
    /// Pages rendered by `show`, in order.
    #[serde(skip)]
    pub views: Vec<String>,
}

impl BrowseReport {
    pub fn note(&mut self, line: usize, message: impl std::fmt::Display) {
        self.messages.push(format!("line {line}: {message}"));
    }

    pub fn has_failures(&self) -> bool {
        self.fetch_failures > 0 || !self.messages.is_empty()
    }
}
