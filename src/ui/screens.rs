use crate::models::{BusinessRecord, SortKey, SortOrder};
use crate::store::{search, sort};

/// The four orderings offered in the sort menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum SortOption {
    #[default]
    NameAsc,
    NameDesc,
    CategoryAsc,
    CategoryDesc,
}

impl SortOption {
    pub(crate) fn label(self) -> &'static str {
        match self {
            SortOption::NameAsc => "Name (A-Z)",
            SortOption::NameDesc => "Name (Z-A)",
            SortOption::CategoryAsc => "Category (A-Z)",
            SortOption::CategoryDesc => "Category (Z-A)",
        }
    }

    pub(crate) fn key(self) -> SortKey {
        match self {
            SortOption::NameAsc | SortOption::NameDesc => SortKey::Name,
            SortOption::CategoryAsc | SortOption::CategoryDesc => SortKey::Category,
        }
    }

    pub(crate) fn order(self) -> SortOrder {
        match self {
            SortOption::NameAsc | SortOption::CategoryAsc => SortOrder::Ascending,
            SortOption::NameDesc | SortOption::CategoryDesc => SortOrder::Descending,
        }
    }

    pub(crate) fn next(self) -> Self {
        match self {
            SortOption::NameAsc => SortOption::NameDesc,
            SortOption::NameDesc => SortOption::CategoryAsc,
            SortOption::CategoryAsc => SortOption::CategoryDesc,
            SortOption::CategoryDesc => SortOption::NameAsc,
        }
    }
}

/// Search results as currently displayed: the query, the chosen ordering, and
/// a snapshot of the matching records.
#[derive(Default)]
pub(crate) struct DirectoryScreen {
    pub(crate) query: String,
    pub(crate) sort: SortOption,
    pub(crate) results: Vec<BusinessRecord>,
    pub(crate) selected: usize,
}

impl DirectoryScreen {
    pub(crate) fn new(records: &[BusinessRecord]) -> Self {
        let mut screen = Self::default();
        screen.refresh(records);
        screen
    }

    /// Re-run search and sort against the store's records. The selection
    /// follows the previously selected business when it is still visible.
    pub(crate) fn refresh(&mut self, records: &[BusinessRecord]) {
        let previous = self.current().map(|r| r.id().to_string());

        let mut hits = search(&self.query, records);
        sort(&mut hits, self.sort.key(), self.sort.order());
        self.results = hits.into_iter().cloned().collect();

        if let Some(id) = previous {
            self.focus(&id);
        }
        self.ensure_in_bounds();
    }

    pub(crate) fn set_query(&mut self, query: String, records: &[BusinessRecord]) {
        self.query = query;
        self.refresh(records);
    }

    pub(crate) fn cycle_sort(&mut self, records: &[BusinessRecord]) -> SortOption {
        self.sort = self.sort.next();
        self.refresh(records);
        self.sort
    }

    pub(crate) fn has_query(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// Footer text describing the current result set.
    pub(crate) fn summary(&self) -> String {
        if self.results.is_empty() {
            "No results found.".to_string()
        } else if self.has_query() {
            format!("Found {} result(s).", self.results.len())
        } else {
            format!("Displaying all {} business(es).", self.results.len())
        }
    }

    /// Move the selection onto the business with `id`, if it is listed.
    pub(crate) fn focus(&mut self, id: &str) {
        if let Some(idx) = self.results.iter().position(|r| r.id() == id) {
            self.selected = idx;
        }
    }

    pub(crate) fn current(&self) -> Option<&BusinessRecord> {
        self.results.get(self.selected)
    }

    pub(crate) fn move_selection(&mut self, offset: isize) {
        if self.results.is_empty() {
            return;
        }
        let len = self.results.len() as isize;
        let new = (self.selected as isize + offset).clamp(0, len - 1);
        self.selected = new as usize;
    }

    pub(crate) fn select_first(&mut self) {
        self.selected = 0;
    }

    pub(crate) fn select_last(&mut self) {
        self.selected = self.results.len().saturating_sub(1);
    }

    fn ensure_in_bounds(&mut self) {
        if self.results.is_empty() {
            self.selected = 0;
        } else if self.selected >= self.results.len() {
            self.selected = self.results.len() - 1;
        }
    }
}
