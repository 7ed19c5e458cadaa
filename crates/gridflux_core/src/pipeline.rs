//! Search, filter, sort and paginate over an in-memory record set.
//!
//! The pipeline is a pure function over an already-fetched record set: stage
//! order is fixed (search, field filters, sort, page slicing), identical
//! inputs produce identical output, and the sort is stable so tied records
//! keep their input order. There is no server-side paging protocol behind
//! it.

use crate::{Record, Value};

/// Sort direction for the sort stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn reversed(&self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    pub fn is_descending(&self) -> bool {
        matches!(self, Self::Descending)
    }
}

/// Field name with sort direction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn asc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn desc(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            direction: SortDirection::Descending,
        }
    }
}

/// Inputs to one pipeline run.
///
/// `search_fields` names the attributes the free-text search looks inside;
/// derive it from the schema set via `ColumnConfigStore::search_fields`.
/// With no searchable fields configured, a non-empty search matches nothing.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryParams {
    pub search: String,
    pub search_fields: Vec<String>,
    /// Per-field `(name, value)` filters. A value of `"all"` or the empty
    /// string deactivates the filter rather than matching anything.
    pub filters: Vec<(String, String)>,
    pub sort: Option<SortKey>,
    /// 1-based page number.
    pub page: usize,
    pub page_size: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            search: String::new(),
            search_fields: Vec::new(),
            filters: Vec::new(),
            sort: None,
            page: 1,
            page_size: 10,
        }
    }
}

impl QueryParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn with_search_fields(mut self, fields: Vec<impl Into<String>>) -> Self {
        self.search_fields = fields.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    pub fn with_sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page;
        self
    }

    pub fn with_page_size(mut self, page_size: usize) -> Self {
        self.page_size = page_size;
        self
    }

    /// Replace the filter for `field`, or add one if none is active yet.
    pub fn set_filter(&mut self, field: impl Into<String>, value: impl Into<String>) {
        let field = field.into();
        let value = value.into();
        match self.filters.iter_mut().find(|(name, _)| *name == field) {
            Some(entry) => entry.1 = value,
            None => self.filters.push((field, value)),
        }
    }

    /// Header-click cycle: sorting a new field starts ascending; clicking
    /// the field already sorted by flips its direction.
    pub fn toggle_sort(&mut self, field: impl Into<String>) {
        let field = field.into();
        self.sort = match self.sort.take() {
            Some(key) if key.field == field => Some(SortKey {
                direction: key.direction.reversed(),
                field,
            }),
            _ => Some(SortKey::asc(field)),
        };
    }

    /// Pull `page` back into `[1, total_pages]` after the result set shrank,
    /// e.g. when a newly applied filter removed rows. An empty result set
    /// clamps to page 1.
    pub fn clamp_page(&mut self, total_pages: usize) {
        self.page = self.page.clamp(1, total_pages.max(1));
    }

    /// Run the pipeline. Each stage operates on the previous stage's output.
    ///
    /// Search passes a record when any searchable attribute's string form
    /// contains the trimmed search text case-insensitively. Active filters
    /// require an exact match on the attribute's string form; a record
    /// missing the attribute fails the filter, and so does a null value. The
    /// sort treats a missing sort attribute as null. A `page` beyond
    /// `total_pages` yields an empty window, not an error.
    pub fn run(&self, records: &[Record]) -> PageWindow {
        let needle = self.search.trim().to_lowercase();
        let active_filters: Vec<(&str, &str)> = self
            .filters
            .iter()
            .filter(|(_, value)| !value.is_empty() && value.as_str() != "all")
            .map(|(field, value)| (field.as_str(), value.as_str()))
            .collect();

        let mut rows: Vec<Record> = records
            .iter()
            .filter(|record| {
                needle.is_empty()
                    || self.search_fields.iter().any(|name| {
                        record.attribute(name).is_some_and(|value| {
                            !value.is_null()
                                && value.as_form_string().to_lowercase().contains(&needle)
                        })
                    })
            })
            .filter(|record| {
                active_filters.iter().all(|(field, expected)| {
                    record
                        .attribute(field)
                        .is_some_and(|value| value.as_form_string() == *expected)
                })
            })
            .cloned()
            .collect();

        if let Some(key) = &self.sort {
            let missing = Value::Null;
            rows.sort_by(|a, b| {
                let left = a.attribute(&key.field).unwrap_or(&missing);
                let right = b.attribute(&key.field).unwrap_or(&missing);
                let ordering = left.sort_cmp(right);
                if key.direction.is_descending() {
                    ordering.reverse()
                } else {
                    ordering
                }
            });
        }

        log::debug!(
            "Query matched {} of {} records (search: {:?}, {} active filters)",
            rows.len(),
            records.len(),
            self.search,
            active_filters.len()
        );

        // A zero page size is treated as one rather than dividing by zero.
        let page_size = self.page_size.max(1);
        let total_count = rows.len();
        let total_pages = total_count.div_ceil(page_size);

        let start = (self.page.max(1) - 1) * page_size;
        let records = rows.into_iter().skip(start).take(page_size).collect();

        PageWindow {
            records,
            total_count,
            total_pages,
        }
    }
}

/// One page of pipeline output.
#[derive(Debug, Clone, PartialEq)]
pub struct PageWindow {
    pub records: Vec<Record>,
    /// Records surviving search and filters, before page slicing.
    pub total_count: usize,
    pub total_pages: usize,
}

impl PageWindow {
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
