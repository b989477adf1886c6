// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! Search, status filter, sort and pagination over an in-memory record list.
//!
//! Everything here is a pure function of its inputs: the same records and
//! view state always produce the same visible set.

use std::cmp::Ordering;

use crate::{Record, SortDirection, StatusFilter, Value};

/// Which fields of a record type the engine looks at.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewConfig {
    pub searchable_fields: Vec<String>,
    pub status_field: Option<String>,
    /// Empty means every field may be sorted on.
    pub sortable_fields: Vec<String>,
}

impl ViewConfig {
    pub fn new(searchable_fields: &[&str]) -> Self {
        Self {
            searchable_fields: owned(searchable_fields),
            status_field: None,
            sortable_fields: Vec::new(),
        }
    }

    pub fn status_field(mut self, field: &str) -> Self {
        self.status_field = Some(field.to_owned());
        self
    }

    pub fn sortable(mut self, fields: &[&str]) -> Self {
        self.sortable_fields = owned(fields);
        self
    }

    pub fn can_sort_on(&self, field: &str) -> bool {
        self.sortable_fields.is_empty() || self.sortable_fields.iter().any(|name| name == field)
    }
}

fn owned(fields: &[&str]) -> Vec<String> {
    fields.iter().map(|field| (*field).to_owned()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ViewState {
    pub search_text: String,
    pub status_filter: StatusFilter,
    pub sort_key: Option<String>,
    pub sort_direction: SortDirection,
}

impl ViewState {
    pub fn sorted_by(key: &str, direction: SortDirection) -> Self {
        Self {
            sort_key: Some(key.to_owned()),
            sort_direction: direction,
            ..Self::default()
        }
    }

    /// Column-header click: the active column flips direction, a new column
    /// starts ascending.
    pub fn sort_by_column(&mut self, key: &str) {
        if key.is_empty() {
            return;
        }
        if self.sort_key.as_deref() == Some(key) {
            self.sort_direction = self.sort_direction.toggle();
        } else {
            self.sort_key = Some(key.to_owned());
            self.sort_direction = SortDirection::Asc;
        }
    }

    pub fn clear_sort(&mut self) {
        self.sort_key = None;
        self.sort_direction = SortDirection::Asc;
    }
}

/// Records passing the search and status predicates, in display order.
pub fn visible_set<'a>(
    records: &'a [Record],
    config: &ViewConfig,
    state: &ViewState,
) -> Vec<&'a Record> {
    let needle = state.search_text.to_lowercase();
    let mut visible: Vec<&Record> = records
        .iter()
        .filter(|record| matches_search(record, config, &needle))
        .filter(|record| matches_status(record, config, &state.status_filter))
        .collect();

    if let Some(key) = state.sort_key.as_deref()
        && config.can_sort_on(key)
    {
        visible = merge_sort(visible, &|left: &Record, right: &Record| {
            let order = compare_values(left.get(key), right.get(key));
            match state.sort_direction {
                SortDirection::Asc => order,
                SortDirection::Desc => order.reverse(),
            }
        });
    }

    visible
}

/// Stable merge sort. `compare_values` is not transitive once missing or
/// mixed values are involved, which `slice::sort_by` may reject by panicking.
fn merge_sort<'a, F>(mut items: Vec<&'a Record>, compare: &F) -> Vec<&'a Record>
where
    F: Fn(&Record, &Record) -> Ordering,
{
    if items.len() <= 1 {
        return items;
    }
    let right = items.split_off(items.len() / 2);
    let mut left = merge_sort(items, compare).into_iter().peekable();
    let mut right = merge_sort(right, compare).into_iter().peekable();

    let mut merged = Vec::with_capacity(left.len() + right.len());
    loop {
        let (head, other) = match (left.peek(), right.peek()) {
            (Some(&head), Some(&other)) => (head, other),
            _ => break,
        };
        // Ties take from the left run so equal records keep input order.
        if compare(other, head).is_lt() {
            merged.push(other);
            right.next();
        } else {
            merged.push(head);
            left.next();
        }
    }
    merged.extend(left);
    merged.extend(right);
    merged
}

/// `needle` must already be lowercased; an empty needle matches everything.
pub fn matches_search(record: &Record, config: &ViewConfig, needle: &str) -> bool {
    if needle.is_empty() {
        return true;
    }
    config.searchable_fields.iter().any(|field| {
        record
            .get(field)
            .is_some_and(|value| value.display().to_lowercase().contains(needle))
    })
}

pub fn matches_status(record: &Record, config: &ViewConfig, filter: &StatusFilter) -> bool {
    let StatusFilter::Only(wanted) = filter else {
        return true;
    };
    let Some(field) = config.status_field.as_deref() else {
        return true;
    };
    record
        .get(field)
        .and_then(Value::as_text)
        .is_some_and(|status| status == wanted)
}

/// `All` followed by each distinct status in first-seen order.
pub fn status_options(records: &[Record], config: &ViewConfig) -> Vec<StatusFilter> {
    let mut options = vec![StatusFilter::All];
    let Some(field) = config.status_field.as_deref() else {
        return options;
    };
    for record in records {
        if let Some(status) = record.get(field).and_then(Value::as_text) {
            let option = StatusFilter::Only(status.to_owned());
            if !options.contains(&option) {
                options.push(option);
            }
        }
    }
    options
}

/// Ordering used by the sort; incomparable pairs are equal.
pub fn compare_values(left: Option<&Value>, right: Option<&Value>) -> Ordering {
    let (Some(left), Some(right)) = (left, right) else {
        return Ordering::Equal;
    };

    if let (Some(left), Some(right)) = (left.instant(), right.instant()) {
        return left.cmp(&right);
    }

    match (left, right) {
        (Value::Number(left), Value::Number(right)) => left.total_cmp(right),
        (Value::Text(left), Value::Text(right)) => compare_text(left, right),
        _ => Ordering::Equal,
    }
}

/// Case-folded comparison, with the raw strings as tie-break so that the
/// order is total.
pub fn compare_text(left: &str, right: &str) -> Ordering {
    left.to_lowercase()
        .cmp(&right.to_lowercase())
        .then_with(|| left.cmp(right))
}

#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub items: Vec<&'a Record>,
    pub page: usize,
    pub page_count: usize,
    pub total: usize,
}

/// Cuts one page out of a visible set. Out-of-range pages clamp to the last
/// page; a `page_size` of 0 puts everything on one page.
pub fn paginate<'a>(visible: &[&'a Record], page: usize, page_size: usize) -> Page<'a> {
    let total = visible.len();
    if page_size == 0 || total == 0 {
        return Page {
            items: visible.to_vec(),
            page: 0,
            page_count: 1,
            total,
        };
    }

    let page_count = total.div_ceil(page_size);
    let page = page.min(page_count - 1);
    let start = page * page_size;
    let end = (start + page_size).min(total);
    Page {
        items: visible[start..end].to_vec(),
        page,
        page_count,
        total,
    }
}
