use std::cmp::Ordering;

use crate::features::pages::dtos::{PageQueryParams, PageResponseDto, PageSortField};
use crate::features::pages::models::PageStatus;
use crate::shared::types::SortDirection;

/// Client-side filter and sort over an already fetched page list.
///
/// Mirrors the server's `GET /api/pages` query semantics so the admin list
/// can react to typing without a round trip.
#[derive(Debug, Clone, Default)]
pub struct PageListView {
    pub search: String,
    pub status: Option<PageStatus>,
    pub sort_by: PageSortField,
    pub direction: SortDirection,
}

impl PageListView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = term.into();
        self
    }

    pub fn status(mut self, status: Option<PageStatus>) -> Self {
        self.status = status;
        self
    }

    pub fn sort(mut self, field: PageSortField, direction: SortDirection) -> Self {
        self.sort_by = field;
        self.direction = direction;
        self
    }

    /// Same filter expressed as server query params
    pub fn to_query(&self) -> PageQueryParams {
        let search = self.search.trim();
        PageQueryParams {
            search: (!search.is_empty()).then(|| search.to_string()),
            status: self.status,
            sort_by: Some(self.sort_by),
            sort: Some(self.direction),
        }
    }

    pub fn matches(&self, page: &PageResponseDto) -> bool {
        if let Some(status) = self.status {
            if page.status != status {
                return false;
            }
        }

        let term = self.search.trim().to_lowercase();
        if term.is_empty() {
            return true;
        }
        page.title.to_lowercase().contains(&term)
            || page.slug.contains(&term)
            || page
                .meta_title
                .as_deref()
                .is_some_and(|t| t.to_lowercase().contains(&term))
    }

    pub fn apply<'a>(&self, pages: &'a [PageResponseDto]) -> Vec<&'a PageResponseDto> {
        let mut visible: Vec<&PageResponseDto> = pages.iter().filter(|p| self.matches(p)).collect();
        visible.sort_by(|a, b| {
            let ordering = compare(self.sort_by, a, b);
            let ordering = match self.direction {
                SortDirection::Asc => ordering,
                SortDirection::Desc => ordering.reverse(),
            };
            ordering.then_with(|| a.id.cmp(&b.id))
        });
        visible
    }
}

fn compare(field: PageSortField, a: &PageResponseDto, b: &PageResponseDto) -> Ordering {
    match field {
        PageSortField::Title => a.title.to_lowercase().cmp(&b.title.to_lowercase()),
        PageSortField::Slug => a.slug.cmp(&b.slug),
        PageSortField::Status => a.status.as_str().cmp(b.status.as_str()),
        PageSortField::CreatedAt => a.created_at.cmp(&b.created_at),
        PageSortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        // Unpublished pages sort first ascending, matching MySQL's NULL ordering
        PageSortField::PublishedAt => a.published_at.cmp(&b.published_at),
        PageSortField::ViewCount => a.view_count.cmp(&b.view_count),
        PageSortField::SortOrder => a.sort_order.cmp(&b.sort_order),
    }
}
