//! Query-string parameters shared by listing endpoints.
//!
//! Values stay as raw strings: a malformed `page` or `pagesize` falls back to
//! a default in [`Pagination::resolve`] instead of rejecting the request.

use aristotle_core::listing::{Pagination, QuestionSort};
use serde::Deserialize;

/// `?page=&pagesize=&sort=` on question and user listings.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub page: Option<String>,
    pub pagesize: Option<String>,
    pub sort: Option<String>,
}

impl ListParams {
    pub fn sort(&self) -> QuestionSort {
        QuestionSort::parse(self.sort.as_deref())
    }

    pub fn paginate(&self, total: i64, default_per_page: i64) -> Pagination {
        Pagination::resolve(
            self.page.as_deref(),
            self.pagesize.as_deref(),
            total,
            default_per_page,
        )
    }
}

/// `?query=&page=&pagesize=` on the search endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
    pub page: Option<String>,
    pub pagesize: Option<String>,
}

impl SearchParams {
    pub fn paginate(&self, total: i64, default_per_page: i64) -> Pagination {
        Pagination::resolve(
            self.page.as_deref(),
            self.pagesize.as_deref(),
            total,
            default_per_page,
        )
    }
}
