//! Sort keys, page sizes and page resolution for question listings.

use serde::{Deserialize, Serialize};

/// Ordering applied to a question listing (`?sort=`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuestionSort {
    /// Creation time, newest first.
    #[default]
    Newest,
    /// Net score, then newest.
    Votes,
    /// Solved first, then most answers, then newest.
    Answers,
    /// Unsolved only: fewest answers, lowest score, oldest first.
    Unanswered,
    /// Most distinct viewers, then newest.
    Views,
}

impl QuestionSort {
    /// Parse a sort key. Missing or unknown keys fall back to newest.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("votes") => QuestionSort::Votes,
            Some("answers") => QuestionSort::Answers,
            Some("unanswered") => QuestionSort::Unanswered,
            Some("views") => QuestionSort::Views,
            _ => QuestionSort::Newest,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            QuestionSort::Newest => "newest",
            QuestionSort::Votes => "votes",
            QuestionSort::Answers => "answers",
            QuestionSort::Unanswered => "unanswered",
            QuestionSort::Views => "views",
        }
    }

    /// Whether solved questions are excluded from the listing.
    pub fn unsolved_only(self) -> bool {
        matches!(self, QuestionSort::Unanswered)
    }
}

/// Page sizes and avatar locations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingConfig {
    pub home_page_size: i64,
    pub tag_page_size: i64,
    pub user_page_size: i64,
    pub question_page_size: i64,
    pub answer_page_size: i64,
    pub comment_page_size: i64,
    pub avatar_path: String,
    pub default_avatar: String,
}

impl Default for ListingConfig {
    fn default() -> Self {
        Self {
            home_page_size: 25,
            tag_page_size: 50,
            user_page_size: 50,
            question_page_size: 25,
            answer_page_size: 25,
            comment_page_size: 5,
            avatar_path: "uploads/avatars/".to_string(),
            default_avatar: "defaultavatar.jpg".to_string(),
        }
    }
}

impl ListingConfig {
    /// Load page sizes and avatar paths from environment variables.
    ///
    /// | Env Var              | Default             |
    /// |----------------------|---------------------|
    /// | `HOME_PAGE_SIZE`     | `25`                |
    /// | `TAG_PAGE_SIZE`      | `50`                |
    /// | `USER_PAGE_SIZE`     | `50`                |
    /// | `QUESTION_PAGE_SIZE` | `25`                |
    /// | `ANSWER_PAGE_SIZE`   | `25`                |
    /// | `COMMENT_PAGE_SIZE`  | `5`                 |
    /// | `AVATAR_PATH`        | `uploads/avatars/`  |
    /// | `DEFAULT_AVATAR`     | `defaultavatar.jpg` |
    ///
    /// # Panics
    ///
    /// Panics if a page size is set but is not a positive integer.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            home_page_size: page_size_var("HOME_PAGE_SIZE", defaults.home_page_size),
            tag_page_size: page_size_var("TAG_PAGE_SIZE", defaults.tag_page_size),
            user_page_size: page_size_var("USER_PAGE_SIZE", defaults.user_page_size),
            question_page_size: page_size_var("QUESTION_PAGE_SIZE", defaults.question_page_size),
            answer_page_size: page_size_var("ANSWER_PAGE_SIZE", defaults.answer_page_size),
            comment_page_size: page_size_var("COMMENT_PAGE_SIZE", defaults.comment_page_size),
            avatar_path: std::env::var("AVATAR_PATH").unwrap_or(defaults.avatar_path),
            default_avatar: std::env::var("DEFAULT_AVATAR").unwrap_or(defaults.default_avatar),
        }
    }

    /// Public path of a member's avatar, or the default picture.
    pub fn avatar_url(&self, avatar: Option<&str>) -> String {
        let file = avatar
            .filter(|a| !a.is_empty())
            .unwrap_or(&self.default_avatar);
        format!("{}{}", self.avatar_path, file)
    }
}

fn page_size_var(name: &str, default: i64) -> i64 {
    match std::env::var(name) {
        Ok(value) => {
            let size: i64 = value
                .trim()
                .parse()
                .unwrap_or_else(|_| panic!("{name} must be a valid i64"));
            assert!(size > 0, "{name} must be positive");
            size
        }
        Err(_) => default,
    }
}

/// Largest page size a request may ask for.
pub const MAX_PAGE_SIZE: i64 = 200;

/// A resolved page: which rows to fetch and how many pages exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Pagination {
    pub page: i64,
    pub per_page: i64,
    pub total: i64,
    pub num_pages: i64,
}

impl Pagination {
    /// Resolve raw `page` / `pagesize` query values against a row count.
    ///
    /// A missing, zero or unparsable page size uses `default_per_page`; any
    /// page size is capped at [`MAX_PAGE_SIZE`].
    /// A missing or non-numeric page is page 1. A page past the end (or
    /// below 1) lands on the last page. There is always at least one page.
    pub fn resolve(
        page: Option<&str>,
        per_page: Option<&str>,
        total: i64,
        default_per_page: i64,
    ) -> Self {
        let per_page = per_page
            .and_then(|v| v.trim().parse::<i64>().ok())
            .filter(|&n| n > 0)
            .unwrap_or(default_per_page)
            .clamp(1, MAX_PAGE_SIZE);
        let total = total.max(0);
        let num_pages = (total / per_page + i64::from(total % per_page != 0)).max(1);

        let page = match page.map(|v| v.trim().parse::<i64>()) {
            None | Some(Err(_)) => 1,
            Some(Ok(n)) if n < 1 || n > num_pages => num_pages,
            Some(Ok(n)) => n,
        };

        Self {
            page,
            per_page,
            total,
            num_pages,
        }
    }

    pub fn offset(&self) -> i64 {
        (self.page - 1) * self.per_page
    }

    pub fn limit(&self) -> i64 {
        self.per_page
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_parse_defaults_to_newest() {
        assert_eq!(QuestionSort::parse(None), QuestionSort::Newest);
        assert_eq!(QuestionSort::parse(Some("")), QuestionSort::Newest);
        assert_eq!(QuestionSort::parse(Some("bogus")), QuestionSort::Newest);
        assert_eq!(QuestionSort::parse(Some("views")), QuestionSort::Views);
        assert_eq!(QuestionSort::parse(Some("unanswered")), QuestionSort::Unanswered);
    }

    #[test]
    fn test_only_unanswered_filters() {
        assert!(QuestionSort::Unanswered.unsolved_only());
        assert!(!QuestionSort::Votes.unsolved_only());
    }

    #[test]
    fn test_default_page_sizes() {
        let cfg = ListingConfig::default();
        assert_eq!(cfg.home_page_size, 25);
        assert_eq!(cfg.tag_page_size, 50);
        assert_eq!(cfg.user_page_size, 50);
        assert_eq!(cfg.answer_page_size, 25);
        assert_eq!(cfg.comment_page_size, 5);
    }

    #[test]
    fn test_avatar_url_falls_back_to_default() {
        let cfg = ListingConfig::default();
        assert_eq!(cfg.avatar_url(None), "uploads/avatars/defaultavatar.jpg");
        assert_eq!(cfg.avatar_url(Some("")), "uploads/avatars/defaultavatar.jpg");
        assert_eq!(cfg.avatar_url(Some("42.png")), "uploads/avatars/42.png");
    }

    #[test]
    fn test_missing_or_zero_page_size_uses_default() {
        assert_eq!(Pagination::resolve(None, None, 100, 25).per_page, 25);
        assert_eq!(Pagination::resolve(None, Some("0"), 100, 25).per_page, 25);
        assert_eq!(Pagination::resolve(None, Some("abc"), 100, 25).per_page, 25);
        assert_eq!(Pagination::resolve(None, Some("10"), 100, 25).per_page, 10);
    }

    #[test]
    fn test_non_numeric_page_is_first() {
        let p = Pagination::resolve(Some("two"), Some("10"), 100, 25);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset(), 0);
    }

    #[test]
    fn test_page_past_end_is_last() {
        let p = Pagination::resolve(Some("99"), Some("10"), 35, 25);
        assert_eq!(p.num_pages, 4);
        assert_eq!(p.page, 4);
        assert_eq!(p.offset(), 30);
    }

    #[test]
    fn test_huge_page_size_is_capped() {
        let p = Pagination::resolve(Some("1"), Some("9223372036854775807"), 5, 25);
        assert_eq!(p.per_page, MAX_PAGE_SIZE);
        assert_eq!(p.num_pages, 1);
        assert_eq!(p.page, 1);
        assert_eq!(p.offset(), 0);

        let last = Pagination::resolve(Some("9223372036854775807"), Some("500"), 450, 25);
        assert_eq!(last.per_page, MAX_PAGE_SIZE);
        assert_eq!(last.num_pages, 3);
        assert_eq!(last.page, 3);
        assert_eq!(last.offset(), 400);
    }

    #[test]
    fn test_total_near_max_does_not_overflow() {
        let p = Pagination::resolve(None, Some("200"), i64::MAX, 25);
        assert_eq!(p.num_pages, i64::MAX / 200 + 1);
    }

    #[test]
    fn test_empty_listing_has_one_page() {
        let p = Pagination::resolve(Some("3"), None, 0, 25);
        assert_eq!(p.num_pages, 1);
        assert_eq!(p.page, 1);
    }
}
