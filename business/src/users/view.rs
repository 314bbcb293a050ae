//! Client-side search, status filter and pagination over the loaded users.

use std::str::FromStr;

use super::model::UserRecord;

pub const USERS_PER_PAGE: usize = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum StatusFilter {
    #[default]
    All,
    Active,
    Inactive,
}

impl StatusFilter {
    pub const ALL: [Self; 3] = [Self::All, Self::Active, Self::Inactive];

    pub fn matches(self, status: bool) -> bool {
        match self {
            Self::All => true,
            Self::Active => status,
            Self::Inactive => !status,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::All => "",
            Self::Active => "active",
            Self::Inactive => "inactive",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::All => "All Status",
            Self::Active => "Active",
            Self::Inactive => "Inactive",
        }
    }

    /// The `?status=` value the list endpoint understands.
    pub fn as_query(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Active => Some(true),
            Self::Inactive => Some(false),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status filter `{0}` (expected active, inactive or all)")]
pub struct ParseStatusFilterError(String);

impl FromStr for StatusFilter {
    type Err = ParseStatusFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "" | "all" => Ok(Self::All),
            "active" => Ok(Self::Active),
            "inactive" => Ok(Self::Inactive),
            _ => Err(ParseStatusFilterError(s.to_owned())),
        }
    }
}

/// Search, filter and page selection. The page is 1-based.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewState {
    search_term: String,
    status_filter: StatusFilter,
    current_page: usize,
    per_page: usize,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            search_term: String::new(),
            status_filter: StatusFilter::All,
            current_page: 1,
            per_page: USERS_PER_PAGE,
        }
    }
}

impl ViewState {
    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status_filter
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn per_page(&self) -> usize {
        self.per_page
    }

    /// Changing the term always returns to the first page.
    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search_term = term.into();
        self.current_page = 1;
    }

    /// Changing the filter always returns to the first page.
    pub fn set_status_filter(&mut self, filter: StatusFilter) {
        self.status_filter = filter;
        self.current_page = 1;
    }

    pub fn go_to_page(&mut self, page: usize, total_pages: usize) {
        self.current_page = page.clamp(1, total_pages.max(1));
    }

    pub fn next_page(&mut self, total_pages: usize) {
        self.go_to_page(self.current_page + 1, total_pages);
    }

    pub fn prev_page(&mut self, total_pages: usize) {
        self.go_to_page(self.current_page.saturating_sub(1), total_pages);
    }

    /// Pulls the page back into `1..=max(1, total_pages)`.
    pub fn clamp_to(&mut self, total_pages: usize) {
        self.go_to_page(self.current_page, total_pages);
    }
}

/// Case-insensitive match on first name, email, or `"{first} {last}"`.
/// `term` must already be lowercase.
pub fn matches_search(user: &UserRecord, term: &str) -> bool {
    if term.is_empty() {
        return true;
    }

    let full_name = format!(
        "{} {}",
        user.first_name,
        user.last_name.as_deref().unwrap_or("")
    );

    user.first_name.to_lowercase().contains(term)
        || user.email.to_lowercase().contains(term)
        || full_name.to_lowercase().contains(term)
}

pub fn filter_users<'a>(state: &ViewState, users: &'a [UserRecord]) -> Vec<&'a UserRecord> {
    let term = state.search_term.to_lowercase();
    users
        .iter()
        .filter(|u| matches_search(u, &term) && state.status_filter.matches(u.status))
        .collect()
}

pub fn total_pages(count: usize, per_page: usize) -> usize {
    count.div_ceil(per_page.max(1))
}

/// What the table renders for the current view state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DerivedView<'a> {
    pub items: Vec<&'a UserRecord>,
    pub total_pages: usize,
    pub current_page: usize,
    pub filtered_count: usize,
    /// Zero-based position of `items[0]` within the filtered list.
    pub first_index: usize,
}

impl DerivedView<'_> {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Pagination controls are only shown for more than one page.
    pub fn show_pagination(&self) -> bool {
        self.total_pages > 1
    }
}

pub fn derive_view<'a>(state: &ViewState, users: &'a [UserRecord]) -> DerivedView<'a> {
    let filtered = filter_users(state, users);
    let filtered_count = filtered.len();
    let total_pages = total_pages(filtered_count, state.per_page);
    let current_page = state.current_page.clamp(1, total_pages.max(1));
    let first_index = (current_page - 1) * state.per_page;

    let items = filtered
        .into_iter()
        .skip(first_index)
        .take(state.per_page)
        .collect();

    DerivedView {
        items,
        total_pages,
        current_page,
        filtered_count,
        first_index,
    }
}
