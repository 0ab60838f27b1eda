//! Server-side paging state.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Page sizes the grid offers
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum PageSize {
    Fifty,
    #[default]
    OneHundred,
    TwoHundred,
}

impl PageSize {
    pub const ALL: [PageSize; 3] = [PageSize::Fifty, PageSize::OneHundred, PageSize::TwoHundred];

    pub fn get(self) -> u32 {
        match self {
            PageSize::Fifty => 50,
            PageSize::OneHundred => 100,
            PageSize::TwoHundred => 200,
        }
    }
}

impl fmt::Display for PageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.get())
    }
}

/// Error for a page size outside {50, 100, 200}
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unsupported page size {0} (expected 50, 100 or 200)")]
pub struct InvalidPageSize(pub u32);

impl TryFrom<u32> for PageSize {
    type Error = InvalidPageSize;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            50 => Ok(PageSize::Fifty),
            100 => Ok(PageSize::OneHundred),
            200 => Ok(PageSize::TwoHundred),
            other => Err(InvalidPageSize(other)),
        }
    }
}

impl From<PageSize> for u32 {
    fn from(size: PageSize) -> Self {
        size.get()
    }
}

/// Current page (1-based) and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PagingState {
    pub page_size: PageSize,
    pub current_page: u32,
}

impl Default for PagingState {
    fn default() -> Self {
        Self {
            page_size: PageSize::default(),
            current_page: 1,
        }
    }
}

impl PagingState {
    /// Number of pages needed for `total` items (at least one)
    pub fn page_count(&self, total: u64) -> u32 {
        let size = u64::from(self.page_size.get());
        let pages = total.div_ceil(size).max(1);
        u32::try_from(pages).unwrap_or(u32::MAX)
    }
}

/// Parse a page number typed into the grid footer.
///
/// Only positive integers are pages; anything else yields `None`.
pub fn parse_page(input: &str) -> Option<u32> {
    input.trim().parse::<u32>().ok().filter(|page| *page >= 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let paging = PagingState::default();
        assert_eq!(paging.current_page, 1);
        assert_eq!(paging.page_size.get(), 100);
    }

    #[test]
    fn page_size_conversion() {
        assert_eq!(PageSize::try_from(50), Ok(PageSize::Fifty));
        assert_eq!(PageSize::try_from(200), Ok(PageSize::TwoHundred));
        assert_eq!(PageSize::try_from(75), Err(InvalidPageSize(75)));
        assert_eq!(serde_json::to_string(&PageSize::Fifty).unwrap(), "50");
        assert!(serde_json::from_str::<PageSize>("10").is_err());
    }

    #[test]
    fn page_count() {
        let paging = PagingState::default();
        assert_eq!(paging.page_count(0), 1);
        assert_eq!(paging.page_count(100), 1);
        assert_eq!(paging.page_count(101), 2);
        assert_eq!(paging.page_count(250), 3);
    }

    #[test]
    fn page_input() {
        assert_eq!(parse_page("3"), Some(3));
        assert_eq!(parse_page(" 12 "), Some(12));
        assert_eq!(parse_page("0"), None);
        assert_eq!(parse_page("-1"), None);
        assert_eq!(parse_page("two"), None);
        assert_eq!(parse_page(""), None);
    }
}
