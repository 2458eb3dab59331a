use serde::{Deserialize, Serialize};

/// Pagination metadata returned alongside every list collection.
///
/// The server owns these numbers. Nothing here clamps `current_page` against
/// `total_pages`; a request for a page past the end is reported back as-is.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PaginationInfo {
    pub current_page: u32,
    pub page_size: u32,
    pub total_pages: u32,
    pub total_count: u64,
}

impl PaginationInfo {
    /// Build pagination metadata from a requested page and a total item count.
    ///
    /// `page_size` of zero is treated as one so the page count stays defined.
    pub fn from_counts(current_page: u32, page_size: u32, total_count: u64) -> Self {
        let page_size = page_size.max(1);
        let total_pages = total_count.div_ceil(u64::from(page_size));

        Self {
            current_page: current_page.max(1),
            page_size,
            total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
            total_count,
        }
    }

    /// Whether `current_page <= max(total_pages, 1)`.
    pub fn is_in_range(&self) -> bool {
        self.current_page <= self.total_pages.max(1)
    }

    /// The requested page pulled back into `1..=max(total_pages, 1)`.
    pub fn clamp_page(&self) -> u32 {
        self.current_page.clamp(1, self.total_pages.max(1))
    }

    pub fn has_next_page(&self) -> bool {
        self.current_page < self.total_pages
    }

    pub fn has_previous_page(&self) -> bool {
        self.current_page > 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_pages_rounds_up() {
        let info = PaginationInfo::from_counts(1, 10, 95);
        assert_eq!(info.total_pages, 10);
        assert!(info.has_next_page());
        assert!(!info.has_previous_page());
    }

    #[test]
    fn test_out_of_range_page_is_not_clamped() {
        let info = PaginationInfo::from_counts(11, 10, 95);
        assert_eq!(info.current_page, 11);
        assert_eq!(info.total_pages, 10);
        assert!(!info.is_in_range());
        assert_eq!(info.clamp_page(), 10);
    }

    #[test]
    fn test_empty_collection() {
        let info = PaginationInfo::from_counts(1, 10, 0);
        assert_eq!(info.total_pages, 0);
        assert!(info.is_in_range());
        assert_eq!(info.clamp_page(), 1);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let info: PaginationInfo = serde_json::from_str(
            r#"{"currentPage": 2, "pageSize": 5, "totalPages": 4, "totalCount": 18}"#,
        )
        .unwrap();
        assert_eq!(info, PaginationInfo::from_counts(2, 5, 18));
    }
}
