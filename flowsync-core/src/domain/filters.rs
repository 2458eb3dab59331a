use serde::Serialize;
use url::form_urlencoded;

/// Page size used by the project board when the address bar carries none.
pub const DEFAULT_PROJECT_PAGE_SIZE: u32 = 5;

/// Page size used by every other board when the address bar carries none.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Filter and pagination inputs for a list request.
///
/// This is the typed form of the query string the dashboard keeps in the
/// address bar (`?keyword=..&status=..&currentPage=..&pageSize=..`). It is an
/// immutable value: the `with_*` methods return a new instance, and two
/// filters compare equal exactly when they would produce the same request.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub management_step: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_deleted: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_step_id: Option<String>,
    pub current_page: u32,
    pub page_size: u32,
}

impl Default for ListFilters {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl ListFilters {
    /// Filters for the first page with nothing selected.
    pub fn new(page_size: u32) -> Self {
        Self {
            keyword: None,
            status: None,
            kind: None,
            management_step: None,
            category: None,
            is_deleted: None,
            role: None,
            progress_step_id: None,
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    /// Parse filters out of a URL query string.
    ///
    /// A leading `?` is accepted. Unknown keys are ignored, empty values mean
    /// "no filter", and page numbers that are missing, zero or unparsable fall
    /// back to page 1 and `default_page_size`.
    pub fn from_query_str(query: &str, default_page_size: u32) -> Self {
        let mut filters = Self::new(default_page_size);
        let query = query.strip_prefix('?').unwrap_or(query);

        for (key, value) in form_urlencoded::parse(query.as_bytes()) {
            let value = value.into_owned();
            match key.as_ref() {
                "keyword" => filters.keyword = non_empty(value),
                "status" => filters.status = non_empty(value),
                "type" => filters.kind = non_empty(value),
                "managementStep" => filters.management_step = non_empty(value),
                "category" => filters.category = non_empty(value),
                "isDeleted" => filters.is_deleted = non_empty(value),
                "role" => filters.role = non_empty(value),
                "progressStepId" => filters.progress_step_id = non_empty(value),
                "currentPage" => {
                    if let Some(page) = parse_positive(&value) {
                        filters.current_page = page;
                    }
                }
                "pageSize" => {
                    if let Some(size) = parse_positive(&value) {
                        filters.page_size = size;
                    }
                }
                _ => {}
            }
        }

        filters
    }

    /// Render the filters back into a query string, without the leading `?`.
    pub fn to_query_string(&self) -> String {
        let mut serializer = form_urlencoded::Serializer::new(String::new());
        let optional = [
            ("keyword", &self.keyword),
            ("status", &self.status),
            ("type", &self.kind),
            ("managementStep", &self.management_step),
            ("category", &self.category),
            ("isDeleted", &self.is_deleted),
            ("role", &self.role),
            ("progressStepId", &self.progress_step_id),
        ];
        for (key, value) in optional {
            if let Some(value) = value {
                serializer.append_pair(key, value);
            }
        }
        serializer.append_pair("currentPage", &self.current_page.to_string());
        serializer.append_pair("pageSize", &self.page_size.to_string());
        serializer.finish()
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = non_empty(keyword.into());
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = non_empty(status.into());
        self
    }

    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = non_empty(kind.into());
        self
    }

    pub fn with_management_step(mut self, step: impl Into<String>) -> Self {
        self.management_step = non_empty(step.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = non_empty(category.into());
        self
    }

    pub fn with_is_deleted(mut self, is_deleted: impl Into<String>) -> Self {
        self.is_deleted = non_empty(is_deleted.into());
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = non_empty(role.into());
        self
    }

    pub fn with_progress_step_id(mut self, id: impl Into<String>) -> Self {
        self.progress_step_id = non_empty(id.into());
        self
    }

    /// Move to another page. Page 0 is read as page 1.
    pub fn with_page(mut self, page: u32) -> Self {
        self.current_page = page.max(1);
        self
    }

    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size.max(1);
        self
    }
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

fn parse_positive(value: &str) -> Option<u32> {
    value.trim().parse::<u32>().ok().filter(|n| *n > 0)
}
