//! Response envelopes
//!
//! The API wraps every payload in `{ "data": ..., "message": ... }`. List
//! endpoints put the collection under an endpoint-specific key next to a
//! `meta` object: `{ "data": { "projects": [...], "meta": {...} } }`.

use crate::error::{SdkError, SdkResult};
use flowsync_core::PaginationInfo;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const META_KEY: &str = "meta";

/// Envelope of a single-resource or mutation response.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    #[serde(default = "Option::default")]
    pub data: Option<T>,
    #[serde(default)]
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// A successful response without payload or message (e.g. `204 No Content`).
    pub fn empty() -> Self {
        Self {
            data: None,
            message: None,
        }
    }

    /// The server's message, ignoring blank strings.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref().filter(|m| !m.trim().is_empty())
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

/// Undecoded list envelope.
///
/// Kept untyped until a collection key is chosen, so one transport shape
/// serves every list endpoint.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ListEnvelope {
    #[serde(default)]
    pub data: Map<String, Value>,
    #[serde(default)]
    pub message: Option<String>,
}

/// A decoded page of a collection.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultEnvelope<T> {
    pub collection: Vec<T>,
    pub pagination: Option<PaginationInfo>,
    pub message: Option<String>,
}

impl ListEnvelope {
    /// Decode the collection stored under `key` together with its `meta`.
    ///
    /// A missing or `null` `meta` yields `pagination: None`; a missing key
    /// is an error.
    pub fn select<T: DeserializeOwned>(mut self, key: &str) -> SdkResult<ResultEnvelope<T>> {
        let items = self
            .data
            .remove(key)
            .filter(|value| !value.is_null())
            .ok_or_else(|| SdkError::MissingCollection {
                key: key.to_string(),
            })?;
        let collection: Vec<T> = serde_json::from_value(items)?;

        let pagination = match self.data.remove(META_KEY) {
            None | Some(Value::Null) => None,
            Some(meta) => Some(serde_json::from_value::<PaginationInfo>(meta)?),
        };

        Ok(ResultEnvelope {
            collection,
            pagination,
            message: self.message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Item {
        id: u64,
    }

    fn envelope(value: Value) -> ListEnvelope {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_select_collection_and_meta() {
        let page = envelope(json!({
            "data": {
                "notices": [{"id": 1}, {"id": 2}],
                "meta": {"currentPage": 1, "pageSize": 10, "totalPages": 1, "totalCount": 2}
            }
        }))
        .select::<Item>("notices")
        .unwrap();

        assert_eq!(page.collection, vec![Item { id: 1 }, Item { id: 2 }]);
        assert_eq!(page.pagination, Some(PaginationInfo::from_counts(1, 10, 2)));
    }

    #[test]
    fn test_missing_meta_is_unknown_pagination() {
        let page = envelope(json!({"data": {"dtoList": []}}))
            .select::<Item>("dtoList")
            .unwrap();
        assert!(page.collection.is_empty());
        assert!(page.pagination.is_none());
    }

    #[test]
    fn test_missing_key_is_an_error() {
        let err = envelope(json!({"data": {"members": []}}))
            .select::<Item>("projects")
            .unwrap_err();
        assert!(matches!(err, SdkError::MissingCollection { key } if key == "projects"));
    }

    #[test]
    fn test_api_response_without_data() {
        let response: ApiResponse<()> =
            serde_json::from_value(json!({"message": "Deleted."})).unwrap();
        assert_eq!(response.message(), Some("Deleted."));
        assert!(response.data.is_none());

        let blank: ApiResponse<()> = serde_json::from_value(json!({"message": ""})).unwrap();
        assert_eq!(blank.message(), None);
    }
}
