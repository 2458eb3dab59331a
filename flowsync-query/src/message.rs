//! User-facing failure messages

use flowsync_sdk::SdkError;

/// Shown when a list request fails without any usable message.
pub const LIST_FALLBACK_MESSAGE: &str = "An error occurred while loading data.";

/// Shown when a mutation fails without any usable message.
pub const MUTATION_FALLBACK_MESSAGE: &str = "An error occurred while processing the request.";

/// Pick the message describing `error`.
///
/// The server's own message wins, then the error's description, then
/// `fallback`.
pub fn resolve_message(error: &SdkError, fallback: &str) -> String {
    if let Some(message) = error.server_message() {
        return message.to_string();
    }

    match error {
        SdkError::Unknown(detail) if detail.trim().is_empty() => fallback.to_string(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_server_message_wins() {
        let error = SdkError::from_response(400, r#"{"message": "Name is taken."}"#, None);
        assert_eq!(resolve_message(&error, LIST_FALLBACK_MESSAGE), "Name is taken.");
    }

    #[test]
    fn test_error_description_without_server_message() {
        let error = SdkError::from_response(502, "<html>bad gateway</html>", None);
        assert_eq!(resolve_message(&error, LIST_FALLBACK_MESSAGE), "API error: 502");

        let error = SdkError::Timeout(30);
        assert_eq!(
            resolve_message(&error, MUTATION_FALLBACK_MESSAGE),
            "Request timed out after 30 seconds"
        );
    }

    #[test]
    fn test_fallback_for_blank_errors() {
        let error = SdkError::Unknown(String::new());
        assert_eq!(
            resolve_message(&error, MUTATION_FALLBACK_MESSAGE),
            MUTATION_FALLBACK_MESSAGE
        );
    }
}
