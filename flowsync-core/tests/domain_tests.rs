use flowsync_core::domain::*;
use flowsync_core::error::CoreError;
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::json;
use validator::Validate;

// ===== Pagination =====

proptest! {
    #[test]
    fn prop_total_pages_covers_every_item(page_size in 1u32..500, total in 0u64..100_000) {
        let info = PaginationInfo::from_counts(1, page_size, total);
        let capacity = u64::from(info.total_pages) * u64::from(page_size);
        prop_assert!(capacity >= total);
        prop_assert!(capacity < total + u64::from(page_size));
    }

    #[test]
    fn prop_pages_up_to_total_are_in_range(page_size in 1u32..100, total in 0u64..10_000, pick in 0u32..1000) {
        let last = PaginationInfo::from_counts(1, page_size, total).total_pages.max(1);
        let page = pick % last + 1;
        let info = PaginationInfo::from_counts(page, page_size, total);
        prop_assert!(info.is_in_range());
        prop_assert_eq!(info.clamp_page(), page);
    }

    #[test]
    fn prop_filters_survive_the_address_bar(
        keyword in proptest::option::of("[a-zA-Z0-9 &=%]{1,12}"),
        status in proptest::option::of("[A-Z_]{1,10}"),
        page in 1u32..1000,
        size in 1u32..100,
    ) {
        let mut filters = ListFilters::new(size).with_page(page);
        if let Some(keyword) = keyword {
            filters = filters.with_keyword(keyword);
        }
        if let Some(status) = status {
            filters = filters.with_status(status);
        }
        let parsed = ListFilters::from_query_str(&filters.to_query_string(), DEFAULT_PAGE_SIZE);
        prop_assert_eq!(parsed, filters);
    }
}

#[test]
fn test_pagination_scenario_page_past_the_end() {
    let info: PaginationInfo = serde_json::from_value(json!({
        "currentPage": 11,
        "pageSize": 10,
        "totalPages": 10,
        "totalCount": 95
    }))
    .unwrap();

    assert_eq!(info.total_pages, PaginationInfo::from_counts(1, 10, 95).total_pages);
    assert_eq!(info.current_page, 11);
    assert!(!info.is_in_range());
}

// ===== Domain decoding =====

#[test]
fn test_project_decodes_from_board_payload() {
    let project: Project = serde_json::from_value(json!({
        "id": 7,
        "name": "Renewal",
        "status": "IN_PROGRESS",
        "startAt": "2025-01-02",
        "closeAt": "2025-06-30",
        "customerName": "Acme",
        "developerName": "Initech"
    }))
    .unwrap();

    assert_eq!(project.status, ProjectStatus::InProgress);
    assert_eq!(project.customer_name.as_deref(), Some("Acme"));
}

#[test]
fn test_unknown_status_does_not_break_decoding() {
    let project: Project =
        serde_json::from_value(json!({"id": 1, "name": "x", "status": "ARCHIVED"})).unwrap();
    assert_eq!(project.status, ProjectStatus::Unknown);
}

#[test]
fn test_organization_address_and_type() {
    let organization: Organization = serde_json::from_value(json!({
        "id": 3,
        "type": "DEVELOPER",
        "name": "Initech",
        "streetAddress": "1 Main St",
        "detailAddress": "Suite 4",
        "status": "ACTIVE"
    }))
    .unwrap();

    assert_eq!(organization.kind, OrganizationType::Developer);
    assert!(organization.status.is_active());
    assert_eq!(organization.full_address(), "1 Main St Suite 4");
}

// ===== Validation =====

fn member_input() -> MemberInput {
    MemberInput {
        role: MemberRole::Member,
        organization_id: 3,
        name: "Kim".to_string(),
        email: "kim@example.com".to_string(),
        password: "correct-horse".to_string(),
        phone_num: format_phone_number("01012345678"),
        job_role: "Backend".to_string(),
        job_title: "Lead".to_string(),
        introduction: String::new(),
        remark: String::new(),
    }
}

#[test]
fn test_member_input_validation() {
    assert!(member_input().validate().is_ok());

    let bad_email = MemberInput {
        email: "not-an-email".to_string(),
        ..member_input()
    };
    assert!(bad_email.validate().is_err());

    let short_phone = MemberInput {
        phone_num: "010-1234".to_string(),
        ..member_input()
    };
    let err: CoreError = short_phone.validate().unwrap_err().into();
    assert!(matches!(err, CoreError::Validation(_)));
}

#[test]
fn test_question_input_serializes_links() {
    let input = QuestionInput::new("Spec?", "Where is the spec")
        .with_progress_step(4)
        .with_links(vec![Link::new("Site", "x.com").unwrap()]);

    assert!(input.validate().is_ok());
    let value = serde_json::to_value(&input).unwrap();
    assert_eq!(
        value,
        json!({
            "title": "Spec?",
            "content": "Where is the spec",
            "progressStepId": 4,
            "linkList": [{"name": "Site", "url": "x.com"}]
        })
    );
}
