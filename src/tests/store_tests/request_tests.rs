// Contact Request Tests - Testing ContactRequest and RequestStatus

use crate::store::{ContactRequest, RequestStatus};

#[test]
fn test_request_creation() {
    let request = ContactRequest::new("uid_a".to_string(), "uid_b".to_string());

    assert!(!request.id.is_empty());
    assert_eq!(request.from_user_id, "uid_a");
    assert_eq!(request.to_user_id, "uid_b");
    assert_eq!(request.status, RequestStatus::Pending);
}

#[test]
fn test_is_between_is_ordered() {
    let request = ContactRequest::new("uid_a".to_string(), "uid_b".to_string());

    assert!(request.is_between("uid_a", "uid_b"));
    // The pair is ordered: B requesting A is a different request.
    assert!(!request.is_between("uid_b", "uid_a"));
}

#[test]
fn test_status_tags() {
    assert_eq!(
        serde_json::to_string(&RequestStatus::Pending).unwrap(),
        "\"pending\""
    );
    assert_eq!(
        serde_json::to_string(&RequestStatus::Accepted).unwrap(),
        "\"accepted\""
    );
    assert_eq!(
        serde_json::to_string(&RequestStatus::Rejected).unwrap(),
        "\"rejected\""
    );
}

#[test]
fn test_request_serialization() {
    let request = ContactRequest::new("uid_a".to_string(), "uid_b".to_string());

    let json = serde_json::to_string(&request).expect("Failed to serialize request");
    let loaded: ContactRequest =
        serde_json::from_str(&json).expect("Failed to deserialize request");

    assert_eq!(loaded.id, request.id);
    assert_eq!(loaded.status, RequestStatus::Pending);
}
