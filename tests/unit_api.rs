// Unit tests for the forum API types.
//
// Tests serde deserialization of backend payloads, auth response handling,
// and category parsing/filtering — all without network access.

use carecorner::api::client::parse_message;
use carecorner::api::models::{
    AuthResponse, Category, CategoryFilter, NewComment, NewPost, Post,
};

#[test]
fn deserialize_post_list_entry() {
    let json = r#"{
        "id": 12,
        "title": "Exam stress",
        "category": "Academics",
        "content": "Finals are next week and I can't sleep.",
        "timestamp": "2026-10-15T09:30:00.123456",
        "author_id": 4,
        "is_anonymous": false,
        "author_name": "Riley",
        "comment_count": 3
    }"#;
    let post: Post = serde_json::from_str(json).unwrap();
    assert_eq!(post.id, 12);
    assert_eq!(post.category, "Academics");
    assert_eq!(post.author_id, Some(4));
    assert_eq!(post.comment_count, Some(3));
    assert!(post.comments.is_none());
    assert_eq!(post.comment_total(), 3);
    assert_eq!(post.author_display(), "Riley");
}

#[test]
fn deserialize_post_detail_with_comments() {
    let json = r#"{
        "id": 5,
        "title": "Untitled",
        "category": "General",
        "content": "hello",
        "timestamp": "2026-10-15T09:30:00+00:00",
        "author_id": 2,
        "is_anonymous": true,
        "author_name": "Anonymous",
        "comments": [
            {"id": 1, "content": "You've got this", "timestamp": "2026-10-15T10:00:00", "author_name": "Anonymous Friend"},
            {"id": 2, "content": "Same here", "timestamp": null, "author_name": null}
        ]
    }"#;
    let post: Post = serde_json::from_str(json).unwrap();
    let comments = post.comments.as_ref().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(post.comment_total(), 2);
    assert_eq!(comments[1].author_display(), "Anonymous Friend");
    assert!(comments[1].timestamp.is_none());
}

#[test]
fn missing_title_defaults_to_untitled() {
    let json = r#"{"id": 1, "category": "Career", "content": "x"}"#;
    let post: Post = serde_json::from_str(json).unwrap();
    assert_eq!(post.title, "Untitled");
    assert!(!post.is_anonymous);
    assert_eq!(post.comment_total(), 0);
}

#[test]
fn anonymous_post_never_shows_author() {
    let json = r#"{"id": 1, "category": "Career", "content": "x", "is_anonymous": true, "author_name": "Jordan"}"#;
    let post: Post = serde_json::from_str(json).unwrap();
    assert_eq!(post.author_display(), "Anonymous");
}

#[test]
fn auth_success_becomes_session_user() {
    let resp: AuthResponse =
        serde_json::from_str(r#"{"success": true, "user_id": 9, "name": "Ash"}"#).unwrap();
    let user = resp.into_user("Invalid credentials").unwrap();
    assert_eq!(user.user_id, 9);
    assert_eq!(user.name, "Ash");
}

#[test]
fn auth_failure_uses_backend_message() {
    let resp: AuthResponse =
        serde_json::from_str(r#"{"success": false, "message": "Email already exists"}"#).unwrap();
    let err = resp.into_user("Registration failed").unwrap_err();
    assert_eq!(err.to_string(), "Email already exists");
}

#[test]
fn auth_failure_without_message_uses_fallback() {
    let resp: AuthResponse = serde_json::from_str(r#"{"success": false}"#).unwrap();
    let err = resp.into_user("Invalid credentials").unwrap_err();
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[test]
fn error_envelope_message_is_extracted() {
    assert_eq!(
        parse_message(r#"{"success": false, "message": "Missing required fields"}"#).as_deref(),
        Some("Missing required fields")
    );
    assert_eq!(parse_message(""), None);
}

#[test]
fn new_post_serializes_backend_field_names() {
    let body = serde_json::to_value(NewPost {
        title: "Untitled".to_string(),
        category: "Mental Health".to_string(),
        content: "Rough week".to_string(),
        author_id: 7,
        is_anonymous: true,
    })
    .unwrap();
    assert_eq!(body["category"], "Mental Health");
    assert_eq!(body["author_id"], 7);
    assert_eq!(body["is_anonymous"], true);

    let body = serde_json::to_value(NewComment {
        content: "Sending hugs".to_string(),
        author_id: 7,
    })
    .unwrap();
    assert_eq!(body["content"], "Sending hugs");
    assert_eq!(body["author_id"], 7);
}

// ============================================================
// Categories
// ============================================================

#[test]
fn category_parses_labels_and_slugs() {
    assert_eq!("Mental Health".parse::<Category>(), Ok(Category::MentalHealth));
    assert_eq!("mental-health".parse::<Category>(), Ok(Category::MentalHealth));
    assert_eq!("MENTAL_HEALTH".parse::<Category>(), Ok(Category::MentalHealth));
    assert_eq!("career".parse::<Category>(), Ok(Category::Career));
    assert!("sports".parse::<Category>().is_err());
}

#[test]
fn category_round_trips_through_display() {
    for category in Category::ALL {
        assert_eq!(category.to_string().parse::<Category>(), Ok(category));
    }
}

#[test]
fn category_filter_parses_all() {
    assert_eq!("All".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
    assert_eq!("all".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
    assert_eq!(
        "Relationships".parse::<CategoryFilter>(),
        Ok(CategoryFilter::Only(Category::Relationships))
    );
}

#[test]
fn category_filter_matches_exact_label() {
    let post: Post =
        serde_json::from_str(r#"{"id": 1, "category": "Mental Health", "content": "x"}"#).unwrap();
    assert!(CategoryFilter::All.matches(&post));
    assert!(CategoryFilter::Only(Category::MentalHealth).matches(&post));
    assert!(!CategoryFilter::Only(Category::General).matches(&post));
}
