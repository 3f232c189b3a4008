//! Contract checks for `/posts` on the placeholder blog API.
//!
//! Each function builds one [`ApiCase`]. The literal values asserted here
//! (titles, ids, status sets, latency bounds) are the API's observed
//! contract and must not be loosened.

use std::time::Duration;

use postprobe_domain::{ApiCase, Assertion, DomainResult, FixturePayload};
use serde_json::{Value, json};

use crate::setup::ApiSetup;

/// Latency bound for the timed POST.
pub const CREATE_POST_LATENCY: Duration = Duration::from_millis(700);
/// Latency bound for the timed DELETE.
pub const DELETE_POST_LATENCY: Duration = Duration::from_millis(500);
/// Statuses accepted for a successful DELETE.
pub const DELETE_OK_STATUSES: [u16; 3] = [200, 202, 204];

/// Builder signature shared by every catalog entry.
pub type CaseBuilder = fn(&ApiSetup, &FixturePayload) -> DomainResult<ApiCase>;

/// A named case builder.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    /// Case name, identical to the built case's `name`.
    pub name: &'static str,
    /// Builds the case from the shared fixture.
    pub build: CaseBuilder,
}

const fn entry(name: &'static str, build: CaseBuilder) -> CatalogEntry {
    CatalogEntry { name, build }
}

/// Every check, in declaration order.
pub const ENTRIES: &[CatalogEntry] = &[
    entry("get_request_status_code", |s, _| Ok(get_request_status_code(s))),
    entry("get_comment_status_code", |s, _| Ok(get_comment_status_code(s))),
    entry("get_request_title", |s, _| Ok(get_request_title(s))),
    entry("get_request_body", |s, _| Ok(get_request_body(s))),
    entry("get_request_content_type", |s, _| Ok(get_request_content_type(s))),
    entry("get_request_specific_field", |s, _| Ok(get_request_specific_field(s))),
    entry("post_request_status_code", post_request_status_code),
    entry("post_request_contains_user_id", post_request_contains_user_id),
    entry("post_request_contains_body", post_request_contains_body),
    entry("post_request_data_correctness", post_request_data_correctness),
    entry("create_post_response_time", |s, _| create_post_response_time(s)),
    entry("put_request_status_code", put_request_status_code),
    entry("put_request_response_body", put_request_response_body),
    entry("put_request_no_error_in_response", put_request_no_error_in_response),
    entry("put_update_post_title", |s, _| put_update_post_title(s)),
    entry("delete_request_status_code", |s, _| Ok(delete_request_status_code(s))),
    entry("delete_request_response_time", |s, _| Ok(delete_request_response_time(s))),
    entry("delete_request_empty_body", |s, _| Ok(delete_request_empty_body(s))),
    entry("delete_request_no_error", |s, _| Ok(delete_request_no_error(s))),
    entry("patch_update_post_title", |s, _| patch_update_post_title(s)),
    entry("patch_update_post_title_and_body", |s, _| patch_update_post_title_and_body(s)),
    entry("get_comments_status_code", |s, _| Ok(get_comments_status_code(s))),
    entry("get_comments_content_type", |s, _| Ok(get_comments_content_type(s))),
];

/// Looks up an entry by case name.
#[must_use]
pub fn find(name: &str) -> Option<&'static CatalogEntry> {
    ENTRIES.iter().find(|entry| entry.name == name)
}

/// Builds every case in [`ENTRIES`].
///
/// # Errors
///
/// Returns an error if a fixture record is missing or a body cannot be encoded.
pub fn all(setup: &ApiSetup, fixture: &FixturePayload) -> DomainResult<Vec<ApiCase>> {
    let cases = ENTRIES
        .iter()
        .map(|entry| (entry.build)(setup, fixture))
        .collect::<DomainResult<Vec<_>>>()?;
    tracing::debug!(count = cases.len(), base_url = setup.base_url(), "catalog built");
    Ok(cases)
}

fn get(setup: &ApiSetup, name: &str, path: &str) -> ApiCase {
    ApiCase::get(name, setup.url(path)).expect(Assertion::status(200))
}

fn with_body(case: ApiCase, setup: &ApiSetup, body: &Value) -> DomainResult<ApiCase> {
    case.with_header(setup.header().clone()).with_json_body(body)
}

fn post(setup: &ApiSetup, name: &str, body: &Value) -> DomainResult<ApiCase> {
    with_body(ApiCase::post(name, setup.url("/posts")), setup, body)
        .map(|case| case.expect(Assertion::status(201)))
}

fn put(setup: &ApiSetup, name: &str, id: u64, body: &Value) -> DomainResult<ApiCase> {
    with_body(ApiCase::put(name, setup.url(&format!("/posts/{id}"))), setup, body)
        .map(|case| case.expect(Assertion::status(200)))
}

fn patch(setup: &ApiSetup, name: &str, id: u64, body: &Value) -> DomainResult<ApiCase> {
    with_body(ApiCase::patch(name, setup.url(&format!("/posts/{id}"))), setup, body)
        .map(|case| case.expect(Assertion::status(200)))
}

fn delete(setup: &ApiSetup, name: &str) -> ApiCase {
    ApiCase::delete(name, setup.url("/posts/3")).expect(Assertion::status_in(&DELETE_OK_STATUSES))
}

// GET

/// `GET /posts/2` answers 200.
#[must_use]
pub fn get_request_status_code(setup: &ApiSetup) -> ApiCase {
    get(setup, "get_request_status_code", "/posts/2")
}

/// `GET /posts/1/comments` answers 200.
#[must_use]
pub fn get_comment_status_code(setup: &ApiSetup) -> ApiCase {
    get(setup, "get_comment_status_code", "/posts/1/comments")
}

/// `GET /posts/50` has a `title`.
#[must_use]
pub fn get_request_title(setup: &ApiSetup) -> ApiCase {
    get(setup, "get_request_title", "/posts/50").expect(Assertion::has_field("title"))
}

/// `GET /posts/25` has a `body`.
#[must_use]
pub fn get_request_body(setup: &ApiSetup) -> ApiCase {
    get(setup, "get_request_body", "/posts/25").expect(Assertion::has_field("body"))
}

/// `GET /posts/2` carries a non-empty `Content-Type`.
#[must_use]
pub fn get_request_content_type(setup: &ApiSetup) -> ApiCase {
    get(setup, "get_request_content_type", "/posts/2")
        .expect(Assertion::header_present("Content-Type"))
}

/// `GET /posts/2` is titled "qui est esse".
#[must_use]
pub fn get_request_specific_field(setup: &ApiSetup) -> ApiCase {
    get(setup, "get_request_specific_field", "/posts/2")
        .expect(Assertion::has_field("title"))
        .expect(Assertion::field_equals("title", "qui est esse"))
}

/// `GET /posts/5/comments` answers 200.
#[must_use]
pub fn get_comments_status_code(setup: &ApiSetup) -> ApiCase {
    get(setup, "get_comments_status_code", "/posts/5/comments")
}

/// `GET /posts/2/comments` carries a non-empty `Content-Type`.
#[must_use]
pub fn get_comments_content_type(setup: &ApiSetup) -> ApiCase {
    get(setup, "get_comments_content_type", "/posts/2/comments")
        .expect(Assertion::header_present("Content-Type"))
}

// POST

/// Creating fixture record 1 answers 201.
///
/// # Errors
///
/// Returns an error if the fixture has no record 1.
pub fn post_request_status_code(
    setup: &ApiSetup,
    fixture: &FixturePayload,
) -> DomainResult<ApiCase> {
    post(setup, "post_request_status_code", fixture.get(1)?)
}

/// Creating fixture record 2 echoes a `userId`.
///
/// # Errors
///
/// Returns an error if the fixture has no record 2.
pub fn post_request_contains_user_id(
    setup: &ApiSetup,
    fixture: &FixturePayload,
) -> DomainResult<ApiCase> {
    post(setup, "post_request_contains_user_id", fixture.get(2)?)
        .map(|case| case.expect(Assertion::has_field("userId")))
}

/// Creating fixture record 1 echoes a `body`.
///
/// # Errors
///
/// Returns an error if the fixture has no record 1.
pub fn post_request_contains_body(
    setup: &ApiSetup,
    fixture: &FixturePayload,
) -> DomainResult<ApiCase> {
    post(setup, "post_request_contains_body", fixture.get(1)?)
        .map(|case| case.expect(Assertion::has_field("body")))
}

/// Creating fixture record 0 returns its `title` and `body` unchanged.
///
/// # Errors
///
/// Returns an error if the fixture has no record 0.
pub fn post_request_data_correctness(
    setup: &ApiSetup,
    fixture: &FixturePayload,
) -> DomainResult<ApiCase> {
    let record = fixture.get(0)?;
    post(setup, "post_request_data_correctness", record)
        .map(|case| case.expect_all(Assertion::echoes(record, &["title", "body"])))
}

/// Creating an inline post answers 201 in under 0.7 s.
///
/// # Errors
///
/// Returns an error if the body cannot be encoded.
pub fn create_post_response_time(setup: &ApiSetup) -> DomainResult<ApiCase> {
    let new_post = json!({
        "userId": 1,
        "title": "Response Time Check",
        "body": "Checking response time."
    });
    post(setup, "create_post_response_time", &new_post)
        .map(|case| case.expect(Assertion::faster_than(CREATE_POST_LATENCY)))
}

// PUT

/// Replacing `/posts/1` with fixture record 0 answers 200.
///
/// # Errors
///
/// Returns an error if the fixture has no record 0.
pub fn put_request_status_code(
    setup: &ApiSetup,
    fixture: &FixturePayload,
) -> DomainResult<ApiCase> {
    put(setup, "put_request_status_code", 1, fixture.get(0)?)
}

/// Replacing `/posts/1` keeps `id == 1`.
///
/// # Errors
///
/// Returns an error if the fixture has no record 0.
pub fn put_request_response_body(
    setup: &ApiSetup,
    fixture: &FixturePayload,
) -> DomainResult<ApiCase> {
    put(setup, "put_request_response_body", 1, fixture.get(0)?).map(|case| {
        case.expect(Assertion::has_field("id"))
            .expect(Assertion::field_equals("id", 1))
    })
}

/// Replacing `/posts/1` reports no `error`.
///
/// # Errors
///
/// Returns an error if the fixture has no record 0.
pub fn put_request_no_error_in_response(
    setup: &ApiSetup,
    fixture: &FixturePayload,
) -> DomainResult<ApiCase> {
    put(setup, "put_request_no_error_in_response", 1, fixture.get(0)?)
        .map(|case| case.expect(Assertion::lacks_field("error")))
}

/// Replacing `/posts/50` returns the new title.
///
/// # Errors
///
/// Returns an error if the body cannot be encoded.
pub fn put_update_post_title(setup: &ApiSetup) -> DomainResult<ApiCase> {
    let updated_post = json!({"title": "Updated Title", "body": "This is a new post."});
    put(setup, "put_update_post_title", 50, &updated_post)
        .map(|case| case.expect(Assertion::field_equals("title", "Updated Title")))
}

// DELETE

/// Deleting `/posts/3` answers 200, 202 or 204.
#[must_use]
pub fn delete_request_status_code(setup: &ApiSetup) -> ApiCase {
    delete(setup, "delete_request_status_code")
}

/// Deleting `/posts/3` completes in under 0.5 s.
#[must_use]
pub fn delete_request_response_time(setup: &ApiSetup) -> ApiCase {
    delete(setup, "delete_request_response_time")
        .expect(Assertion::faster_than(DELETE_POST_LATENCY))
}

/// Deleting `/posts/3` returns `{}`.
#[must_use]
pub fn delete_request_empty_body(setup: &ApiSetup) -> ApiCase {
    delete(setup, "delete_request_empty_body").expect(Assertion::empty_json_object())
}

/// Deleting `/posts/3` reports no `error`.
#[must_use]
pub fn delete_request_no_error(setup: &ApiSetup) -> ApiCase {
    delete(setup, "delete_request_no_error").expect(Assertion::lacks_field("error"))
}

// PATCH

/// Patching the title of `/posts/60` returns it.
///
/// # Errors
///
/// Returns an error if the body cannot be encoded.
pub fn patch_update_post_title(setup: &ApiSetup) -> DomainResult<ApiCase> {
    let updated_field = json!({"title": "Partially Updated Title"});
    patch(setup, "patch_update_post_title", 60, &updated_field)
        .map(|case| case.expect(Assertion::field_equals("title", "Partially Updated Title")))
}

/// Patching title and body of `/posts/62` returns the title and a body.
///
/// # Errors
///
/// Returns an error if the body cannot be encoded.
pub fn patch_update_post_title_and_body(setup: &ApiSetup) -> DomainResult<ApiCase> {
    let updated_fields = json!({
        "title": "Partially Updated Title",
        "body": "Partially updated content of the post."
    });
    patch(setup, "patch_update_post_title_and_body", 62, &updated_fields).map(|case| {
        case.expect(Assertion::field_equals("title", "Partially Updated Title"))
            .expect(Assertion::field_truthy("body"))
    })
}
