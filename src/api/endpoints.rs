//! The concrete collection endpoints the archiver visits.

use crate::api::endpoint::Endpoint;

/// Active subscriptions list (single page).
pub fn subscriptions() -> Endpoint {
    Endpoint::new("subscriptions", "subscriptions").unpaged()
}

/// Account records for a set of account ids (single page; the record list
/// sits directly under the top-level `response` key).
pub fn accounts(ids: &[String]) -> Endpoint {
    Endpoint::new(format!("account?ids={}", ids.join(",")), "response")
        .top_level()
        .unpaged()
}

/// A creator's timeline posts, newest first.
pub fn timeline(account_id: &str) -> Endpoint {
    Endpoint::new(format!("timeline/{}", account_id), "posts")
}

/// Message group directory.
pub fn groups() -> Endpoint {
    Endpoint::new(
        "messaging/groups?sortOrder=1&flags=0&subscriptionTierId=&search=&limit=25",
        "data",
    )
    .with_offset_field("offset")
    .with_id_field("groupId")
}

/// Message history for one group, newest first.
pub fn messages(group_id: &str) -> Endpoint {
    Endpoint::new(format!("message?groupId={}", group_id), "messages")
}
