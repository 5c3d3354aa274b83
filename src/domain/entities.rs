//! Wire records mirrored from the remote blog service.

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::domain::tags;

/// A blog post as the remote service returns it.
///
/// Field names follow the service's camelCase wire format. `tags` may arrive
/// either as a sequence or as a single comma-separated string; both normalize
/// to trimmed, non-empty entries in arrival order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default, deserialize_with = "tags::string_or_seq")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub blog_image: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(default)]
    pub likes: u64,
    #[serde(default)]
    pub comments: Vec<Comment>,
    #[serde(default)]
    pub views: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub username: String,
    pub text: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// One entry of the popular-tag listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PopularTag {
    pub tag: String,
    #[serde(default)]
    pub count: u64,
}

/// Orders posts newest-first by `created_at`; ties keep arrival order.
pub fn sort_by_recency(posts: &mut [Post]) {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
}
