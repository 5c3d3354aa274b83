//! Cache key namespaces.
//!
//! Two namespaces share the store: `blogs:<tag-or-all>` for list reads and
//! `blog:<id>` for single posts. The trailing colon matters — prefix
//! invalidation is literal `starts_with`, so `"blog:"` does not reach into
//! the `blogs:` namespace.

/// Prefix covering every cached list read, tag-filtered or not.
pub const LIST_PREFIX: &str = "blogs:";

/// Key for a list read; unfiltered lists share the `all` slot.
pub fn post_list(tag: Option<&str>) -> String {
    format!("{LIST_PREFIX}{}", tag.unwrap_or("all"))
}

/// Key for a single post read.
pub fn post(id: &str) -> String {
    format!("blog:{id}")
}
