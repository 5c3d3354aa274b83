//! Cache-aside blog client.
//!
//! Reads that the original front-end cached — the post list per tag and
//! single posts — check the cache first and populate it on miss. Updates and
//! deletes invalidate the touched post plus every cached list before
//! returning. Creates, likes, comments, and view bumps deliberately do not
//! invalidate: cached reads stay stale until the TTL runs out, a documented
//! trade-off of the service this client mirrors.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::cache::{CacheConfig, TtlCache, keys};
use crate::client::error::ApiError;
use crate::client::http::{HttpTransport, ImageUpload, Transport};
use crate::client::models::{
    CommentRequest, CreatePostRequest, LoginRequest, RegisterRequest, UpdatePostRequest,
};
use crate::config::Settings;
use crate::domain::{DomainError, PopularTag, Post};

pub struct BlogClient {
    transport: Arc<dyn Transport>,
    cache: TtlCache,
}

impl BlogClient {
    pub fn new(transport: Arc<dyn Transport>, cache: TtlCache) -> Self {
        Self { transport, cache }
    }

    /// Wires an [`HttpTransport`] and cache from resolved settings.
    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        let transport = HttpTransport::new(
            &settings.api.base_url,
            settings.api.token.clone(),
            settings.api.timeout,
        )?;
        Ok(Self::new(
            Arc::new(transport),
            TtlCache::new(settings.cache.clone()),
        ))
    }

    /// Builds a client with the default cache configuration; mostly useful
    /// for embedding the library without the config layer.
    pub fn with_default_cache(transport: Arc<dyn Transport>) -> Self {
        Self::new(transport, TtlCache::new(CacheConfig::default()))
    }

    // ------------------------------------------------------------------
    // Cached reads
    // ------------------------------------------------------------------

    pub async fn list_posts(&self, tag: Option<&str>) -> Result<Vec<Post>, ApiError> {
        let key = keys::post_list(tag);
        if let Some(cached) = self.cache.get(&key) {
            debug!(%key, "serving post list from cache");
            return from_cached(cached);
        }

        let posts = self.transport.list_posts(tag).await?;
        self.cache.set(key, to_cached(&posts)?);
        Ok(posts)
    }

    pub async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        let key = keys::post(id);
        if let Some(cached) = self.cache.get(&key) {
            debug!(%key, "serving post from cache");
            return from_cached(cached);
        }

        let post = self.transport.get_post(id).await?;
        self.cache.set(key, to_cached(&post)?);
        Ok(post)
    }

    // ------------------------------------------------------------------
    // Uncached reads
    // ------------------------------------------------------------------

    /// Search results are query-specific; they always hit the network.
    pub async fn search_posts(&self, query: &str) -> Result<Vec<Post>, ApiError> {
        self.transport.search_posts(query).await
    }

    pub async fn sort_posts(&self, by: &str) -> Result<Vec<Post>, ApiError> {
        self.transport.sort_posts(by).await
    }

    pub async fn posts_by_tag(&self, tag: &str) -> Result<Vec<Post>, ApiError> {
        self.transport.posts_by_tag(tag).await
    }

    pub async fn all_tags(&self) -> Result<Vec<String>, ApiError> {
        self.transport.all_tags().await
    }

    pub async fn popular_tags(&self) -> Result<Vec<PopularTag>, ApiError> {
        self.transport.popular_tags().await
    }

    // ------------------------------------------------------------------
    // Engagement writes (no invalidation)
    // ------------------------------------------------------------------

    pub async fn like_post(&self, id: &str) -> Result<u64, ApiError> {
        self.transport.like_post(id).await
    }

    pub async fn add_comment(&self, id: &str, comment: &CommentRequest) -> Result<Post, ApiError> {
        self.transport.add_comment(id, comment).await
    }

    /// View bumps are fire-and-forget telemetry; callers are expected to log
    /// and drop failures rather than surface them.
    pub async fn record_view(&self, id: &str) -> Result<(), ApiError> {
        self.transport.record_view(id).await
    }

    // ------------------------------------------------------------------
    // Account
    // ------------------------------------------------------------------

    pub async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        self.transport.register(request).await
    }

    pub async fn login(&self, request: &LoginRequest) -> Result<String, ApiError> {
        self.transport.login(request).await
    }

    // ------------------------------------------------------------------
    // Authoring writes
    // ------------------------------------------------------------------

    pub async fn create_post(&self, request: &CreatePostRequest) -> Result<Post, ApiError> {
        validate_post_input(&request.title, &request.content)?;
        // No invalidation here: a fresh post shows up in cached lists only
        // once their TTL lapses.
        self.transport.create_post(request).await
    }

    pub async fn update_post(
        &self,
        id: &str,
        request: &UpdatePostRequest,
    ) -> Result<Post, ApiError> {
        validate_post_input(&request.title, &request.content)?;
        let post = self.transport.update_post(id, request).await?;
        self.invalidate_post(id);
        Ok(post)
    }

    pub async fn delete_post(&self, id: &str) -> Result<(), ApiError> {
        self.transport.delete_post(id).await?;
        self.invalidate_post(id);
        Ok(())
    }

    pub async fn upload_image(&self, upload: ImageUpload) -> Result<String, ApiError> {
        self.transport.upload_image(upload).await
    }

    pub async fn attach_image(&self, id: &str, upload: ImageUpload) -> Result<String, ApiError> {
        self.transport.attach_image(id, upload).await
    }

    /// The edited post could appear in any cached list, so the sweep covers
    /// the whole list namespace alongside the post's own key.
    fn invalidate_post(&self, id: &str) {
        self.cache.remove(&keys::post(id));
        self.cache.invalidate_prefix(keys::LIST_PREFIX);
    }
}

fn to_cached<T: Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(ApiError::decode)
}

fn from_cached<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(ApiError::decode)
}

fn validate_post_input(title: &str, content: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::validation("post title must not be empty"));
    }
    if content.trim().is_empty() {
        return Err(DomainError::validation("post content must not be empty"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use time::macros::datetime;

    use super::*;
    use crate::cache::ManualClock;

    fn sample_post(id: &str) -> Post {
        Post {
            id: id.to_string(),
            title: format!("Post {id}"),
            content: "# Hello".to_string(),
            tags: vec!["rust".to_string()],
            blog_image: None,
            created_at: datetime!(2024-05-01 10:00 UTC),
            likes: 1,
            comments: Vec::new(),
            views: 2,
        }
    }

    #[derive(Default)]
    struct RecordingTransport {
        list_calls: AtomicUsize,
        get_calls: AtomicUsize,
    }

    #[async_trait]
    impl Transport for RecordingTransport {
        async fn list_posts(&self, _tag: Option<&str>) -> Result<Vec<Post>, ApiError> {
            self.list_calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![sample_post("1"), sample_post("2")])
        }

        async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
            self.get_calls.fetch_add(1, Ordering::SeqCst);
            Ok(sample_post(id))
        }

        async fn search_posts(&self, _query: &str) -> Result<Vec<Post>, ApiError> {
            Ok(Vec::new())
        }

        async fn sort_posts(&self, _by: &str) -> Result<Vec<Post>, ApiError> {
            Ok(Vec::new())
        }

        async fn posts_by_tag(&self, _tag: &str) -> Result<Vec<Post>, ApiError> {
            Ok(Vec::new())
        }

        async fn all_tags(&self) -> Result<Vec<String>, ApiError> {
            Ok(Vec::new())
        }

        async fn popular_tags(&self) -> Result<Vec<PopularTag>, ApiError> {
            Ok(Vec::new())
        }

        async fn like_post(&self, _id: &str) -> Result<u64, ApiError> {
            Ok(5)
        }

        async fn add_comment(
            &self,
            id: &str,
            _comment: &CommentRequest,
        ) -> Result<Post, ApiError> {
            Ok(sample_post(id))
        }

        async fn record_view(&self, _id: &str) -> Result<(), ApiError> {
            Ok(())
        }

        async fn register(&self, _request: &RegisterRequest) -> Result<(), ApiError> {
            Ok(())
        }

        async fn login(&self, _request: &LoginRequest) -> Result<String, ApiError> {
            Ok("token".to_string())
        }

        async fn create_post(&self, _request: &CreatePostRequest) -> Result<Post, ApiError> {
            Ok(sample_post("new"))
        }

        async fn update_post(
            &self,
            id: &str,
            _request: &UpdatePostRequest,
        ) -> Result<Post, ApiError> {
            Ok(sample_post(id))
        }

        async fn delete_post(&self, _id: &str) -> Result<(), ApiError> {
            Ok(())
        }

        async fn upload_image(&self, _upload: ImageUpload) -> Result<String, ApiError> {
            Ok("https://cdn.example.com/i.png".to_string())
        }

        async fn attach_image(
            &self,
            _id: &str,
            _upload: ImageUpload,
        ) -> Result<String, ApiError> {
            Ok("https://cdn.example.com/i.png".to_string())
        }
    }

    fn client() -> (BlogClient, Arc<RecordingTransport>, Arc<ManualClock>) {
        let transport = Arc::new(RecordingTransport::default());
        let clock = Arc::new(ManualClock::new());
        let cache = TtlCache::with_clock(CacheConfig::default(), clock.clone());
        (
            BlogClient::new(transport.clone(), cache),
            transport,
            clock,
        )
    }

    fn update_request() -> UpdatePostRequest {
        UpdatePostRequest {
            title: "T".to_string(),
            content: "C".to_string(),
            tags: Vec::new(),
            blog_image: None,
        }
    }

    #[tokio::test]
    async fn repeated_list_within_ttl_hits_network_once() {
        let (client, transport, _) = client();

        let first = client.list_posts(None).await.expect("first list");
        let second = client.list_posts(None).await.expect("second list");

        assert_eq!(first, second);
        assert_eq!(transport.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn expired_list_refetches() {
        let (client, transport, clock) = client();

        client.list_posts(None).await.expect("first list");
        clock.advance(300_001);
        client.list_posts(None).await.expect("second list");

        assert_eq!(transport.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn tag_filtered_lists_cache_separately() {
        let (client, transport, _) = client();

        client.list_posts(None).await.expect("unfiltered");
        client.list_posts(Some("rust")).await.expect("filtered");
        client.list_posts(Some("rust")).await.expect("filtered again");

        assert_eq!(transport.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn get_post_reads_through_cache() {
        let (client, transport, _) = client();

        client.get_post("1").await.expect("first get");
        client.get_post("1").await.expect("second get");
        client.get_post("2").await.expect("other post");

        assert_eq!(transport.get_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn update_invalidates_detail_and_lists() {
        let (client, transport, _) = client();

        client.list_posts(None).await.expect("warm list");
        client.list_posts(Some("rust")).await.expect("warm filtered");
        client.get_post("1").await.expect("warm detail");

        client
            .update_post("1", &update_request())
            .await
            .expect("update");

        client.list_posts(None).await.expect("list refetch");
        client.list_posts(Some("rust")).await.expect("filtered refetch");
        client.get_post("1").await.expect("detail refetch");

        assert_eq!(transport.list_calls.load(Ordering::SeqCst), 4);
        assert_eq!(transport.get_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn delete_invalidates_like_update() {
        let (client, transport, _) = client();

        client.list_posts(None).await.expect("warm list");
        client.delete_post("1").await.expect("delete");
        client.list_posts(None).await.expect("list refetch");

        assert_eq!(transport.list_calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn create_leaves_cached_lists_alone() {
        let (client, transport, _) = client();

        client.list_posts(None).await.expect("warm list");
        client
            .create_post(&CreatePostRequest {
                title: "T".to_string(),
                content: "C".to_string(),
                tags: Vec::new(),
                blog_image: None,
            })
            .await
            .expect("create");
        client.list_posts(None).await.expect("list again");

        // Still the cached snapshot; staleness until TTL is the documented
        // behavior of the service this client mirrors.
        assert_eq!(transport.list_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn likes_and_comments_do_not_invalidate() {
        let (client, transport, _) = client();

        client.get_post("1").await.expect("warm detail");
        client.like_post("1").await.expect("like");
        client
            .add_comment(
                "1",
                &CommentRequest {
                    username: "ada".to_string(),
                    text: "hi".to_string(),
                },
            )
            .await
            .expect("comment");
        client.record_view("1").await.expect("view");
        client.get_post("1").await.expect("detail again");

        assert_eq!(transport.get_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn empty_title_or_content_is_rejected_before_sending() {
        let (client, _, _) = client();

        let mut request = update_request();
        request.title = "   ".to_string();
        let err = client
            .update_post("1", &request)
            .await
            .expect_err("blank title rejected");
        assert!(matches!(err, ApiError::Domain(_)));
    }
}
