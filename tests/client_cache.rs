//! End-to-end cache behavior over the public client API, with a
//! call-counting transport standing in for the network.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use foglio::cache::{CacheConfig, ManualClock, TtlCache};
use foglio::client::models::{
    CommentRequest, CreatePostRequest, LoginRequest, RegisterRequest, UpdatePostRequest,
};
use foglio::client::{ApiError, BlogClient, ImageUpload, Transport};
use foglio::domain::{PopularTag, Post};
use time::macros::datetime;

fn sample_post(id: &str) -> Post {
    Post {
        id: id.to_string(),
        title: format!("Post {id}"),
        content: "# Hello\n\nBody.".to_string(),
        tags: vec!["rust".to_string()],
        blog_image: None,
        created_at: datetime!(2024-05-01 10:00 UTC),
        likes: 0,
        comments: Vec::new(),
        views: 0,
    }
}

#[derive(Default)]
struct CountingTransport {
    list_calls: AtomicUsize,
    get_calls: AtomicUsize,
    update_calls: AtomicUsize,
}

#[async_trait]
impl Transport for CountingTransport {
    async fn list_posts(&self, _tag: Option<&str>) -> Result<Vec<Post>, ApiError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        Ok(vec![sample_post("1")])
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
        Ok(1)
    }

    async fn add_comment(&self, id: &str, _comment: &CommentRequest) -> Result<Post, ApiError> {
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

    async fn update_post(&self, id: &str, _request: &UpdatePostRequest) -> Result<Post, ApiError> {
        self.update_calls.fetch_add(1, Ordering::SeqCst);
        Ok(sample_post(id))
    }

    async fn delete_post(&self, _id: &str) -> Result<(), ApiError> {
        Ok(())
    }

    async fn upload_image(&self, _upload: ImageUpload) -> Result<String, ApiError> {
        Ok("https://cdn.example.com/i.png".to_string())
    }

    async fn attach_image(&self, _id: &str, _upload: ImageUpload) -> Result<String, ApiError> {
        Ok("https://cdn.example.com/i.png".to_string())
    }
}

fn harness() -> (BlogClient, Arc<CountingTransport>, Arc<ManualClock>) {
    let transport = Arc::new(CountingTransport::default());
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
        title: "Edited".to_string(),
        content: "# Edited".to_string(),
        tags: Vec::new(),
        blog_image: None,
    }
}

#[tokio::test]
async fn cold_warm_update_refetch_scenario() {
    let (client, transport, _) = harness();

    // Cold cache: the network is hit exactly once.
    let first = client.list_posts(None).await.expect("cold list");
    assert_eq!(transport.list_calls.load(Ordering::SeqCst), 1);

    // Within the TTL the same snapshot comes back without network traffic.
    let second = client.list_posts(None).await.expect("warm list");
    assert_eq!(first, second);
    assert_eq!(transport.list_calls.load(Ordering::SeqCst), 1);

    // A write to any post clears every cached list.
    client
        .update_post("1", &update_request())
        .await
        .expect("update");
    assert_eq!(transport.update_calls.load(Ordering::SeqCst), 1);

    client.list_posts(None).await.expect("list after update");
    assert_eq!(transport.list_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn ttl_expiry_refetches_detail_reads() {
    let (client, transport, clock) = harness();

    client.get_post("1").await.expect("cold get");
    client.get_post("1").await.expect("warm get");
    assert_eq!(transport.get_calls.load(Ordering::SeqCst), 1);

    clock.advance(299_999);
    client.get_post("1").await.expect("still warm");
    assert_eq!(transport.get_calls.load(Ordering::SeqCst), 1);

    clock.advance(2);
    client.get_post("1").await.expect("expired get");
    assert_eq!(transport.get_calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn update_leaves_unrelated_detail_entries_alone() {
    let (client, transport, _) = harness();

    client.get_post("1").await.expect("warm post 1");
    client.get_post("2").await.expect("warm post 2");
    assert_eq!(transport.get_calls.load(Ordering::SeqCst), 2);

    client
        .update_post("1", &update_request())
        .await
        .expect("update post 1");

    // Post 2's detail entry survives; only "blog:1" and the list namespace
    // were invalidated.
    client.get_post("2").await.expect("post 2 still cached");
    assert_eq!(transport.get_calls.load(Ordering::SeqCst), 2);

    client.get_post("1").await.expect("post 1 refetched");
    assert_eq!(transport.get_calls.load(Ordering::SeqCst), 3);
}
