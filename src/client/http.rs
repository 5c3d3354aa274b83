//! HTTP transport for the blog API.
//!
//! One thin wrapper over `reqwest`: path joining against the configured base
//! URL, query assembly, JSON bodies, multipart uploads, and the bearer token
//! on protected calls. Every endpoint of the service is a method on
//! [`Transport`]; the cache-aside layer only ever talks to the trait.

use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::client::error::ApiError;
use crate::client::models::{
    CommentRequest, CreatePostRequest, LikeResponse, LoginRequest, LoginResponse, RegisterRequest,
    UpdatePostRequest, UploadResponse,
};
use crate::domain::{PopularTag, Post};

/// File content plus name for a multipart image upload. The part's MIME type
/// is guessed from the filename.
#[derive(Debug, Clone)]
pub struct ImageUpload {
    pub filename: String,
    pub bytes: Bytes,
}

/// The raw endpoint surface of the remote service.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn list_posts(&self, tag: Option<&str>) -> Result<Vec<Post>, ApiError>;
    async fn get_post(&self, id: &str) -> Result<Post, ApiError>;
    async fn search_posts(&self, query: &str) -> Result<Vec<Post>, ApiError>;
    async fn sort_posts(&self, by: &str) -> Result<Vec<Post>, ApiError>;
    async fn posts_by_tag(&self, tag: &str) -> Result<Vec<Post>, ApiError>;
    async fn all_tags(&self) -> Result<Vec<String>, ApiError>;
    async fn popular_tags(&self) -> Result<Vec<PopularTag>, ApiError>;
    async fn like_post(&self, id: &str) -> Result<u64, ApiError>;
    async fn add_comment(&self, id: &str, comment: &CommentRequest) -> Result<Post, ApiError>;
    async fn record_view(&self, id: &str) -> Result<(), ApiError>;
    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError>;
    async fn login(&self, request: &LoginRequest) -> Result<String, ApiError>;
    async fn create_post(&self, request: &CreatePostRequest) -> Result<Post, ApiError>;
    async fn update_post(&self, id: &str, request: &UpdatePostRequest) -> Result<Post, ApiError>;
    async fn delete_post(&self, id: &str) -> Result<(), ApiError>;
    async fn upload_image(&self, upload: ImageUpload) -> Result<String, ApiError>;
    async fn attach_image(&self, id: &str, upload: ImageUpload) -> Result<String, ApiError>;
}

#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    base: Url,
    token: Option<String>,
}

impl HttpTransport {
    /// Builds a transport against `base_url`. The token is optional; calls
    /// that need one fail with [`ApiError::MissingToken`] instead of going
    /// out unauthenticated.
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> Result<Self, ApiError> {
        // A trailing slash keeps relative joins inside the configured path.
        let mut normalized = base_url.to_string();
        if !normalized.ends_with('/') {
            normalized.push('/');
        }
        let base = Url::parse(&normalized)?;
        let client = Client::builder()
            .user_agent(Self::user_agent())
            .timeout(timeout)
            .build()?;
        Ok(Self {
            client,
            base,
            token,
        })
    }

    pub fn user_agent() -> &'static str {
        concat!("foglio/", env!("CARGO_PKG_VERSION"))
    }

    fn url(&self, path: &str) -> Result<Url, ApiError> {
        self.base.join(path).map_err(ApiError::Url)
    }

    fn token(&self) -> Result<&str, ApiError> {
        self.token.as_deref().ok_or(ApiError::MissingToken)
    }

    fn builder(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        authed: bool,
    ) -> Result<reqwest::RequestBuilder, ApiError> {
        let mut url = self.url(path)?;
        if let Some(pairs) = query {
            url.set_query(None);
            let mut qp = url.query_pairs_mut();
            for (key, value) in pairs {
                qp.append_pair(key, value);
            }
        }

        let mut request = self.client.request(method, url);
        if authed {
            request = request.bearer_auth(self.token()?);
        }
        Ok(request)
    }

    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: Option<&[(&str, String)]>,
        body: Option<&Value>,
        authed: bool,
    ) -> Result<T, ApiError> {
        let mut request = self.builder(method, path, query, authed)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        Self::handle(response).await
    }

    /// Like `request`, but a success with an empty body resolves to `None`
    /// instead of a JSON parse error.
    async fn request_opt<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        authed: bool,
    ) -> Result<Option<T>, ApiError> {
        let mut request = self.builder(method, path, None, authed)?;
        if let Some(body) = body {
            request = request.json(body);
        }
        let response = request.send().await?;
        let status = response.status();
        let bytes = response.bytes().await?;
        parse_optional(status, &bytes)
    }

    async fn handle<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        let bytes = response.bytes().await?;
        parse_required(status, &bytes)
    }

    async fn upload(&self, path: &str, upload: ImageUpload) -> Result<String, ApiError> {
        let mime = mime_guess::from_path(&upload.filename).first_or_octet_stream();
        let part = Part::bytes(upload.bytes.to_vec())
            .file_name(upload.filename)
            .mime_str(mime.essence_str())?;
        let form = Form::new().part("image", part);

        let request = self.builder(Method::POST, path, None, true)?.multipart(form);
        let response = request.send().await?;
        let payload: UploadResponse = Self::handle(response).await?;
        Ok(payload.image_url)
    }

    fn json_body<T: Serialize>(value: &T) -> Result<Value, ApiError> {
        serde_json::to_value(value).map_err(ApiError::decode)
    }
}

fn parse_required<T: DeserializeOwned>(status: StatusCode, bytes: &[u8]) -> Result<T, ApiError> {
    if !status.is_success() {
        return Err(ApiError::from_status(status.as_u16(), bytes));
    }
    serde_json::from_slice(bytes).map_err(ApiError::decode)
}

fn parse_optional<T: DeserializeOwned>(
    status: StatusCode,
    bytes: &[u8],
) -> Result<Option<T>, ApiError> {
    if !status.is_success() {
        return Err(ApiError::from_status(status.as_u16(), bytes));
    }
    if bytes.is_empty() {
        return Ok(None);
    }
    serde_json::from_slice(bytes).map(Some).map_err(ApiError::decode)
}

#[async_trait]
impl Transport for HttpTransport {
    async fn list_posts(&self, tag: Option<&str>) -> Result<Vec<Post>, ApiError> {
        let query = tag.map(|tag| vec![("tag", tag.to_string())]);
        self.request(Method::GET, "blogs", query.as_deref(), None, false)
            .await
    }

    async fn get_post(&self, id: &str) -> Result<Post, ApiError> {
        let path = format!("blogs/{id}");
        self.request(Method::GET, &path, None, None, false).await
    }

    async fn search_posts(&self, query: &str) -> Result<Vec<Post>, ApiError> {
        let pairs = [("q", query.to_string())];
        self.request(Method::GET, "blogs/search", Some(&pairs), None, false)
            .await
    }

    async fn sort_posts(&self, by: &str) -> Result<Vec<Post>, ApiError> {
        let pairs = [("by", by.to_string())];
        self.request(Method::GET, "blogs/sort", Some(&pairs), None, false)
            .await
    }

    async fn posts_by_tag(&self, tag: &str) -> Result<Vec<Post>, ApiError> {
        let path = format!("blogs/tag/{tag}");
        self.request(Method::GET, &path, None, None, false).await
    }

    async fn all_tags(&self) -> Result<Vec<String>, ApiError> {
        self.request(Method::GET, "blogs/tags/all", None, None, false)
            .await
    }

    async fn popular_tags(&self) -> Result<Vec<PopularTag>, ApiError> {
        self.request(Method::GET, "blogs/tags/popular", None, None, false)
            .await
    }

    async fn like_post(&self, id: &str) -> Result<u64, ApiError> {
        let path = format!("blogs/{id}/like");
        let payload: LikeResponse = self.request(Method::POST, &path, None, None, false).await?;
        Ok(payload.likes)
    }

    async fn add_comment(&self, id: &str, comment: &CommentRequest) -> Result<Post, ApiError> {
        let path = format!("blogs/{id}/comment");
        let body = Self::json_body(comment)?;
        self.request(Method::POST, &path, None, Some(&body), false)
            .await
    }

    async fn record_view(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("blogs/{id}/view");
        self.request_opt::<Value>(Method::POST, &path, None, false)
            .await?;
        Ok(())
    }

    async fn register(&self, request: &RegisterRequest) -> Result<(), ApiError> {
        let body = Self::json_body(request)?;
        self.request_opt::<Value>(Method::POST, "admin/register", Some(&body), false)
            .await?;
        Ok(())
    }

    async fn login(&self, request: &LoginRequest) -> Result<String, ApiError> {
        let body = Self::json_body(request)?;
        let payload: LoginResponse = self
            .request(Method::POST, "admin/login", None, Some(&body), false)
            .await?;
        Ok(payload.token)
    }

    async fn create_post(&self, request: &CreatePostRequest) -> Result<Post, ApiError> {
        let body = Self::json_body(request)?;
        self.request(Method::POST, "blogs", None, Some(&body), true)
            .await
    }

    async fn update_post(&self, id: &str, request: &UpdatePostRequest) -> Result<Post, ApiError> {
        let path = format!("blogs/{id}");
        let body = Self::json_body(request)?;
        self.request(Method::PUT, &path, None, Some(&body), true)
            .await
    }

    async fn delete_post(&self, id: &str) -> Result<(), ApiError> {
        let path = format!("blogs/{id}");
        self.request_opt::<Value>(Method::DELETE, &path, None, true)
            .await?;
        Ok(())
    }

    async fn upload_image(&self, upload: ImageUpload) -> Result<String, ApiError> {
        self.upload("blogs/upload", upload).await
    }

    async fn attach_image(&self, id: &str, upload: ImageUpload) -> Result<String, ApiError> {
        let path = format!("blogs/{id}/upload-image");
        self.upload(&path, upload).await
    }
}
