use axum::http::{HeaderMap, HeaderValue};
use reqwest::header;
use serde::de::DeserializeOwned;
use serde_json::json;

use crate::{
    config::HashnodeConfig,
    error::FetchError,
    records::{Article, Series},
};

use super::{
    normalize::{normalize_batch, normalize_post, normalize_series},
    queries::{GraphQlResponse, POSTS_QUERY, PostsData, SERIES_QUERY, SeriesData},
};

/// 文章内容源
///
/// 编排层只依赖这个接口，测试时可用假实现替换真实客户端。
pub trait ContentSource: Send + Sync {
    /// 按作者分页拉取文章
    fn fetch_posts(
        &self,
        handle: &str,
        page: i32,
        page_size: i32,
    ) -> impl std::future::Future<Output = Result<PostsPage, FetchError>>;

    /// 按作者拉取全部系列
    fn fetch_series(
        &self,
        handle: &str,
    ) -> impl std::future::Future<Output = Result<Vec<Series>, FetchError>>;
}

/// 一页归一化后的文章及远端分页信息
#[derive(Debug)]
pub struct PostsPage {
    pub articles: Vec<Article>,
    pub total_count: i64,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// Hashnode GraphQL 客户端
///
/// 每次请求都直连远端，通过 `Cache-Control` / `Pragma` 头绕过中间缓存，
/// 调用之间不保留任何状态。超时由 [`HashnodeConfig`] 给定。
#[derive(Clone)]
pub struct HashnodeClient {
    client: reqwest::Client,
    endpoint: String,
}

impl HashnodeClient {
    pub fn new(config: &HashnodeConfig) -> Self {
        let client = reqwest::Client::builder()
            .user_agent(concat!(
                env!("CARGO_PKG_NAME"),
                "/",
                env!("CARGO_PKG_VERSION")
            ))
            .timeout(config.timeout)
            .default_headers({
                let mut headers = HeaderMap::new();
                headers.insert(
                    header::CACHE_CONTROL,
                    HeaderValue::from_static("no-cache, no-store"),
                );
                headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
                headers
            })
            .build()
            .unwrap();

        Self {
            client,
            endpoint: config.endpoint.clone(),
        }
    }

    /// 发送一次 GraphQL 请求并解出 `data`
    ///
    /// 非 2xx 状态码或 `errors` 非空都按失败处理。
    async fn gql<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> Result<T, FetchError> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&json!({
                "query": query,
                "variables": variables,
            }))
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status));
        }

        let body: GraphQlResponse<T> = resp.json().await?;
        if !body.errors.is_empty() {
            let messages: Vec<_> = body.errors.into_iter().map(|e| e.message).collect();
            return Err(FetchError::GraphQl(messages.join("; ")));
        }

        body.data
            .ok_or_else(|| FetchError::GraphQl("response missing data".to_string()))
    }
}

impl ContentSource for HashnodeClient {
    async fn fetch_posts(
        &self,
        handle: &str,
        page: i32,
        page_size: i32,
    ) -> Result<PostsPage, FetchError> {
        let data: PostsData = self
            .gql(
                POSTS_QUERY,
                json!({
                    "username": handle,
                    "page": page,
                    "pageSize": page_size,
                }),
            )
            .await?;

        let posts = data
            .user
            .ok_or_else(|| FetchError::GraphQl(format!("unknown user: {handle}")))?
            .posts;

        Ok(PostsPage {
            total_count: posts.total_count,
            has_next_page: posts.page_info.has_next_page,
            has_previous_page: posts.page_info.has_previous_page,
            articles: normalize_batch(posts.edges.into_iter().map(|e| e.node), normalize_post),
        })
    }

    async fn fetch_series(&self, handle: &str) -> Result<Vec<Series>, FetchError> {
        let data: SeriesData = self
            .gql(SERIES_QUERY, json!({ "username": handle }))
            .await?;

        let edges = data
            .user
            .ok_or_else(|| FetchError::GraphQl(format!("unknown user: {handle}")))?
            .series_list
            .edges;

        Ok(normalize_batch(
            edges.into_iter().map(|e| e.node),
            normalize_series,
        ))
    }
}
