use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap};
use axum_extra::extract::Query;
use chrono::{DateTime, Utc};
use reqwest::header;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::{
    config::Config,
    error::{Error, Result},
    hashnode::{self, ContentSource, HashnodeClient},
    records::{Article, Series},
    storage::{ArticleStore, DBPool, SqlxArticleStore},
};

/// 实时列表请求参数，GET 走查询串，POST 走 JSON body
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListingParams {
    username: Option<String>,
    page: Option<i32>,
    /// 每页条数，钳制到 [1, 50]（Hashnode 的单页上限）
    page_size: Option<i32>,
    include_series: Option<bool>,
}

#[derive(Debug, Serialize)]
pub struct ListingResponse {
    success: bool,
    data: ListingData,
    metadata: ListingMetadata,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ListingData {
    articles: Vec<Article>,
    total_count: i64,
    series: Vec<Series>,
    page: i32,
    page_size: i32,
    has_next_page: bool,
    has_previous_page: bool,
}

#[derive(Debug, Serialize)]
struct ListingMetadata {
    timestamp: DateTime<Utc>,
    username: String,
    source: &'static str,
}

/// 实时文章列表
///
/// 查询串未显式传 `includeSeries=true` 时不拉系列。
pub async fn listing_get(
    State(client): State<HashnodeClient>,
    State(config): State<Arc<Config>>,
    Query(params): Query<ListingParams>,
) -> Result<Json<ListingResponse>> {
    listing(&client, &config, params, false).await.map(Json)
}

/// 同 [`listing_get`]，参数走 JSON body，系列默认包含
pub async fn listing_post(
    State(client): State<HashnodeClient>,
    State(config): State<Arc<Config>>,
    Json(params): Json<ListingParams>,
) -> Result<Json<ListingResponse>> {
    listing(&client, &config, params, true).await.map(Json)
}

async fn listing(
    client: &HashnodeClient,
    config: &Config,
    params: ListingParams,
    include_series_default: bool,
) -> Result<ListingResponse> {
    let username = params
        .username
        .unwrap_or_else(|| config.hashnode.handle.clone());
    let page = params.page.unwrap_or(1).max(1);
    let page_size = params
        .page_size
        .unwrap_or(config.hashnode.page_size)
        .clamp(1, 50);
    let include_series = params.include_series.unwrap_or(include_series_default);

    let listing =
        hashnode::fetch_listing(client, &username, page, page_size, include_series).await?;

    Ok(ListingResponse {
        success: true,
        data: ListingData {
            articles: listing.articles,
            total_count: listing.total_count,
            series: listing.series,
            page,
            page_size,
            has_next_page: listing.has_next_page,
            has_previous_page: listing.has_previous_page,
        },
        metadata: ListingMetadata {
            timestamp: Utc::now(),
            username,
            source: "hashnode",
        },
    })
}

/// 拉取远端数据并整体落库
///
/// 配置了同步密钥且请求携带 Authorization 头时校验
/// `Bearer <secret>`。与实时列表不同，这里系列查询失败会让整个
/// 同步失败且不触碰数据库：降级为空列表再落库会把已持久化的
/// 系列清掉。
pub async fn sync(
    State(client): State<HashnodeClient>,
    State(config): State<Arc<Config>>,
    State(pool): State<DBPool>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>> {
    if let (Some(secret), Some(auth)) = (&config.sync_secret, headers.get(header::AUTHORIZATION)) {
        if auth.to_str().ok() != Some(format!("Bearer {secret}").as_str()) {
            return Err(Error::Unauthorized);
        }
    }

    let (articles, series) = sync_into(
        &client,
        SqlxArticleStore::new(pool),
        &config.hashnode.handle,
    )
    .await?;

    tracing::info!(articles, series, "hashnode sync completed");

    Ok(Json(json!({
        "success": true,
        "message": "Hashnode data synced successfully",
        "articles": articles,
        "series": series,
        "timestamp": Utc::now(),
    })))
}

/// 同步核心：拉取成功之前不排队任何写操作
async fn sync_into<S, T>(source: &S, mut store: T, handle: &str) -> Result<(usize, usize)>
where
    S: ContentSource,
    T: ArticleStore,
{
    let (articles, series) = hashnode::fetch_all(source, handle, 50).await?;

    store.clean();
    for article in &articles {
        store.upsert_article(article);
    }
    for series in &series {
        store.upsert_series(series);
    }
    store.commit().await?;

    Ok((articles.len(), series.len()))
}

/// 允许 GET 手动触发同步
pub async fn sync_manual(
    client: State<HashnodeClient>,
    config: State<Arc<Config>>,
    pool: State<DBPool>,
    headers: HeaderMap,
) -> Result<Json<serde_json::Value>> {
    sync(client, config, pool, headers).await
}
