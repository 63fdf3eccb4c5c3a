use axum::{Json, extract::State};
use axum_extra::extract::Query;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    engine::{Engine, FilterState, PageItem, PaginationMeta, SortKey, page_window},
    error::Result,
    records::Article,
    storage::{ArticleQuery, DBPool, SeriesRow},
};

/// 查询参数，用于已同步文章的筛选、排序和分页
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ArticleListParams {
    search: String,
    /// 逗号分隔的标签名
    tags: String,
    series: Option<String>,
    sort: SortKey,
    page: usize,
}

impl Default for ArticleListParams {
    fn default() -> Self {
        Self {
            search: Default::default(),
            tags: Default::default(),
            series: None,
            sort: Default::default(),
            page: 1,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlesResponse {
    articles: Vec<Article>,
    pagination: PaginationMeta,
    window: Vec<PageItem>,
    last_sync: Option<DateTime<Utc>>,
    count: usize,
}

#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    series: Vec<SeriesRow>,
    count: usize,
}

/// 获取已同步的文章列表
///
/// 全量读出后交给内存引擎做筛选、排序和分页，
/// 返回可见切片、分页元信息和页码窗口。
pub async fn articles_list(
    Query(params): Query<ArticleListParams>,
    State(pool): State<DBPool>,
    State(engine): State<Engine>,
) -> Result<Json<ArticlesResponse>> {
    let rows = pool.articles().await?;
    let last_sync = rows.first().map(|r| r.updated_at);

    let records: Vec<Article> = rows.into_iter().map(Into::into).collect();

    let state = FilterState {
        search: params.search,
        tags: params
            .tags
            .split(",")
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        series: params.series,
        sort: params.sort,
        page: params.page,
    };

    let (articles, pagination) = engine.apply(&records, &state);
    let window = page_window(pagination.page, pagination.total_pages);
    let count = pagination.total_count;

    Ok(Json(ArticlesResponse {
        articles,
        pagination,
        window,
        last_sync,
        count,
    }))
}

/// 获取已同步的系列列表
pub async fn series_list(State(pool): State<DBPool>) -> Result<Json<SeriesResponse>> {
    let series = pool.series().await?;
    let count = series.len();

    Ok(Json(SeriesResponse { series, count }))
}
