use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 归一化后的文章记录
///
/// 每次拉取整体重建，构建后不再修改。`id` 和 `slug` 在单次
/// 拉取结果内唯一。可选字段缺失时为 `None`，不会出现空字符串，
/// 标签列表缺失时为空向量而不是 null。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub brief: Option<String>,
    pub slug: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub read_time_minutes: Option<i32>,
    pub cover_image_url: Option<String>,
    pub series: Option<SeriesRef>,
    pub tags: Vec<Tag>,
}

/// 文章所属系列的引用
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesRef {
    pub id: String,
    pub name: String,
    pub slug: String,
}

/// 文章标签
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tag {
    pub name: String,
    pub slug: String,
}

/// 归一化后的系列记录
///
/// `total_posts` 以远端计数为准，即使当前文章页未包含该系列的全部文章。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Series {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub total_posts: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}
