use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;
use sqlx::types::Json;

use crate::records::{Article, SeriesRef, Tag};

/// 已同步文章的持久化行
///
/// `tags` 以 jsonb 存储，系列引用拍平成三列。
#[derive(Debug, sqlx::FromRow)]
pub struct ArticleRow {
    pub id: String,
    pub title: String,
    pub brief: Option<String>,
    pub slug: String,
    pub url: String,
    pub published_at: DateTime<Utc>,
    pub read_time_minutes: Option<i32>,
    pub cover_image_url: Option<String>,
    pub series_id: Option<String>,
    pub series_name: Option<String>,
    pub series_slug: Option<String>,
    pub tags: Json<Vec<Tag>>,
    /// 最近一次同步写入的时间
    pub updated_at: DateTime<Utc>,
}

impl From<ArticleRow> for Article {
    fn from(row: ArticleRow) -> Self {
        let series = match (row.series_id, row.series_name, row.series_slug) {
            (Some(id), Some(name), Some(slug)) => Some(SeriesRef { id, name, slug }),
            _ => None,
        };

        Article {
            id: row.id,
            title: row.title,
            brief: row.brief,
            slug: row.slug,
            url: row.url,
            published_at: row.published_at,
            read_time_minutes: row.read_time_minutes,
            cover_image_url: row.cover_image_url,
            series,
            tags: row.tags.0,
        }
    }
}

/// 已同步系列的持久化行
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct SeriesRow {
    pub id: String,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub total_posts: i64,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// 工作经历
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct WorkExperience {
    pub id: i32,
    pub company: String,
    pub position: String,
    pub location: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
    pub description: Option<String>,
    pub technologies: Vec<String>,
}

/// 教育经历
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Education {
    pub id: i32,
    pub institution: String,
    pub degree: String,
    pub field_of_study: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
    pub description: Option<String>,
}

/// 技能
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Skill {
    pub id: i32,
    pub name: String,
    pub category: Option<String>,
    pub proficiency_level: i32,
    pub years_experience: i32,
    pub is_featured: bool,
}

/// 证书
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Certification {
    pub id: i32,
    pub name: String,
    pub issuer: String,
    pub issue_date: NaiveDate,
    pub expiry_date: Option<NaiveDate>,
    pub credential_id: Option<String>,
    pub credential_url: Option<String>,
    pub is_active: bool,
}

/// 志愿活动
#[derive(Debug, Serialize, sqlx::FromRow)]
pub struct Volunteering {
    pub id: i32,
    pub organization: String,
    pub role: String,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub is_current: bool,
    pub description: Option<String>,
}
