use chrono::Utc;
use sqlx::types::Json;

use crate::{
    error,
    records::{Article, Series},
    storage::DBPool,
};

/// 提供文章和系列的同步写入接口
///
/// 写入先排队，[`ArticleStore::commit`] 时在一个事务里顺序执行，
/// 任意一条失败则整体回滚。
pub trait ArticleStore: ToOwned + Send + Sync {
    /// 清空所有文章和系列
    fn clean(&mut self) -> &mut Self;
    /// 插入或更新文章
    fn upsert_article(&mut self, article: &Article) -> &mut Self;
    /// 插入或更新系列
    fn upsert_series(&mut self, series: &Series) -> &mut Self;
    /// 提交更改
    fn commit(self) -> impl std::future::Future<Output = Result<(), error::Error>>;
}

/// sqlx 的 [`ArticleStore`] 实现
pub struct SqlxArticleStore {
    pool: DBPool,
    queries: Vec<sqlx::query::Query<'static, sqlx::Postgres, sqlx::postgres::PgArguments>>,
}

impl SqlxArticleStore {
    pub fn new(pool: DBPool) -> Self {
        Self {
            pool,
            queries: Default::default(),
        }
    }
}

impl ToOwned for SqlxArticleStore {
    type Owned = SqlxArticleStore;

    fn to_owned(&self) -> Self::Owned {
        Self {
            pool: self.pool.clone(),
            queries: Default::default(),
        }
    }
}

impl ArticleStore for SqlxArticleStore {
    fn clean(&mut self) -> &mut Self {
        let query = sqlx::query("TRUNCATE TABLE articles, series");
        self.queries.push(query);
        self
    }

    fn upsert_article(&mut self, article: &Article) -> &mut Self {
        let q = sqlx::query(
            r#"
            INSERT INTO articles
                (id, title, brief, slug, url, published_at, read_time_minutes,
                 cover_image_url, series_id, series_name, series_slug, tags, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (id) DO UPDATE
            SET
                title = EXCLUDED.title,
                brief = EXCLUDED.brief,
                slug = EXCLUDED.slug,
                url = EXCLUDED.url,
                published_at = EXCLUDED.published_at,
                read_time_minutes = EXCLUDED.read_time_minutes,
                cover_image_url = EXCLUDED.cover_image_url,
                series_id = EXCLUDED.series_id,
                series_name = EXCLUDED.series_name,
                series_slug = EXCLUDED.series_slug,
                tags = EXCLUDED.tags,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(article.id.to_owned())
        .bind(article.title.to_owned())
        .bind(article.brief.to_owned())
        .bind(article.slug.to_owned())
        .bind(article.url.to_owned())
        .bind(article.published_at)
        .bind(article.read_time_minutes)
        .bind(article.cover_image_url.to_owned())
        .bind(article.series.as_ref().map(|s| s.id.to_owned()))
        .bind(article.series.as_ref().map(|s| s.name.to_owned()))
        .bind(article.series.as_ref().map(|s| s.slug.to_owned()))
        .bind(Json(article.tags.clone()))
        .bind(Utc::now());

        self.queries.push(q);
        self
    }

    fn upsert_series(&mut self, series: &Series) -> &mut Self {
        let q = sqlx::query(
            r#"
            INSERT INTO series
                (id, name, slug, description, total_posts, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE
            SET
                name = EXCLUDED.name,
                slug = EXCLUDED.slug,
                description = EXCLUDED.description,
                total_posts = EXCLUDED.total_posts,
                created_at = EXCLUDED.created_at,
                updated_at = EXCLUDED.updated_at
            "#,
        )
        .bind(series.id.to_owned())
        .bind(series.name.to_owned())
        .bind(series.slug.to_owned())
        .bind(series.description.to_owned())
        .bind(series.total_posts)
        .bind(series.created_at)
        .bind(series.updated_at);

        self.queries.push(q);
        self
    }

    async fn commit(mut self) -> Result<(), error::Error> {
        let mut tx = self.pool.begin().await?;

        for q in self.queries.drain(..) {
            q.execute(tx.as_mut()).await?;
        }

        Ok(tx.commit().await?)
    }
}
