use super::{ArticleRow, DBPool, SeriesRow};

/// Trait 用于查询已同步的文章和系列
///
/// 读路径只有两条简单 SELECT，过滤和分页在内存引擎里完成。
pub trait ArticleQuery {
    /// 获取 [`DBPool`] 对象
    fn db(&self) -> &DBPool;

    /// 查询全部已同步文章，按发布时间倒序
    ///
    /// ```ignore
    /// let pool: DBPool = /* 初始化连接池 */;
    /// let rows = pool.articles().await.unwrap();
    /// ```
    fn articles(&self) -> impl Future<Output = Result<Vec<ArticleRow>, sqlx::Error>> + '_ {
        async move {
            sqlx::query_as::<_, ArticleRow>(
                r#"
                SELECT id, title, brief, slug, url, published_at, read_time_minutes,
                       cover_image_url, series_id, series_name, series_slug, tags, updated_at
                FROM articles
                ORDER BY published_at DESC
                "#,
            )
            .fetch_all(self.db())
            .await
        }
    }

    /// 查询全部已同步系列，按名称排序
    fn series(&self) -> impl Future<Output = Result<Vec<SeriesRow>, sqlx::Error>> + '_ {
        async move {
            sqlx::query_as::<_, SeriesRow>(
                r#"
                SELECT id, name, slug, description, total_posts, created_at, updated_at
                FROM series
                ORDER BY name
                "#,
            )
            .fetch_all(self.db())
            .await
        }
    }
}

impl ArticleQuery for DBPool {
    fn db(&self) -> &DBPool {
        self
    }
}
