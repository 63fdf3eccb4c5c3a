use crate::{
    error::{Error, Result},
    records::{Article, Series},
};

use super::client::ContentSource;

/// 一次编排拉取的结果
#[derive(Debug)]
pub struct Listing {
    pub articles: Vec<Article>,
    pub total_count: i64,
    pub series: Vec<Series>,
    pub has_next_page: bool,
    pub has_previous_page: bool,
}

/// 并发拉取文章和系列
///
/// 两个查询同时发出，互不阻塞。系列查询失败时记录告警并以空列表
/// 继续；文章查询失败时整个调用以 [`Error::RemoteFetch`] 失败，
/// 不提供文章列表的降级。调用之间不保留状态，也不做重试。
pub async fn fetch_listing<S: ContentSource>(
    source: &S,
    handle: &str,
    page: i32,
    page_size: i32,
    include_series: bool,
) -> Result<Listing> {
    let (posts, series) = tokio::join!(source.fetch_posts(handle, page, page_size), async {
        if include_series {
            Some(source.fetch_series(handle).await)
        } else {
            None
        }
    });

    let posts = posts.map_err(Error::RemoteFetch)?;

    let series = match series {
        Some(Ok(series)) => series,
        Some(Err(e)) => {
            tracing::warn!(%e, handle, "series query failed, continuing without series");
            Vec::new()
        }
        None => Vec::new(),
    };

    Ok(Listing {
        articles: posts.articles,
        total_count: posts.total_count,
        series,
        has_next_page: posts.has_next_page,
        has_previous_page: posts.has_previous_page,
    })
}

/// 同步落库用的全量拉取
///
/// 与 [`fetch_listing`] 不同：这里任意一个查询失败都让整个调用
/// 失败。系列查询的瞬时故障如果降级为空列表，落库时会把已持久化
/// 的系列一并清掉，所以同步路径不做降级。
pub async fn fetch_all<S: ContentSource>(
    source: &S,
    handle: &str,
    page_size: i32,
) -> Result<(Vec<Article>, Vec<Series>)> {
    let (posts, series) = tokio::try_join!(
        source.fetch_posts(handle, 1, page_size),
        source.fetch_series(handle),
    )
    .map_err(Error::RemoteFetch)?;

    Ok((posts.articles, series))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::FetchError,
        hashnode::client::PostsPage,
        records::{Article, Series},
    };

    // 模拟内容源：文章和系列分别可配置为成功或失败
    struct FakeSource {
        posts_fail: bool,
        series_fail: bool,
    }

    fn article(id: &str) -> Article {
        Article {
            id: id.to_string(),
            title: format!("Post {id}"),
            brief: None,
            slug: format!("post-{id}"),
            url: format!("https://example.com/post-{id}"),
            published_at: "2024-06-01T10:00:00Z".parse().unwrap(),
            read_time_minutes: None,
            cover_image_url: None,
            series: None,
            tags: Vec::new(),
        }
    }

    impl ContentSource for FakeSource {
        async fn fetch_posts(
            &self,
            _handle: &str,
            _page: i32,
            _page_size: i32,
        ) -> core::result::Result<PostsPage, FetchError> {
            if self.posts_fail {
                return Err(FetchError::GraphQl("posts query failed".to_string()));
            }
            Ok(PostsPage {
                articles: vec![article("1"), article("2")],
                total_count: 2,
                has_next_page: false,
                has_previous_page: false,
            })
        }

        async fn fetch_series(
            &self,
            _handle: &str,
        ) -> core::result::Result<Vec<Series>, FetchError> {
            if self.series_fail {
                return Err(FetchError::GraphQl("series query failed".to_string()));
            }
            Ok(vec![Series {
                id: "s1".to_string(),
                name: "AWS Basics".to_string(),
                slug: "aws-basics".to_string(),
                description: None,
                total_posts: 2,
                created_at: None,
                updated_at: None,
            }])
        }
    }

    #[tokio::test]
    async fn test_series_failure_degrades_to_empty() {
        let source = FakeSource {
            posts_fail: false,
            series_fail: true,
        };

        let listing = fetch_listing(&source, "maroayman", 1, 20, true)
            .await
            .expect("series failure must not abort the call");

        assert_eq!(listing.articles.len(), 2);
        assert!(listing.series.is_empty());
    }

    #[tokio::test]
    async fn test_posts_failure_is_fatal() {
        let source = FakeSource {
            posts_fail: true,
            series_fail: false,
        };

        let err = fetch_listing(&source, "maroayman", 1, 20, true)
            .await
            .expect_err("posts failure must propagate");

        assert!(matches!(err, Error::RemoteFetch(_)));
    }

    #[tokio::test]
    async fn test_series_skipped_when_not_requested() {
        let source = FakeSource {
            posts_fail: false,
            series_fail: false,
        };

        let listing = fetch_listing(&source, "maroayman", 1, 20, false)
            .await
            .expect("should succeed");

        assert_eq!(listing.articles.len(), 2);
        assert!(listing.series.is_empty());
    }

    #[tokio::test]
    async fn test_fetch_all_fails_on_series_error() {
        let source = FakeSource {
            posts_fail: false,
            series_fail: true,
        };

        let err = fetch_all(&source, "maroayman", 50)
            .await
            .expect_err("sync-path fetch must not degrade a failed series query");

        assert!(matches!(err, Error::RemoteFetch(_)));
    }

    #[tokio::test]
    async fn test_both_halves_returned() {
        let source = FakeSource {
            posts_fail: false,
            series_fail: false,
        };

        let listing = fetch_listing(&source, "maroayman", 1, 20, true)
            .await
            .expect("should succeed");

        assert_eq!(listing.total_count, 2);
        assert_eq!(listing.series.len(), 1);
        assert_eq!(listing.series[0].slug, "aws-basics");
    }
}
