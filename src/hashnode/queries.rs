use chrono::{DateTime, Utc};
use serde::Deserialize;

/// 按作者分页拉取文章的查询
pub const POSTS_QUERY: &str = r#"
query UserPosts($username: String!, $page: Int!, $pageSize: Int!) {
  user(username: $username) {
    posts(page: $page, pageSize: $pageSize) {
      totalCount
      pageInfo {
        hasNextPage
        hasPreviousPage
      }
      edges {
        node {
          id
          title
          brief
          slug
          url
          publishedAt
          readTimeInMinutes
          coverImage {
            url
          }
          tags {
            id
            name
            slug
          }
          series {
            id
            name
            slug
          }
        }
      }
    }
  }
}
"#;

/// 按作者拉取系列的查询
pub const SERIES_QUERY: &str = r#"
query UserSeries($username: String!) {
  user(username: $username) {
    seriesList(first: 20) {
      edges {
        node {
          id
          name
          slug
          description {
            text
          }
          posts {
            totalDocuments
          }
          createdAt
          updatedAt
        }
      }
    }
  }
}
"#;

/// GraphQL 响应外壳
///
/// `errors` 非空时整个请求按失败处理，即使 `data` 存在。
#[derive(Debug, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

#[derive(Debug, Deserialize)]
pub struct Edge<T> {
    pub node: T,
}

#[derive(Debug, Deserialize)]
pub struct PostsData {
    pub user: Option<PostsUser>,
}

#[derive(Debug, Deserialize)]
pub struct PostsUser {
    pub posts: RawPostsPage,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPostsPage {
    pub total_count: i64,
    pub page_info: RawPageInfo,
    #[serde(default)]
    pub edges: Vec<Edge<RawPost>>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
}

/// 远端文章节点
///
/// 所有字段按可缺失处理，必填项的校验放在归一化阶段，
/// 单个坏节点不应让整批反序列化失败。
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawPost {
    pub id: Option<String>,
    pub title: Option<String>,
    pub brief: Option<String>,
    pub slug: Option<String>,
    pub url: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub read_time_in_minutes: Option<i32>,
    pub cover_image: Option<RawCoverImage>,
    pub tags: Option<Vec<RawTag>>,
    pub series: Option<RawSeriesRef>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawCoverImage {
    pub url: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawTag {
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSeriesRef {
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SeriesData {
    pub user: Option<SeriesUser>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesUser {
    pub series_list: RawSeriesList,
}

#[derive(Debug, Deserialize)]
pub struct RawSeriesList {
    #[serde(default)]
    pub edges: Vec<Edge<RawSeries>>,
}

/// 远端系列节点
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawSeries {
    pub id: Option<String>,
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<RawSeriesDescription>,
    pub posts: Option<RawSeriesPosts>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize)]
pub struct RawSeriesDescription {
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSeriesPosts {
    #[serde(default)]
    pub total_documents: i64,
}
