use axum::{Json, response::IntoResponse};
use reqwest::StatusCode;
use serde_json::json;

pub type Result<T> = core::result::Result<T, Error>;

/// 对 Hashnode 的单次出站请求失败
///
/// 网络错误、非 2xx 状态码和 GraphQL `errors` 载荷统一归入此类。
/// 文章查询失败时作为 [`Error::RemoteFetch`] 上抛；
/// 系列查询失败时在编排层记录日志后降级为空列表。
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error("unexpected status: {0}")]
    Status(StatusCode),

    #[error("graphql errors: {0}")]
    GraphQl(String),
}

/// 单条远端记录缺少必填字段，该记录被丢弃，批次继续
#[derive(Debug, thiserror::Error)]
#[error("malformed {kind} node: missing `{field}`")]
pub struct NormalizationError {
    pub kind: &'static str,
    pub field: &'static str,
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("hashnode query failed: {0}")]
    RemoteFetch(#[source] FetchError),

    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),

    #[error("Unauthorized")]
    Unauthorized,
}

impl IntoResponse for Error {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            Error::RemoteFetch(e) => {
                tracing::error!(%e, "hashnode fetch failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "Failed to fetch articles from Hashnode".to_string(),
                )
            }
            Error::Sqlx(e) => {
                tracing::error!(%e, "sqlx error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal Server Error".to_string(),
                )
            }
            Error::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
        };

        (
            status,
            Json(json!({
                "success": false,
                "error": message,
            })),
        )
            .into_response()
    }
}
