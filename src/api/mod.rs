mod articles;
mod hashnode;
mod resume;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// 配置 API 路由
///
/// 路由包括：
/// - `GET/POST /api/hashnode`：实时文章列表（直连远端）
/// - `GET/POST /api/hashnode/sync`：拉取并落库
/// - `GET /api/articles`：已同步文章，支持筛选/排序/分页
/// - `GET /api/series`：已同步系列
/// - `GET /api/resume/*`：简历数据
pub fn setup_route(state: AppState) -> Router {
    let resume = Router::new()
        .route("/work-experience", get(resume::work_experience))
        .route("/education", get(resume::education))
        .route("/skills", get(resume::skills))
        .route("/certifications", get(resume::certifications))
        .route("/volunteering", get(resume::volunteering));

    let api = Router::new()
        .route(
            "/hashnode",
            get(hashnode::listing_get).post(hashnode::listing_post),
        )
        .route(
            "/hashnode/sync",
            post(hashnode::sync).get(hashnode::sync_manual),
        )
        .route("/articles", get(articles::articles_list))
        .route("/series", get(articles::series_list))
        .nest("/resume", resume);

    add_middlewares(Router::new().nest("/api", api).with_state(state))
}

pub async fn run_server(state: AppState) {
    let bind_addr = state.config().bind_addr.clone();
    let router = setup_route(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await.unwrap();
    println!("Listening on {bind_addr}");
    axum::serve(listener, router).await.unwrap();
}

fn add_middlewares(router: Router) -> Router {
    fn log_failure(
        err: tower_http::classify::ServerErrorsFailureClass,
        _latency: std::time::Duration,
        _span: &tracing::Span,
    ) {
        tracing::error!(error = %err, "request failed");
    }

    router.layer(TraceLayer::new_for_http().on_failure(log_failure))
}
