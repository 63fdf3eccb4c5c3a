use std::{env, time::Duration};

/// 服务配置
///
/// 启动时从环境变量构建一次，之后只读传递，不存在进程级可变配置。
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP 监听地址
    pub bind_addr: String,
    /// 文章列表每页条数（引擎分页用）
    pub listing_page_size: usize,
    /// 同步接口的鉴权密钥，未设置时不校验
    pub sync_secret: Option<String>,
    pub hashnode: HashnodeConfig,
}

/// Hashnode GraphQL 接口配置
#[derive(Debug, Clone)]
pub struct HashnodeConfig {
    /// GraphQL 端点
    pub endpoint: String,
    /// 默认作者 handle，请求未指定时使用
    pub handle: String,
    /// 单次出站请求超时
    pub timeout: Duration,
    /// 未指定时的默认拉取页大小
    pub page_size: i32,
}

impl Config {
    /// 从环境变量构建配置，未设置的项使用默认值
    ///
    /// - `FOLIO_BIND_ADDR`，默认 `0.0.0.0:3000`
    /// - `FOLIO_PAGE_SIZE`，默认 `10`
    /// - `FOLIO_SYNC_SECRET`，可选
    /// - `HASHNODE_ENDPOINT`，默认 `https://gql.hashnode.com`
    /// - `HASHNODE_HANDLE`，默认 `maroayman`
    /// - `HASHNODE_TIMEOUT_SECS`，默认 `10`
    /// - `HASHNODE_PAGE_SIZE`，默认 `20`
    pub fn from_env() -> Self {
        Self {
            bind_addr: env_or("FOLIO_BIND_ADDR", "0.0.0.0:3000"),
            listing_page_size: env_or("FOLIO_PAGE_SIZE", "10")
                .parse()
                .expect("FOLIO_PAGE_SIZE 必须是正整数"),
            sync_secret: env::var("FOLIO_SYNC_SECRET").ok(),
            hashnode: HashnodeConfig {
                endpoint: env_or("HASHNODE_ENDPOINT", "https://gql.hashnode.com"),
                handle: env_or("HASHNODE_HANDLE", "maroayman"),
                timeout: Duration::from_secs(
                    env_or("HASHNODE_TIMEOUT_SECS", "10")
                        .parse()
                        .expect("HASHNODE_TIMEOUT_SECS 必须是正整数"),
                ),
                page_size: env_or("HASHNODE_PAGE_SIZE", "20")
                    .parse()
                    .expect("HASHNODE_PAGE_SIZE 必须是正整数"),
            },
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}
