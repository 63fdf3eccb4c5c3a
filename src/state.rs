use std::sync::Arc;

use axum::extract::FromRef;

use crate::{config::Config, engine::Engine, hashnode::HashnodeClient, storage::DBPool};

/// 应用程序上下文
///
/// [`AppState`] 封装了数据库连接池、Hashnode 客户端、列表引擎和配置，
/// 提供统一访问入口。
#[derive(Clone, FromRef)]
pub struct AppState {
    pool: DBPool,
    hashnode: HashnodeClient,
    engine: Engine,
    config: Arc<Config>,
}

impl AppState {
    /// 创建一个新的 [`AppState`] 实例
    pub fn new(pool: DBPool, hashnode: HashnodeClient, engine: Engine, config: Config) -> Self {
        Self {
            pool,
            hashnode,
            engine,
            config: Arc::new(config),
        }
    }

    /// 获取数据库连接池
    pub fn pool(&self) -> &DBPool {
        &self.pool
    }

    /// 获取 Hashnode 客户端
    pub fn hashnode(&self) -> &HashnodeClient {
        &self.hashnode
    }

    /// 获取配置
    pub fn config(&self) -> &Config {
        &self.config
    }
}
