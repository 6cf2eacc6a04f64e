//! Errand Server - 校园跑腿订单平台后端
//!
//! # 模块结构
//!
//! ```text
//! errand-server/src/
//! ├── config.rs      # 环境变量配置
//! ├── state.rs       # 共享状态 (PgPool, JWT secret)
//! ├── error.rs       # ServiceError 桥接层
//! ├── auth/          # JWT 认证
//! ├── db/            # 数据库层 (sqlx, 行锁事务)
//! ├── grab/          # 自动抢单: 限流判定 + 随机选单 + 认领事务
//! ├── api/           # HTTP 路由和处理器
//! └── util.rs        # 密码哈希
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod db;
pub mod error;
pub mod grab;
pub mod state;
pub mod util;

pub use config::Config;
pub use state::AppState;
