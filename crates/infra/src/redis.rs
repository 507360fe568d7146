//! # Redis 接続管理
//!
//! Redis サーバーへの接続管理を行う。
//!
//! ## 設計方針
//!
//! - **ConnectionManager**: 自動再接続機能を持つ接続マネージャを使用
//! - **非同期対応**: tokio ランタイムとの統合
//!
//! ## Redis の用途
//!
//! JobPortal では Redis をセッション管理に使用する。
//! ログイン成功時にセッションを作成し、ログアウトまたは TTL 経過で削除される。
//!
//! ## ConnectionManager vs Connection
//!
//! `ConnectionManager` は接続が切断された場合に自動で再接続を試みる。
//! これにより、ネットワーク障害からの復旧が容易になる。

use redis::{Client, aio::ConnectionManager};

/// Redis 接続マネージャを作成する
///
/// アプリケーション起動時に一度だけ呼び出し、作成したマネージャを
/// アプリケーション全体で共有する。
///
/// # 引数
///
/// * `redis_url` - Redis 接続 URL
///   - 形式: `redis://[[username:]password@]host[:port][/database]`
///   - TLS: `rediss://` スキームで TLS 接続
pub async fn create_connection_manager(
    redis_url: &str,
) -> Result<ConnectionManager, redis::RedisError> {
    let client = Client::open(redis_url)?;
    ConnectionManager::new(client).await
}
