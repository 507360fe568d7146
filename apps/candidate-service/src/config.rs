//! # Candidate Service 設定
//!
//! 環境変数から Candidate Service サーバーの設定を読み込む。

use std::env;

/// Candidate Service サーバーの設定
#[derive(Debug, Clone)]
pub struct CandidateConfig {
    /// バインドアドレス
    pub host:         String,
    /// ポート番号
    pub port:         u16,
    /// データベース接続 URL
    pub database_url: String,
    /// Redis 接続 URL（セッションストア）
    pub redis_url:    String,
}

impl CandidateConfig {
    /// 環境変数から設定を読み込む
    pub fn from_env() -> Result<Self, env::VarError> {
        Ok(Self {
            host:         env::var("CANDIDATE_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port:         env::var("CANDIDATE_PORT")
                .expect("CANDIDATE_PORT が設定されていません")
                .parse()
                .expect("CANDIDATE_PORT は有効なポート番号である必要があります"),
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL が設定されていません"),
            redis_url:    env::var("REDIS_URL").expect("REDIS_URL が設定されていません"),
        })
    }
}
