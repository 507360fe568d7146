//! # ヘルスチェックハンドラ
//!
//! Candidate Service の稼働状態を確認するためのエンドポイント。
//!
//! - `GET /health` - liveness（プロセスが応答するか）
//! - `GET /health/ready` - readiness（依存サービスに接続できるか）
//!
//! レスポンス型は [`jobportal_shared::health`] を参照。

use std::{collections::HashMap, sync::Arc};

use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use jobportal_shared::{
    HealthResponse,
    health::{CheckStatus, ReadinessResponse, ReadinessStatus},
};
use redis::aio::ConnectionManager;
use sqlx::PgPool;

/// Candidate Service のヘルスチェックエンドポイント
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status:  "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Readiness Check 用の共有状態
pub struct ReadinessState {
    pub pool:  PgPool,
    pub redis: ConnectionManager,
}

/// GET /health/ready
///
/// PostgreSQL と Redis への接続を確認する。
/// いずれかが失敗した場合は 503 を返す。
pub async fn readiness_check(State(state): State<Arc<ReadinessState>>) -> impl IntoResponse {
    let mut checks = HashMap::new();

    let database_ok = sqlx::query("SELECT 1").execute(&state.pool).await.is_ok();
    checks.insert(
        "database".to_string(),
        if database_ok {
            CheckStatus::Ok
        } else {
            CheckStatus::Error
        },
    );

    let mut conn = state.redis.clone();
    let redis_ok = redis::cmd("PING")
        .query_async::<String>(&mut conn)
        .await
        .is_ok();
    checks.insert(
        "redis".to_string(),
        if redis_ok {
            CheckStatus::Ok
        } else {
            CheckStatus::Error
        },
    );

    let ready = database_ok && redis_ok;
    let status_code = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status_code,
        Json(ReadinessResponse {
            status: if ready {
                ReadinessStatus::Ready
            } else {
                ReadinessStatus::NotReady
            },
            checks,
        }),
    )
}
