//! # Candidate Service サーバー
//!
//! 求人ポータルの求職者向け API サーバー。
//!
//! ## 役割
//!
//! Candidate Service は求職者アカウントのライフサイクルを担当する:
//!
//! - **サインアップ**: パスワードを Argon2id でハッシュ化して登録
//! - **ログイン/ログアウト**: Redis セッションによる認証
//! - **取得/削除**: メールアドレスをキーとした CRUD
//!
//! ```text
//! ┌──────────────┐     ┌───────────────────┐     ┌──────────────┐
//! │   Frontend   │────▶│ Candidate Service │────▶│  PostgreSQL  │
//! └──────────────┘     └───────────────────┘     └──────────────┘
//!                               │
//!                               ▼
//!                        ┌──────────────┐
//!                        │    Redis     │ （セッション）
//!                        └──────────────┘
//! ```
//!
//! ## 環境変数
//!
//! | 変数名 | 必須 | 説明 |
//! |--------|------|------|
//! | `CANDIDATE_HOST` | No | バインドアドレス（デフォルト: `0.0.0.0`） |
//! | `CANDIDATE_PORT` | **Yes** | ポート番号 |
//! | `DATABASE_URL` | **Yes** | PostgreSQL 接続 URL |
//! | `REDIS_URL` | **Yes** | Redis 接続 URL |
//! | `LOG_FORMAT` | No | `json` または `pretty`（デフォルト: `pretty`） |
//!
//! ## 起動方法
//!
//! ```bash
//! # 開発環境
//! cargo run -p jobportal-candidate-service
//!
//! # 本番環境
//! CANDIDATE_PORT=13001 DATABASE_URL=postgres://... REDIS_URL=redis://... \
//!     cargo run -p jobportal-candidate-service --release
//! ```

mod config;
mod error;
mod handler;
mod usecase;

use std::{net::SocketAddr, sync::Arc};

use axum::{
    Router,
    routing::{get, post},
};
use config::CandidateConfig;
use handler::{
    AuthState,
    CandidateState,
    ReadinessState,
    delete_candidate,
    get_candidate,
    health_check,
    list_candidates,
    login,
    logout,
    readiness_check,
    signup,
};
use jobportal_infra::{
    Argon2PasswordChecker,
    Argon2PasswordHasher,
    PasswordChecker,
    PasswordHasher,
    RedisSessionManager,
    SessionManager,
    db,
    redis,
    repository::{CandidateRepository, PostgresCandidateRepository},
};
use jobportal_shared::{
    canonical_log::CanonicalLogLineLayer,
    observability::{MakeRequestUuidV7, TracingConfig, make_request_span},
};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    request_id::SetRequestIdLayer,
    trace::TraceLayer,
};
use usecase::{AuthUseCaseImpl, CandidateUseCaseImpl};

/// Candidate Service サーバーのエントリーポイント
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env ファイルを読み込む（存在する場合）
    dotenvy::dotenv().ok();

    // トレーシング初期化
    let tracing_config = TracingConfig::from_env("candidate-service");
    jobportal_shared::observability::init_tracing(tracing_config);
    let _tracing_guard =
        tracing::info_span!("app", service = "candidate-service").entered();

    // 設定読み込み
    let config = CandidateConfig::from_env().expect("設定の読み込みに失敗しました");

    tracing::info!(
        "Candidate Service サーバーを起動します: {}:{}",
        config.host,
        config.port
    );

    // データベース接続プールを作成
    let pool = db::create_pool(&config.database_url)
        .await
        .expect("データベース接続に失敗しました");
    tracing::info!("データベースに接続しました");

    // マイグレーション実行
    db::run_migrations(&pool)
        .await
        .expect("マイグレーションの実行に失敗しました");
    tracing::info!("マイグレーションを適用しました");

    // Redis 接続（セッションストア）
    let redis_conn = redis::create_connection_manager(&config.redis_url)
        .await
        .expect("Redis 接続に失敗しました");
    tracing::info!("Redis に接続しました");

    // Readiness Check 用 State（pool が move される前に clone）
    let readiness_state = Arc::new(ReadinessState {
        pool:  pool.clone(),
        redis: redis_conn.clone(),
    });

    // 依存コンポーネントを初期化
    let candidate_repo: Arc<dyn CandidateRepository> =
        Arc::new(PostgresCandidateRepository::new(pool));
    let password_hasher: Arc<dyn PasswordHasher> = Arc::new(Argon2PasswordHasher::new());
    let password_checker: Arc<dyn PasswordChecker> = Arc::new(Argon2PasswordChecker::new());
    let session_manager: Arc<dyn SessionManager> =
        Arc::new(RedisSessionManager::new(redis_conn));

    let candidate_usecase = CandidateUseCaseImpl::new(candidate_repo.clone(), password_hasher);
    let candidate_state = Arc::new(CandidateState {
        usecase: Arc::new(candidate_usecase),
    });

    let auth_usecase = AuthUseCaseImpl::new(candidate_repo, password_checker, session_manager);
    let auth_state = Arc::new(AuthState {
        usecase: Arc::new(auth_usecase),
    });

    // フロントエンドは別オリジンで配信されるため、全オリジンを許可する
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // ルーター構築
    let app = Router::new()
        .route("/health", get(health_check))
        .merge(
            Router::new()
                .route("/health/ready", get(readiness_check))
                .with_state(readiness_state),
        )
        .merge(
            Router::new()
                .route("/api/v1/candidates", get(list_candidates))
                .route("/api/v1/candidates/signup", post(signup))
                .route(
                    "/api/v1/candidates/{email}",
                    get(get_candidate).delete(delete_candidate),
                )
                .with_state(candidate_state),
        )
        .merge(
            Router::new()
                .route("/api/v1/candidates/login", post(login))
                .route("/api/v1/candidates/logout", post(logout))
                .with_state(auth_state),
        )
        .layer(cors)
        .layer(CanonicalLogLineLayer)
        .layer(TraceLayer::new_for_http().make_span_with(make_request_span))
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV7));

    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .expect("アドレスのパースに失敗しました");

    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Candidate Service サーバーが起動しました: {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
