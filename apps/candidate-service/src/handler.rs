//! # HTTP リクエストハンドラ
//!
//! axum のルートに対応するハンドラ関数を定義する。
//!
//! ## 設計方針
//!
//! - 各ハンドラはサブモジュールに配置
//! - 親モジュールで re-export し、フラットな API を提供
//! - ハンドラは薄く保ち、ビジネスロジックは usecase 層に委譲
//!
//! ## ハンドラ一覧
//!
//! - `candidate`: 求職者 CRUD（一覧、取得、サインアップ、削除）
//! - `auth`: 認証関連（ログイン、ログアウト）
//! - `health`: ヘルスチェック / Readiness Check

pub mod auth;
pub mod candidate;
pub mod health;

pub use auth::{AuthState, login, logout};
pub use candidate::{
    CandidateResponse,
    CandidateState,
    delete_candidate,
    get_candidate,
    list_candidates,
    signup,
};
pub use health::{ReadinessState, health_check, readiness_check};
use serde::Serialize;

/// テキストメッセージを含むレスポンスデータ
///
/// 削除・ログアウトなど、返すべきリソースがない操作で使用する。
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}
