//! # 求職者ハンドラ
//!
//! 求職者 CRUD のエンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `GET /api/v1/candidates` - 一覧取得
//! - `GET /api/v1/candidates/{email}` - メールアドレスで取得
//! - `POST /api/v1/candidates/signup` - サインアップ
//! - `DELETE /api/v1/candidates/{email}` - 削除
//!
//! レスポンスにパスワードハッシュは一切含めない。

use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::{DateTime, Utc};
use jobportal_domain::candidate::{Candidate, CandidateId};
use jobportal_shared::ApiResponse;
use serde::{Deserialize, Serialize};

use super::MessageResponse;
use crate::{
    error::CandidateError,
    usecase::{CandidateUseCase, SignupInput},
};

/// 求職者ハンドラの共有状態
pub struct CandidateState {
    pub usecase: Arc<dyn CandidateUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// サインアップリクエスト
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub email:    String,
    pub password: String,
    pub name:     String,
    pub phone:    Option<String>,
}

/// 求職者レスポンス
///
/// パスワードハッシュを含まない公開用の表現。
#[derive(Debug, Serialize)]
pub struct CandidateResponse {
    pub id:         CandidateId,
    pub email:      String,
    pub name:       String,
    pub phone:      Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<&Candidate> for CandidateResponse {
    fn from(candidate: &Candidate) -> Self {
        Self {
            id:         candidate.id().clone(),
            email:      candidate.email().as_str().to_string(),
            name:       candidate.name().as_str().to_string(),
            phone:      candidate.phone().map(String::from),
            created_at: candidate.created_at(),
        }
    }
}

// --- ハンドラ ---

/// GET /api/v1/candidates
///
/// 全求職者を取得する。
pub async fn list_candidates(
    State(state): State<Arc<CandidateState>>,
) -> Result<impl IntoResponse, CandidateError> {
    let candidates = state.usecase.list_candidates().await?;

    let data: Vec<CandidateResponse> = candidates.iter().map(CandidateResponse::from).collect();

    Ok(Json(ApiResponse::new(data)))
}

/// GET /api/v1/candidates/{email}
///
/// メールアドレスで求職者を取得する。
/// 該当レコードがない場合は 404 を返す（空の 200 は返さない）。
pub async fn get_candidate(
    State(state): State<Arc<CandidateState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, CandidateError> {
    let candidate = state.usecase.get_candidate(&email).await?;

    Ok(Json(ApiResponse::new(CandidateResponse::from(&candidate))))
}

/// POST /api/v1/candidates/signup
///
/// 求職者を新規登録し、201 で作成されたレコードを返す。
/// email が登録済みの場合は 400（email-taken）を返す。
pub async fn signup(
    State(state): State<Arc<CandidateState>>,
    Json(req): Json<SignupRequest>,
) -> Result<impl IntoResponse, CandidateError> {
    let candidate = state
        .usecase
        .signup(SignupInput {
            email:    req.email,
            password: req.password,
            name:     req.name,
            phone:    req.phone,
        })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::new(CandidateResponse::from(&candidate))),
    ))
}

/// DELETE /api/v1/candidates/{email}
///
/// メールアドレスで求職者を削除する。
/// 該当レコードがない場合は 404 を返す。
pub async fn delete_candidate(
    State(state): State<Arc<CandidateState>>,
    Path(email): Path<String>,
) -> Result<impl IntoResponse, CandidateError> {
    state.usecase.delete_candidate(&email).await?;

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "求職者を削除しました",
    ))))
}
