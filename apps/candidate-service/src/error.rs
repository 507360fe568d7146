//! # Candidate Service エラー定義
//!
//! Candidate Service 固有のエラーと、HTTP レスポンスへの変換を定義する。
//!
//! ## エラーの種類と HTTP ステータスの対応
//!
//! | エラー種別 | HTTP ステータス | error type |
//! |-----------|----------------|------------|
//! | `NotFound` | 404 Not Found | `not-found` |
//! | `EmailTaken` | 400 Bad Request | `email-taken` |
//! | `AuthenticationFailed` | 401 Unauthorized | `authentication-failed` |
//! | `Validation` | 400 Bad Request | `validation-error` |
//! | `Database` / `Internal` | 500 Internal Server Error | `internal-error` |
//!
//! 認証失敗（401）とインフラ障害（500）は明確に区別する。
//! 5xx 系は detail を固定文言にし、内部情報をクライアントに漏らさない。

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use jobportal_domain::DomainError;
use jobportal_shared::ErrorResponse;
use thiserror::Error;

/// Candidate Service で発生するエラー
#[derive(Debug, Error)]
pub enum CandidateError {
    /// リソースが見つからない
    #[error("リソースが見つかりません: {0}")]
    NotFound(String),

    /// メールアドレスの重複
    #[error("メールアドレスは既に登録されています: {0}")]
    EmailTaken(String),

    /// 認証失敗（パスワード不一致）
    #[error("認証に失敗しました")]
    AuthenticationFailed,

    /// バリデーションエラー
    #[error("バリデーションエラー: {0}")]
    Validation(String),

    /// インフラ層エラー（データベース / Redis）
    #[error("インフラエラー: {0}")]
    Database(#[from] jobportal_infra::InfraError),

    /// 内部エラー
    #[error("内部エラー: {0}")]
    Internal(String),
}

impl From<DomainError> for CandidateError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(msg) => Self::Validation(msg),
            DomainError::NotFound { entity_type, id } => {
                Self::NotFound(format!("{entity_type} が見つかりません: {id}"))
            }
        }
    }
}

impl IntoResponse for CandidateError {
    fn into_response(self) -> Response {
        let body = match &self {
            CandidateError::NotFound(msg) => ErrorResponse::not_found(msg.clone()),
            CandidateError::EmailTaken(email) => ErrorResponse::new(
                "email-taken",
                "Email Taken",
                400,
                format!("メールアドレス {email} は既に使用されています"),
            ),
            CandidateError::AuthenticationFailed => ErrorResponse::new(
                "authentication-failed",
                "Authentication Failed",
                401,
                "パスワードが正しくありません",
            ),
            CandidateError::Validation(msg) => ErrorResponse::validation_error(msg.clone()),
            CandidateError::Database(e) => {
                tracing::error!("インフラエラー: {}", e);
                ErrorResponse::internal_error()
            }
            CandidateError::Internal(msg) => {
                tracing::error!("内部エラー: {}", msg);
                ErrorResponse::internal_error()
            }
        };

        let status =
            StatusCode::from_u16(body.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_foundは404に変換される() {
        let response = CandidateError::NotFound("求職者が見つかりません".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_email_takenは400に変換される() {
        let response =
            CandidateError::EmailTaken("taro@example.com".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_authentication_failedは401に変換される() {
        let response = CandidateError::AuthenticationFailed.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[test]
    fn test_internalは500に変換される() {
        let response = CandidateError::Internal("セッション作成に失敗".to_string())
            .into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_domain_validationエラーはvalidationに変換される() {
        let err: CandidateError =
            DomainError::Validation("メールアドレスは必須です".to_string()).into();
        assert!(matches!(err, CandidateError::Validation(_)));
    }
}
