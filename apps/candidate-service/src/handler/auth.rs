//! # 認証ハンドラ
//!
//! ログイン・ログアウトのエンドポイントを提供する。
//!
//! ## エンドポイント
//!
//! - `POST /api/v1/candidates/login` - ログイン
//! - `POST /api/v1/candidates/logout` - ログアウト
//!
//! セッショントークンはログインレスポンスのボディで返し、
//! ログアウト時は `Authorization: Bearer <token>` ヘッダーで受け取る。

use std::sync::Arc;

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, header},
    response::IntoResponse,
};
use jobportal_shared::ApiResponse;
use serde::{Deserialize, Serialize};

use super::{CandidateResponse, MessageResponse};
use crate::{error::CandidateError, usecase::AuthUseCase};

/// 認証ハンドラの共有状態
pub struct AuthState {
    pub usecase: Arc<dyn AuthUseCase>,
}

// --- リクエスト/レスポンス型 ---

/// ログインリクエスト
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email:    String,
    pub password: String,
}

/// ログインレスポンスデータ
#[derive(Debug, Serialize)]
pub struct LoginResponseData {
    /// セッショントークン（不透明な文字列）
    pub token:     String,
    /// ログインした求職者（パスワードハッシュは含まない）
    pub candidate: CandidateResponse,
}

// --- ヘルパー ---

/// Authorization ヘッダーから Bearer トークンを取り出す
fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

// --- ハンドラ ---

/// POST /api/v1/candidates/login
///
/// メール/パスワードでログインし、セッションを確立する。
///
/// ## ステータスコード
///
/// - 200: 成功（トークンと求職者情報を返す）
/// - 404: メールアドレス未登録
/// - 401: パスワード不一致
/// - 500: セッション作成などインフラ障害（認証失敗とは区別）
pub async fn login(
    State(state): State<Arc<AuthState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, CandidateError> {
    let output = state.usecase.login(&req.email, &req.password).await?;

    Ok(Json(ApiResponse::new(LoginResponseData {
        token:     output.token,
        candidate: CandidateResponse::from(&output.candidate),
    })))
}

/// POST /api/v1/candidates/logout
///
/// セッションを無効化してログアウトする。
/// セッションが存在しない場合も常に 200 を返す（冪等）。
pub async fn logout(
    State(state): State<Arc<AuthState>>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, CandidateError> {
    state.usecase.logout(bearer_token(&headers)).await?;

    Ok(Json(ApiResponse::new(MessageResponse::new(
        "ログアウトしました",
    ))))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode},
        routing::post,
    };
    use chrono::Utc;
    use jobportal_domain::{
        candidate::{Candidate, CandidateId, CandidateName, Email},
        password::PasswordHash,
    };
    use tower::ServiceExt;

    use super::*;
    use crate::usecase::LoginOutput;

    // テスト用スタブ

    enum StubBehavior {
        Success,
        EmailNotFound,
        WrongPassword,
        SessionFailure,
    }

    struct StubAuthUseCase {
        behavior: StubBehavior,
    }

    fn sample_candidate() -> Candidate {
        Candidate::new(
            CandidateId::new(),
            Email::new("a@x.com").unwrap(),
            PasswordHash::new("hashed:pw1"),
            CandidateName::new("山田太郎").unwrap(),
            None,
            Utc::now(),
        )
    }

    #[async_trait]
    impl AuthUseCase for StubAuthUseCase {
        async fn login(
            &self,
            email: &str,
            _password: &str,
        ) -> Result<LoginOutput, CandidateError> {
            match self.behavior {
                StubBehavior::Success => Ok(LoginOutput {
                    token:     "session-token-123".to_string(),
                    candidate: sample_candidate(),
                }),
                StubBehavior::EmailNotFound => Err(CandidateError::NotFound(format!(
                    "メールアドレスが登録されていません: {email}"
                ))),
                StubBehavior::WrongPassword => Err(CandidateError::AuthenticationFailed),
                StubBehavior::SessionFailure => Err(CandidateError::Internal(
                    "セッション作成に失敗".to_string(),
                )),
            }
        }

        async fn logout(&self, _session_token: Option<&str>) -> Result<(), CandidateError> {
            Ok(())
        }
    }

    fn create_test_app(behavior: StubBehavior) -> Router {
        let state = Arc::new(AuthState {
            usecase: Arc::new(StubAuthUseCase { behavior }),
        });

        Router::new()
            .route("/api/v1/candidates/login", post(login))
            .route("/api/v1/candidates/logout", post(logout))
            .with_state(state)
    }

    fn login_request() -> Request<Body> {
        let body = serde_json::json!({
            "email": "a@x.com",
            "password": "pw1"
        });

        Request::builder()
            .method(Method::POST)
            .uri("/api/v1/candidates/login")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap()
    }

    async fn response_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_login_成功でトークンと求職者が返る() {
        // Given
        let sut = create_test_app(StubBehavior::Success);

        // When
        let response = sut.oneshot(login_request()).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["data"]["token"], "session-token-123");
        assert_eq!(json["data"]["candidate"]["email"], "a@x.com");
        // パスワードハッシュは含まれない
        assert!(json["data"]["candidate"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_login_未登録メールアドレスは404() {
        // Given
        let sut = create_test_app(StubBehavior::EmailNotFound);

        // When
        let response = sut.oneshot(login_request()).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_login_パスワード不一致は401() {
        // Given
        let sut = create_test_app(StubBehavior::WrongPassword);

        // When
        let response = sut.oneshot(login_request()).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

        let json = response_json(response).await;
        assert_eq!(
            json["type"],
            "https://jobportal.example.com/errors/authentication-failed"
        );
    }

    #[tokio::test]
    async fn test_login_インフラ障害は500() {
        // Given
        let sut = create_test_app(StubBehavior::SessionFailure);

        // When
        let response = sut.oneshot(login_request()).await.unwrap();

        // Then
        // 認証失敗（401）ではなく 500 で返る
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let json = response_json(response).await;
        assert_eq!(
            json["type"],
            "https://jobportal.example.com/errors/internal-error"
        );
    }

    #[tokio::test]
    async fn test_logout_トークン付きで200が返る() {
        // Given
        let sut = create_test_app(StubBehavior::Success);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/candidates/logout")
            .header("authorization", "Bearer session-token-123")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);

        let json = response_json(response).await;
        assert_eq!(json["data"]["message"], "ログアウトしました");
    }

    #[tokio::test]
    async fn test_logout_トークンなしでも200が返る() {
        // Given
        let sut = create_test_app(StubBehavior::Success);

        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/candidates/logout")
            .body(Body::empty())
            .unwrap();

        // When
        let response = sut.oneshot(request).await.unwrap();

        // Then
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_bearer_tokenはbearerプレフィックスを取り除く() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Bearer abc-123".parse().unwrap());

        assert_eq!(bearer_token(&headers), Some("abc-123"));
    }

    #[test]
    fn test_bearer_tokenはヘッダーなしでnoneを返す() {
        let headers = HeaderMap::new();
        assert_eq!(bearer_token(&headers), None);
    }

    #[test]
    fn test_bearer_tokenは別形式のヘッダーでnoneを返す() {
        let mut headers = HeaderMap::new();
        headers.insert("authorization", "Basic abc123".parse().unwrap());

        assert_eq!(bearer_token(&headers), None);
    }
}
