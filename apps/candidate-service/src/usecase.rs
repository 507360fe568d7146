//! # ユースケース層
//!
//! Candidate Service のビジネスロジックを実装する。
//!
//! ## 設計方針
//!
//! - **トレイトベースの設計**: テスト可能性のためトレイトを定義
//! - **依存性注入**: リポジトリとパスワード処理、セッション管理を外部から注入
//! - **薄いハンドラ**: ハンドラは薄く保ち、ロジックはユースケースに集約

pub mod auth;
pub mod candidate;

use async_trait::async_trait;
pub use auth::{AuthUseCaseImpl, LoginOutput};
pub use candidate::{CandidateUseCaseImpl, SignupInput};
use jobportal_domain::candidate::Candidate;

use crate::error::CandidateError;

/// 求職者 CRUD ユースケーストレイト
///
/// 具体的な実装は `CandidateUseCaseImpl` で提供される。
#[async_trait]
pub trait CandidateUseCase: Send + Sync {
    /// 全求職者を取得する
    async fn list_candidates(&self) -> Result<Vec<Candidate>, CandidateError>;

    /// メールアドレスで求職者を取得する
    ///
    /// 該当レコードがない場合は `CandidateError::NotFound` を返す。
    async fn get_candidate(&self, email: &str) -> Result<Candidate, CandidateError>;

    /// 求職者を新規登録する
    ///
    /// 平文パスワードはハッシュ化してから永続化される。
    /// email が登録済みの場合は `CandidateError::EmailTaken` を返す。
    async fn signup(&self, input: SignupInput) -> Result<Candidate, CandidateError>;

    /// メールアドレスで求職者を削除する
    ///
    /// 該当レコードがない場合は `CandidateError::NotFound` を返す。
    async fn delete_candidate(&self, email: &str) -> Result<(), CandidateError>;
}

/// 認証ユースケーストレイト
///
/// 具体的な実装は `AuthUseCaseImpl` で提供される。
#[async_trait]
pub trait AuthUseCase: Send + Sync {
    /// メールアドレスとパスワードでログインする
    ///
    /// 成功時はセッショントークンと求職者情報を返す。
    ///
    /// # エラー
    ///
    /// - `NotFound`: メールアドレスが未登録
    /// - `AuthenticationFailed`: パスワード不一致
    /// - `Internal` / `Database`: セッション作成などインフラ障害
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutput, CandidateError>;

    /// セッションを無効化してログアウトする
    ///
    /// トークンがない場合、またはセッションが存在しない場合も成功とする（冪等）。
    async fn logout(&self, session_token: Option<&str>) -> Result<(), CandidateError>;
}

/// CandidateUseCaseImpl に CandidateUseCase トレイトを実装
#[async_trait]
impl CandidateUseCase for CandidateUseCaseImpl {
    async fn list_candidates(&self) -> Result<Vec<Candidate>, CandidateError> {
        self.list_candidates().await
    }

    async fn get_candidate(&self, email: &str) -> Result<Candidate, CandidateError> {
        self.get_candidate(email).await
    }

    async fn signup(&self, input: SignupInput) -> Result<Candidate, CandidateError> {
        self.signup(input).await
    }

    async fn delete_candidate(&self, email: &str) -> Result<(), CandidateError> {
        self.delete_candidate(email).await
    }
}

/// AuthUseCaseImpl に AuthUseCase トレイトを実装
#[async_trait]
impl AuthUseCase for AuthUseCaseImpl {
    async fn login(&self, email: &str, password: &str) -> Result<LoginOutput, CandidateError> {
        self.login(email, password).await
    }

    async fn logout(&self, session_token: Option<&str>) -> Result<(), CandidateError> {
        self.logout(session_token).await
    }
}
