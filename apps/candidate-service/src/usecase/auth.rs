//! # 認証ユースケース
//!
//! ログイン・ログアウトのビジネスロジックを実装する。
//!
//! ## 認証フロー
//!
//! 1. メールアドレスで求職者を検索（未登録なら 404）
//! 2. パスワードを Argon2id で検証（不一致なら 401）
//! 3. Redis にセッションを作成し、セッション ID をトークンとして返す
//!
//! セッション作成などインフラ障害は認証失敗と区別し、
//! 500 として返す（401 に丸めない）。

use std::sync::Arc;

use jobportal_domain::candidate::{Candidate, Email};
use jobportal_domain::password::PlainPassword;
use jobportal_infra::{PasswordChecker, SessionData, SessionManager, repository::CandidateRepository};

use crate::error::CandidateError;

/// ログイン結果
#[derive(Debug)]
pub struct LoginOutput {
    /// セッショントークン（不透明な文字列）
    pub token:     String,
    /// ログインした求職者
    pub candidate: Candidate,
}

/// 認証ユースケースの実装
pub struct AuthUseCaseImpl {
    repository:       Arc<dyn CandidateRepository>,
    password_checker: Arc<dyn PasswordChecker>,
    session_manager:  Arc<dyn SessionManager>,
}

impl AuthUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    pub fn new(
        repository: Arc<dyn CandidateRepository>,
        password_checker: Arc<dyn PasswordChecker>,
        session_manager: Arc<dyn SessionManager>,
    ) -> Self {
        Self {
            repository,
            password_checker,
            session_manager,
        }
    }

    /// メールアドレスとパスワードでログインする
    pub async fn login(
        &self,
        email: &str,
        password: &str,
    ) -> Result<LoginOutput, CandidateError> {
        // 形式不正なメールアドレスは登録されていることがないため、未登録と同じ扱い
        let Ok(email_vo) = Email::new(email) else {
            return Err(CandidateError::NotFound(format!(
                "メールアドレスが登録されていません: {email}"
            )));
        };

        // Step 1: 求職者を検索
        let Some(candidate) = self.repository.find_by_email(&email_vo).await? else {
            tracing::info!(auth.reason = "email_not_found", "ログイン失敗: メールアドレス未登録");
            return Err(CandidateError::NotFound(format!(
                "メールアドレスが登録されていません: {email}"
            )));
        };

        // Step 2: パスワードを検証
        // 保存済みハッシュが壊れている場合は InfraError → 500（認証失敗とは区別する）
        let result = self
            .password_checker
            .verify(&PlainPassword::new(password), candidate.password_hash())?;

        if result.is_mismatch() {
            tracing::info!(
                auth.reason = "password_mismatch",
                candidate_id = %candidate.id(),
                "ログイン失敗: パスワード不一致"
            );
            return Err(CandidateError::AuthenticationFailed);
        }

        // Step 3: セッションを作成
        let session_data = SessionData::new(
            candidate.id().clone(),
            candidate.email().as_str().to_string(),
        );

        let token = self
            .session_manager
            .create(&session_data)
            .await
            .map_err(|e| CandidateError::Internal(format!("セッション作成に失敗: {e}")))?;

        tracing::info!(candidate_id = %candidate.id(), "ログイン成功");

        Ok(LoginOutput { token, candidate })
    }

    /// セッションを無効化してログアウトする
    ///
    /// トークンがない場合は何もしない。セッション削除の失敗は
    /// ログに記録するのみで、ログアウト自体は常に成功とする（冪等）。
    pub async fn logout(&self, session_token: Option<&str>) -> Result<(), CandidateError> {
        if let Some(token) = session_token {
            if let Err(e) = self.session_manager.delete(token).await {
                tracing::warn!("セッション削除に失敗（無視）: {}", e);
            }
        }

        tracing::info!("ログアウト");
        Ok(())
    }
}
