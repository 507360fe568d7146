//! # 求職者 CRUD ユースケース
//!
//! 求職者の一覧取得・検索・登録・削除を実装する。
//!
//! ## 重複チェックの設計
//!
//! サインアップの email 重複は事前読み取り（check-then-act）ではなく、
//! リポジトリの INSERT が返す一意制約違反で検出する。
//! 同じ email への同時サインアップでも片方だけが成功する。

use std::sync::Arc;

use chrono::Utc;
use jobportal_domain::candidate::{Candidate, CandidateId, CandidateName, Email};
use jobportal_domain::password::PlainPassword;
use jobportal_infra::{PasswordHasher, repository::CandidateRepository};

use crate::error::CandidateError;

/// サインアップの入力
#[derive(Debug)]
pub struct SignupInput {
    pub email:    String,
    pub password: String,
    pub name:     String,
    pub phone:    Option<String>,
}

/// 求職者 CRUD ユースケースの実装
pub struct CandidateUseCaseImpl {
    repository:      Arc<dyn CandidateRepository>,
    password_hasher: Arc<dyn PasswordHasher>,
}

impl CandidateUseCaseImpl {
    /// 新しいユースケースインスタンスを作成
    pub fn new(
        repository: Arc<dyn CandidateRepository>,
        password_hasher: Arc<dyn PasswordHasher>,
    ) -> Self {
        Self {
            repository,
            password_hasher,
        }
    }

    /// 全求職者を取得する
    pub async fn list_candidates(&self) -> Result<Vec<Candidate>, CandidateError> {
        Ok(self.repository.find_all().await?)
    }

    /// メールアドレスで求職者を取得する
    pub async fn get_candidate(&self, email: &str) -> Result<Candidate, CandidateError> {
        let email = Email::new(email)?;

        self.repository
            .find_by_email(&email)
            .await?
            .ok_or_else(|| {
                CandidateError::NotFound(format!("求職者が見つかりません: {email}"))
            })
    }

    /// 求職者を新規登録する
    ///
    /// 1. 入力値のバリデーション（email 形式、氏名、空パスワード）
    /// 2. パスワードを Argon2id でハッシュ化
    /// 3. INSERT（email 重複は一意制約違反として検出）
    pub async fn signup(&self, input: SignupInput) -> Result<Candidate, CandidateError> {
        let email = Email::new(&input.email)?;
        let name = CandidateName::new(&input.name)?;

        let password = PlainPassword::new(input.password);
        if password.is_empty() {
            return Err(CandidateError::Validation(
                "パスワードは必須です".to_string(),
            ));
        }

        let password_hash = self.password_hasher.hash(&password)?;

        let candidate = Candidate::new(
            CandidateId::new(),
            email,
            password_hash,
            name,
            input.phone,
            Utc::now(),
        );

        match self.repository.insert(&candidate).await {
            Ok(()) => {
                tracing::info!(
                    candidate_id = %candidate.id(),
                    "求職者を登録しました"
                );
                Ok(candidate)
            }
            Err(e) if e.as_conflict().is_some() => Err(CandidateError::EmailTaken(
                candidate.email().as_str().to_string(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// メールアドレスで求職者を削除する
    ///
    /// 存在確認と削除を分けず、1 文の DELETE の結果行数で判定する。
    pub async fn delete_candidate(&self, email: &str) -> Result<(), CandidateError> {
        let email = Email::new(email)?;

        let deleted = self.repository.delete_by_email(&email).await?;
        if !deleted {
            return Err(CandidateError::NotFound(format!(
                "求職者が見つかりません: {email}"
            )));
        }

        tracing::info!(email = %email, "求職者を削除しました");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use jobportal_domain::password::{PasswordHash, PlainPassword};
    use jobportal_infra::InfraError;
    use pretty_assertions::assert_eq;

    use super::*;

    // テスト用スタブ

    /// インメモリの求職者リポジトリスタブ
    struct StubCandidateRepository {
        candidates: Mutex<Vec<Candidate>>,
    }

    impl StubCandidateRepository {
        fn empty() -> Self {
            Self {
                candidates: Mutex::new(Vec::new()),
            }
        }

        fn with_candidate(candidate: Candidate) -> Self {
            Self {
                candidates: Mutex::new(vec![candidate]),
            }
        }
    }

    #[async_trait::async_trait]
    impl CandidateRepository for StubCandidateRepository {
        async fn find_all(&self) -> Result<Vec<Candidate>, InfraError> {
            Ok(self.candidates.lock().unwrap().clone())
        }

        async fn find_by_email(&self, email: &Email) -> Result<Option<Candidate>, InfraError> {
            Ok(self
                .candidates
                .lock()
                .unwrap()
                .iter()
                .find(|c| c.email() == email)
                .cloned())
        }

        async fn insert(&self, candidate: &Candidate) -> Result<(), InfraError> {
            let mut candidates = self.candidates.lock().unwrap();
            if candidates.iter().any(|c| c.email() == candidate.email()) {
                return Err(InfraError::conflict(
                    "Candidate",
                    candidate.email().as_str(),
                ));
            }
            candidates.push(candidate.clone());
            Ok(())
        }

        async fn delete_by_email(&self, email: &Email) -> Result<bool, InfraError> {
            let mut candidates = self.candidates.lock().unwrap();
            let before = candidates.len();
            candidates.retain(|c| c.email() != email);
            Ok(candidates.len() < before)
        }
    }

    /// ハッシュ化を模倣するスタブ（prefix を付けるだけ）
    struct StubPasswordHasher;

    impl PasswordHasher for StubPasswordHasher {
        fn hash(&self, password: &PlainPassword) -> Result<PasswordHash, InfraError> {
            Ok(PasswordHash::new(format!("hashed:{}", password.as_str())))
        }
    }

    fn registered_candidate() -> Candidate {
        Candidate::new(
            CandidateId::new(),
            Email::new("taro@example.com").unwrap(),
            PasswordHash::new("hashed:pw1"),
            CandidateName::new("山田太郎").unwrap(),
            None,
            Utc::now(),
        )
    }

    fn create_sut(repository: StubCandidateRepository) -> CandidateUseCaseImpl {
        CandidateUseCaseImpl::new(Arc::new(repository), Arc::new(StubPasswordHasher))
    }

    fn signup_input(email: &str) -> SignupInput {
        SignupInput {
            email:    email.to_string(),
            password: "pw1".to_string(),
            name:     "山田太郎".to_string(),
            phone:    None,
        }
    }

    #[tokio::test]
    async fn test_signup_新規メールアドレスで成功する() {
        // Given
        let sut = create_sut(StubCandidateRepository::empty());

        // When
        let result = sut.signup(signup_input("taro@example.com")).await;

        // Then
        let candidate = result.unwrap();
        assert_eq!(candidate.email().as_str(), "taro@example.com");
        // 平文ではなくハッシュが保存される
        assert_eq!(candidate.password_hash().as_str(), "hashed:pw1");
    }

    #[tokio::test]
    async fn test_signup_登録済みメールアドレスはemail_taken() {
        // Given
        let sut = create_sut(StubCandidateRepository::with_candidate(
            registered_candidate(),
        ));

        // When
        let result = sut.signup(signup_input("taro@example.com")).await;

        // Then
        assert!(matches!(result, Err(CandidateError::EmailTaken(_))));
    }

    #[tokio::test]
    async fn test_signup_空パスワードはバリデーションエラー() {
        // Given
        let sut = create_sut(StubCandidateRepository::empty());
        let input = SignupInput {
            password: String::new(),
            ..signup_input("taro@example.com")
        };

        // When
        let result = sut.signup(input).await;

        // Then
        assert!(matches!(result, Err(CandidateError::Validation(_))));
    }

    #[tokio::test]
    async fn test_signup_不正なメールアドレスはバリデーションエラー() {
        // Given
        let sut = create_sut(StubCandidateRepository::empty());

        // When
        let result = sut.signup(signup_input("not-an-email")).await;

        // Then
        assert!(matches!(result, Err(CandidateError::Validation(_))));
    }

    #[tokio::test]
    async fn test_get_candidate_登録済みなら取得できる() {
        // Given
        let sut = create_sut(StubCandidateRepository::with_candidate(
            registered_candidate(),
        ));

        // When
        let result = sut.get_candidate("taro@example.com").await;

        // Then
        assert_eq!(result.unwrap().email().as_str(), "taro@example.com");
    }

    #[tokio::test]
    async fn test_get_candidate_未登録ならnot_found() {
        // Given
        let sut = create_sut(StubCandidateRepository::empty());

        // When
        let result = sut.get_candidate("nobody@example.com").await;

        // Then
        assert!(matches!(result, Err(CandidateError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_list_candidates_全件を返す() {
        // Given
        let sut = create_sut(StubCandidateRepository::with_candidate(
            registered_candidate(),
        ));

        // When
        let result = sut.list_candidates().await.unwrap();

        // Then
        assert_eq!(result.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_candidate_登録済みなら削除できる() {
        // Given
        let repository = StubCandidateRepository::with_candidate(registered_candidate());
        let sut = create_sut(repository);

        // When
        let result = sut.delete_candidate("taro@example.com").await;

        // Then
        assert!(result.is_ok());
        // 削除後は取得できない
        let get_result = sut.get_candidate("taro@example.com").await;
        assert!(matches!(get_result, Err(CandidateError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_candidate_未登録ならnot_found() {
        // Given
        let sut = create_sut(StubCandidateRepository::empty());

        // When
        let result = sut.delete_candidate("nobody@example.com").await;

        // Then
        assert!(matches!(result, Err(CandidateError::NotFound(_))));
    }
}
