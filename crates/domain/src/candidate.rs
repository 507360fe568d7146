//! # 求職者
//!
//! 求職者（Candidate）エンティティとそれに関連する値オブジェクトを定義する。
//!
//! ## ドメイン用語
//!
//! | 型 | ドメイン用語 | 説明 |
//! |---|------------|------|
//! | [`Candidate`] | 求職者 | メールアドレスで一意に識別されるアカウント |
//! | [`Email`] | メールアドレス | 求職者のログイン ID を兼ねる |
//! | [`CandidateName`] | 氏名 | PII のため Debug 出力はマスクされる |
//!
//! ## 設計方針
//!
//! - **Newtype パターン**: CandidateId は UUID をラップし、型安全性を確保
//! - **不変性**: エンティティフィールドは不変、復元は `from_db` 経由
//! - **バリデーション**: 値オブジェクトの生成時に検証ロジックを実行
//!
//! ## 使用例
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use jobportal_domain::{
//!     candidate::{Candidate, CandidateId, CandidateName, Email},
//!     password::PasswordHash,
//! };
//!
//! let candidate = Candidate::new(
//!     CandidateId::new(),
//!     Email::new("taro@example.com")?,
//!     PasswordHash::new("$argon2id$..."),
//!     CandidateName::new("山田太郎")?,
//!     Some("090-0000-0000".to_string()),
//!     chrono::Utc::now(),
//! );
//!
//! assert_eq!(candidate.email().as_str(), "taro@example.com");
//! # Ok(())
//! # }
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{DomainError, password::PasswordHash};

define_uuid_id! {
    /// 求職者 ID（一意識別子）
    ///
    /// UUID v7 を使用し、生成順にソート可能。
    /// Newtype パターンで型安全性を確保。
    pub struct CandidateId;
}

/// メールアドレス（値オブジェクト）
///
/// 求職者アカウントの一意識別子を兼ねる。
/// 生成時にバリデーションを実行し、不正な値の作成を防ぐ。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
    /// メールアドレスを作成する
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - `local@domain` の形式であること
    /// - 最大 255 文字
    ///
    /// # エラー
    ///
    /// バリデーションに失敗した場合は `DomainError::Validation` を返す。
    pub fn new(value: impl Into<String>) -> Result<Self, DomainError> {
        let value = value.into();

        if value.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスは必須です".to_string(),
            ));
        }

        // 基本的な構造検証: local@domain の形式であること
        let Some((local, domain)) = value.split_once('@') else {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        };

        if local.is_empty() || domain.is_empty() {
            return Err(DomainError::Validation(
                "メールアドレスの形式が不正です".to_string(),
            ));
        }

        if value.len() > 255 {
            return Err(DomainError::Validation(
                "メールアドレスは255文字以内である必要があります".to_string(),
            ));
        }

        Ok(Self(value))
    }

    /// 文字列参照を取得する
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 所有権を持つ文字列に変換する
    pub fn into_string(self) -> String {
        self.0
    }
}

impl std::fmt::Display for Email {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

define_validated_string! {
    /// 氏名（値オブジェクト）
    ///
    /// 求職者の表示名を表現する。
    /// PII（個人識別情報）のため、Debug 出力はマスクされる。
    ///
    /// # バリデーション
    ///
    /// - 空文字列ではない
    /// - 最大 100 文字
    pub struct CandidateName {
        label: "氏名",
        max_length: 100,
        pii: true,
    }
}

/// 求職者エンティティ
///
/// 求人ポータルに登録された求職者アカウントを表現する。
/// メールアドレス/パスワード認証でログインする。
///
/// # 不変条件
///
/// - `email` はシステム全体で一意（DB の UNIQUE 制約で保証）
/// - `password_hash` は Argon2id 形式のハッシュ値であり、平文は保持しない
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    id: CandidateId,
    email: Email,
    password_hash: PasswordHash,
    name: CandidateName,
    phone: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl Candidate {
    /// 新しい求職者を作成する
    ///
    /// # 引数
    ///
    /// - `id`: 求職者 ID
    /// - `email`: メールアドレス
    /// - `password_hash`: ハッシュ化済みパスワード（平文は受け取らない）
    /// - `name`: 氏名
    /// - `phone`: 電話番号（任意）
    /// - `now`: 現在日時（呼び出し元から注入）
    pub fn new(
        id: CandidateId,
        email: Email,
        password_hash: PasswordHash,
        name: CandidateName,
        phone: Option<String>,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            name,
            phone,
            created_at: now,
            updated_at: now,
        }
    }

    /// 既存のデータから求職者を復元する（データベースから取得時）
    #[allow(clippy::too_many_arguments)]
    pub fn from_db(
        id: CandidateId,
        email: Email,
        password_hash: PasswordHash,
        name: CandidateName,
        phone: Option<String>,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            email,
            password_hash,
            name,
            phone,
            created_at,
            updated_at,
        }
    }

    // Getter メソッド

    pub fn id(&self) -> &CandidateId {
        &self.id
    }

    pub fn email(&self) -> &Email {
        &self.email
    }

    pub fn password_hash(&self) -> &PasswordHash {
        &self.password_hash
    }

    pub fn name(&self) -> &CandidateName {
        &self.name
    }

    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    use super::*;

    // フィクスチャ

    /// テスト用の固定タイムスタンプ
    #[fixture]
    fn now() -> DateTime<Utc> {
        DateTime::from_timestamp(1_700_000_000, 0).unwrap()
    }

    #[fixture]
    fn candidate(now: DateTime<Utc>) -> Candidate {
        Candidate::new(
            CandidateId::new(),
            Email::new("taro@example.com").unwrap(),
            PasswordHash::new("$argon2id$dummy"),
            CandidateName::new("山田太郎").unwrap(),
            Some("090-1234-5678".to_string()),
            now,
        )
    }

    // Email のテスト

    #[test]
    fn test_メールアドレスは正常な形式を受け入れる() {
        assert!(Email::new("taro@example.com").is_ok());
    }

    #[rstest]
    #[case("", "空文字列")]
    #[case("no-at-sign", "@記号なし")]
    #[case("@", "@のみ")]
    #[case("@example.com", "ローカル部分が空")]
    #[case("taro@", "ドメイン部分が空")]
    #[case(&format!("{}@example.com", "a".repeat(256)), "255文字超過")]
    fn test_メールアドレスは不正な形式を拒否する(
        #[case] input: &str,
        #[case] _reason: &str,
    ) {
        assert!(Email::new(input).is_err());
    }

    #[test]
    fn test_メールアドレスのdisplayは平文を出力する() {
        let email = Email::new("taro@example.com").unwrap();
        assert_eq!(email.to_string(), "taro@example.com");
    }

    // CandidateName のテスト

    #[test]
    fn test_氏名は正常な値を受け入れる() {
        assert!(CandidateName::new("山田太郎").is_ok());
    }

    #[rstest]
    #[case("", "空文字列")]
    #[case("   ", "空白のみ")]
    #[case(&"あ".repeat(101), "100文字超過")]
    fn test_氏名は不正な値を拒否する(#[case] input: &str, #[case] _reason: &str) {
        assert!(CandidateName::new(input).is_err());
    }

    #[test]
    fn test_氏名のdebug出力はマスクされる() {
        let name = CandidateName::new("山田太郎").unwrap();
        assert!(format!("{:?}", name).contains("[REDACTED]"));
    }

    // CandidateId のテスト

    #[test]
    fn test_候補者idはuuid_v7を生成する() {
        let id = CandidateId::new();
        assert_eq!(id.as_uuid().get_version_num(), 7);
    }

    // Candidate のテスト

    #[rstest]
    fn test_新規求職者のタイムスタンプは注入された値と一致する(
        now: DateTime<Utc>,
        candidate: Candidate,
    ) {
        assert_eq!(candidate.created_at(), now);
        assert_eq!(candidate.updated_at(), now);
    }

    #[rstest]
    fn test_getterが各フィールドを返す(candidate: Candidate) {
        assert_eq!(candidate.email().as_str(), "taro@example.com");
        assert_eq!(candidate.name().as_str(), "山田太郎");
        assert_eq!(candidate.phone(), Some("090-1234-5678"));
        assert_eq!(candidate.password_hash().as_str(), "$argon2id$dummy");
    }

    #[rstest]
    fn test_from_dbで復元したエンティティはnewと等しい(
        now: DateTime<Utc>,
        candidate: Candidate,
    ) {
        let restored = Candidate::from_db(
            candidate.id().clone(),
            candidate.email().clone(),
            candidate.password_hash().clone(),
            candidate.name().clone(),
            candidate.phone().map(String::from),
            now,
            now,
        );

        assert_eq!(restored, candidate);
    }
}
