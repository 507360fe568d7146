//! # CandidateRepository
//!
//! 求職者レコードの永続化を担当するリポジトリ。
//!
//! ## 設計方針
//!
//! - **原子的な書き込み**: サインアップの重複チェックは事前読み取りではなく
//!   UNIQUE 制約違反（SQLSTATE 23505）の検出で行う。削除も 1 文の DELETE の
//!   結果行数で存在判定する。check-then-act の競合は発生しない
//! - **ドメイン型への変換**: 行データは `Candidate::from_db` で復元し、
//!   値オブジェクトのバリデーションを通らない値は `Unexpected` エラーにする

use async_trait::async_trait;
use jobportal_domain::{
    candidate::{Candidate, CandidateId, CandidateName, Email},
    password::PasswordHash,
};
use sqlx::{PgPool, Row as _, postgres::PgRow};

use crate::error::InfraError;

/// 求職者リポジトリトレイト
///
/// 求職者レコードの永続化操作を定義する。
/// インフラ層で具体的な実装を提供し、ユースケース層から利用する。
#[async_trait]
pub trait CandidateRepository: Send + Sync {
    /// 全求職者を取得する（作成日時の降順）
    async fn find_all(&self) -> Result<Vec<Candidate>, InfraError>;

    /// メールアドレスで求職者を検索する
    ///
    /// # 戻り値
    ///
    /// - `Ok(Some(candidate))`: 求職者が見つかった場合
    /// - `Ok(None)`: 求職者が見つからない場合
    /// - `Err(_)`: データベースエラー
    async fn find_by_email(&self, email: &Email) -> Result<Option<Candidate>, InfraError>;

    /// 求職者を登録する
    ///
    /// # エラー
    ///
    /// - `InfraError::Conflict`: email が既に登録されている場合
    ///   （UNIQUE 制約違反の検出によるもので、同時リクエストでも安全）
    async fn insert(&self, candidate: &Candidate) -> Result<(), InfraError>;

    /// メールアドレスで求職者を削除する
    ///
    /// # 戻り値
    ///
    /// 削除された場合は `true`、該当レコードがなかった場合は `false`
    async fn delete_by_email(&self, email: &Email) -> Result<bool, InfraError>;
}

/// PostgreSQL 実装の CandidateRepository
#[derive(Debug, Clone)]
pub struct PostgresCandidateRepository {
    pool: PgPool,
}

impl PostgresCandidateRepository {
    /// 新しいリポジトリインスタンスを作成
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// UNIQUE 制約違反（SQLSTATE 23505）かどうかを判定する
fn is_unique_violation(error: &sqlx::Error) -> bool {
    error
        .as_database_error()
        .is_some_and(|db| db.code().as_deref() == Some("23505"))
}

/// 行データを Candidate エンティティに変換する
fn map_row(row: &PgRow) -> Result<Candidate, InfraError> {
    let email = Email::new(row.try_get::<String, _>("email")?)
        .map_err(|e| InfraError::unexpected(e.to_string()))?;
    let name = CandidateName::new(row.try_get::<String, _>("name")?)
        .map_err(|e| InfraError::unexpected(e.to_string()))?;

    Ok(Candidate::from_db(
        CandidateId::from_uuid(row.try_get("id")?),
        email,
        PasswordHash::new(row.try_get::<String, _>("password_hash")?),
        name,
        row.try_get("phone")?,
        row.try_get("created_at")?,
        row.try_get("updated_at")?,
    ))
}

#[async_trait]
impl CandidateRepository for PostgresCandidateRepository {
    async fn find_all(&self) -> Result<Vec<Candidate>, InfraError> {
        let rows = sqlx::query(
            r#"
            SELECT
                id,
                email,
                password_hash,
                name,
                phone,
                created_at,
                updated_at
            FROM candidates
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(map_row).collect()
    }

    async fn find_by_email(&self, email: &Email) -> Result<Option<Candidate>, InfraError> {
        let row = sqlx::query(
            r#"
            SELECT
                id,
                email,
                password_hash,
                name,
                phone,
                created_at,
                updated_at
            FROM candidates
            WHERE email = $1
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        Ok(Some(map_row(&row)?))
    }

    async fn insert(&self, candidate: &Candidate) -> Result<(), InfraError> {
        let result = sqlx::query(
            r#"
            INSERT INTO candidates (
                id,
                email,
                password_hash,
                name,
                phone,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(candidate.id().as_uuid())
        .bind(candidate.email().as_str())
        .bind(candidate.password_hash().as_str())
        .bind(candidate.name().as_str())
        .bind(candidate.phone())
        .bind(candidate.created_at())
        .bind(candidate.updated_at())
        .execute(&self.pool)
        .await;

        match result {
            Ok(_) => Ok(()),
            Err(e) if is_unique_violation(&e) => Err(InfraError::conflict(
                "Candidate",
                candidate.email().as_str(),
            )),
            Err(e) => Err(e.into()),
        }
    }

    async fn delete_by_email(&self, email: &Email) -> Result<bool, InfraError> {
        let result = sqlx::query("DELETE FROM candidates WHERE email = $1")
            .bind(email.as_str())
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
