//! # JobPortal ドメイン層
//!
//! ビジネスロジックの中核を担うドメインモデルを定義する。
//!
//! ## 設計方針
//!
//! このクレートは DDD（ドメイン駆動設計）の原則に従い、以下を提供する:
//!
//! - **エンティティ**: 一意の識別子を持つオブジェクト（例: Candidate）
//! - **値オブジェクト**: 識別子を持たない不変オブジェクト（例: Email,
//!   CandidateName）
//! - **ドメインエラー**: ビジネスルール違反を表現するエラー型
//!
//! ## 依存関係の方向
//!
//! ```text
//! candidate-service → infra → domain → shared
//! ```
//!
//! ドメイン層はインフラ層（DB、外部サービス）には一切依存しない。
//! これにより、ビジネスロジックの純粋性が保たれる。
//!
//! ## モジュール構成
//!
//! - [`candidate`] - 求職者エンティティと関連する値オブジェクト
//! - [`error`] - ドメイン層で発生するエラーの定義
//! - [`password`] - パスワード関連の値オブジェクト
//!
//! ## 使用例
//!
//! ```rust
//! use jobportal_domain::candidate::{CandidateId, Email};
//!
//! let id = CandidateId::new();
//! let email = Email::new("taro@example.com").unwrap();
//! assert_eq!(email.as_str(), "taro@example.com");
//! ```

#[macro_use]
mod macros;

pub mod candidate;
pub mod error;
pub mod password;

pub use error::DomainError;
