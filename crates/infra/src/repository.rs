//! # リポジトリ実装
//!
//! 永続化を担当するリポジトリトレイトとその具体的な実装を提供する。
//!
//! ## 設計方針
//!
//! - **依存性逆転**: ユースケース層はトレイト経由でリポジトリを利用
//! - **データベース抽象化**: sqlx を使用し、PostgreSQL 固有の処理をカプセル化
//! - **テスタビリティ**: トレイト経由でスタブ可能な設計

pub mod candidate_repository;

pub use candidate_repository::{CandidateRepository, PostgresCandidateRepository};
