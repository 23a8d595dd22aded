//! # Blog Core
//!
//! 블로그 백엔드 전반에서 공유되는 기반 타입을 제공합니다:
//! - 설정 관리 (`config` 크레이트 기반 계층형 설정)
//! - 로깅 인프라 (`tracing`)
//! - 공통 에러 타입

pub mod config;
pub mod error;
pub mod logging;

pub use config::*;
pub use error::*;
pub use logging::*;
