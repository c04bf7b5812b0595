//! # Ridge Core
//!
//! 릿지 플롯 파이프라인의 핵심 도메인 모델 및 타입을 제공합니다.
//!
//! 이 크레이트는 파이프라인 전반에서 사용되는 기본 타입을 제공합니다:
//! - 수익률 테이블 (자산별 일간 수익률 시계열)
//! - 자산 통계, 밀도 곡선, 배치된 곡선
//! - 에러 타입
//! - 설정 관리
//! - 로깅 인프라

pub mod config;
pub mod domain;
pub mod error;
pub mod logging;

pub use config::*;
pub use domain::*;
pub use error::*;
pub use logging::*;
