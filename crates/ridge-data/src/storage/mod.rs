//! 파일 저장소.
//!
//! 수익률 테이블 스냅샷을 CSV로 읽고 씁니다.

pub mod returns_csv;

pub use returns_csv::{load_returns, save_returns};
