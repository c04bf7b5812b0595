//! 릿지 플롯 입력 데이터 관리.
//!
//! 이 크레이트는 다음을 제공합니다:
//! - 수익률 테이블 CSV 스냅샷 읽기/쓰기
//! - 종목 목록 파일 로딩
//! - 가격 → 일간 수익률 변환
//! - Yahoo Finance 일간 조정 종가 다운로드

pub mod error;
pub mod provider;
pub mod returns;
pub mod storage;
pub mod symbols;

pub use error::{DataError, DataResult};
pub use provider::{fetch_price_table, PriceProvider, YahooPriceProvider};
pub use returns::{PricePoint, PriceTable};
pub use storage::{load_returns, save_returns};
pub use symbols::{load_symbols, parse_symbols};
