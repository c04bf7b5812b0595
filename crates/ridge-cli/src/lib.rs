//! 릿지 플롯 CLI 도구.
//!
//! 이 crate는 다음 기능을 제공합니다:
//! - 수익률 테이블로 릿지 플롯 이미지 생성 (`plot`)
//! - Yahoo Finance에서 입력 테이블 생성 (`create-input`)

pub mod cli;
pub mod commands;

pub use cli::{Cli, Commands, CreateInputArgs, PlotArgs};
