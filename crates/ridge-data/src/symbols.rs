//! 종목 목록 파일.
//!
//! 한 줄에 심볼 하나. 앞뒤 공백은 제거하고 빈 줄은 건너뜁니다.

use std::path::Path;

use ridge_core::{RidgeError, RidgeResult};
use tracing::{debug, warn};

/// 파일에서 심볼 목록을 읽습니다 (파일 순서 유지).
pub fn load_symbols(path: impl AsRef<Path>) -> RidgeResult<Vec<String>> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(RidgeError::InputNotFound(path.to_path_buf()));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| RidgeError::InvalidInput(format!("{}: {}", path.display(), e)))?;
    let symbols = parse_symbols(&content);

    if symbols.is_empty() {
        return Err(RidgeError::InvalidInput(format!(
            "{}: no symbols listed",
            path.display()
        )));
    }

    debug!(path = %path.display(), count = symbols.len(), "Symbols loaded");
    Ok(symbols)
}

/// 텍스트에서 심볼을 추출합니다. 중복은 첫 번째만 남깁니다.
pub fn parse_symbols(content: &str) -> Vec<String> {
    let mut symbols: Vec<String> = Vec::new();

    for line in content.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if symbols.iter().any(|s| s == line) {
            warn!(symbol = line, "Duplicate symbol ignored");
            continue;
        }
        symbols.push(line.to_string());
    }
    symbols
}
