//! CLI 명령어 구현 모듈.

pub mod create_input;
pub mod plot;

use std::path::Path;

use tracing::debug;

/// 작업 디렉토리를 준비합니다 (이미 있으면 그대로 둠).
pub fn ensure_directories_exist<P: AsRef<Path>>(directories: &[P]) -> std::io::Result<()> {
    for dir in directories {
        let dir = dir.as_ref();
        if dir.as_os_str().is_empty() || dir.is_dir() {
            continue;
        }
        std::fs::create_dir_all(dir)?;
        debug!(path = %dir.display(), "Directory created");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_directories_exist() {
        let root = tempfile::tempdir().unwrap();
        let input = root.path().join("input");
        let output = root.path().join("nested").join("output");

        ensure_directories_exist(&[&input, &output]).unwrap();
        assert!(input.is_dir());
        assert!(output.is_dir());

        // 두 번째 호출도 성공
        ensure_directories_exist(&[&input, &output]).unwrap();
    }

    #[test]
    fn test_empty_path_is_ignored() {
        ensure_directories_exist(&[Path::new("")]).unwrap();
    }
}
