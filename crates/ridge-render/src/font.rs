//! 라벨 렌더링용 폰트 등록.
//!
//! plotters의 폰트 레지스트리는 프로세스 전역입니다. 내보내기는 [`acquire`]로
//! 레지스트리를 잠근 채 요청한 폰트를 `sans-serif`에 등록하고, 그리기가 끝날
//! 때까지 [`FontLease`]를 쥐고 있습니다. 폰트 데이터는 경로별로 한 번만 읽습니다.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, OnceLock, PoisonError};

use plotters::style::{register_font, FontStyle};
use ridge_core::{RidgeError, RidgeResult};
use tracing::{debug, warn};

const FAMILY: &str = "sans-serif";

pub(crate) const SYSTEM_FONT_CANDIDATES: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/noto/NotoSans-Regular.ttf",
    "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf",
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "C:\\Windows\\Fonts\\arial.ttf",
];

#[derive(Debug, Default)]
struct Registry {
    /// 경로별 폰트 데이터 (레지스트리가 'static 참조를 요구)
    loaded: HashMap<PathBuf, &'static [u8]>,
    /// 현재 `sans-serif`로 등록된 폰트
    active: Option<PathBuf>,
}

impl Registry {
    fn activate(&mut self, path: &Path) -> RidgeResult<()> {
        if self.active.as_deref() == Some(path) {
            return Ok(());
        }

        let bytes = match self.loaded.get(path) {
            Some(bytes) => *bytes,
            None => {
                let data = fs::read(path).map_err(|e| {
                    RidgeError::export(path, format!("cannot read font file: {}", e))
                })?;
                let data: &'static [u8] = Box::leak(data.into_boxed_slice());
                self.loaded.insert(path.to_path_buf(), data);
                data
            }
        };

        register_font(FAMILY, FontStyle::Normal, bytes)
            .and_then(|_| register_font(FAMILY, FontStyle::Bold, bytes))
            .map_err(|_| RidgeError::export(path, "not a usable TrueType/OpenType font"))?;

        debug!(path = %path.display(), "Font activated");
        self.active = Some(path.to_path_buf());
        Ok(())
    }

    fn activate_system(&mut self) {
        for candidate in SYSTEM_FONT_CANDIDATES.iter().map(Path::new) {
            if !candidate.is_file() {
                continue;
            }
            match self.activate(candidate) {
                Ok(()) => return,
                Err(e) => warn!(error = %e, "Skipping system font"),
            }
        }
    }
}

static REGISTRY: OnceLock<Mutex<Registry>> = OnceLock::new();

/// 등록된 폰트에 대한 잠금. 해제될 때까지 다른 내보내기는 폰트를 바꾸지 못합니다.
pub struct FontLease {
    registry: MutexGuard<'static, Registry>,
}

impl FontLease {
    /// 현재 등록된 폰트 파일. 사용할 폰트가 전혀 없으면 `None`.
    pub fn path(&self) -> Option<&Path> {
        self.registry.active.as_deref()
    }
}

/// `preferred` 폰트를 등록하고 잠금을 반환합니다.
///
/// `preferred`가 없으면 시스템 폰트 후보를 순서대로 시도합니다. 명시한 폰트를
/// 읽거나 등록할 수 없으면 `Export` 오류입니다.
pub fn acquire(preferred: Option<&Path>) -> RidgeResult<FontLease> {
    let mut registry = REGISTRY
        .get_or_init(Default::default)
        .lock()
        .unwrap_or_else(PoisonError::into_inner);

    match preferred {
        Some(path) => registry.activate(path)?,
        None => registry.activate_system(),
    }

    Ok(FontLease { registry })
}
