//! 릿지 플롯 구성.
//!
//! 배치된 곡선과 통계로부터 렌더링 독립적인 장면 기술([`FigureArtifact`])을
//! 만듭니다. 실제 픽셀 출력은 [`crate::exporter`]가 담당합니다.
//!
//! # 구성 요소
//!
//! - 자산별 채워진 영역 (기준선 ~ 이동된 밀도 곡선), viridis 색상
//! - y축: 기준선 위치에 자산 식별자
//! - x축: "Returns" 라벨과 눈금
//! - 하단 통계 테이블 (Stock, Mean, Std Dev, Width)
//! - 격자와 테두리(spine) 없음

use ridge_core::{
    AssetStatistics, AxisTick, RidgeError, RidgeLayout, RidgeResult, DEFAULT_TITLE,
    STATISTICS_HEADERS,
};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::palette::{self, Rgb};

/// 채우기 불투명도
pub const DEFAULT_FILL_ALPHA: f64 = 0.4;

/// 그림 스타일.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureStyle {
    /// 제목
    pub title: String,
    /// x축 라벨
    pub x_label: String,
    /// 플롯 영역 크기 (인치, 너비 × 높이)
    pub plot_size_in: (f64, f64),
    /// 제목 글꼴 크기 (pt)
    pub title_font_pt: f64,
    /// 축 라벨 글꼴 크기 (pt)
    pub label_font_pt: f64,
    /// 눈금 글꼴 크기 (pt)
    pub tick_font_pt: f64,
    /// 테이블 글꼴 크기 (pt)
    pub table_font_pt: f64,
    /// 곡선 채우기 불투명도
    pub fill_alpha: f64,
    /// 배경 격자 표시
    pub show_grid: bool,
    /// 축 테두리 표시
    pub show_spines: bool,
}

impl Default for FigureStyle {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            x_label: "Returns".to_string(),
            plot_size_in: (10.0, 8.0),
            title_font_pt: 16.0,
            label_font_pt: 12.0,
            tick_font_pt: 10.0,
            table_font_pt: 10.0,
            fill_alpha: DEFAULT_FILL_ALPHA,
            show_grid: false,
            show_spines: false,
        }
    }
}

impl FigureStyle {
    /// 제목을 지정합니다.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }
}

/// 채워진 릿지 한 개.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RidgeArea {
    pub asset_id: String,
    /// 채우기 하한 (시각적 0선)
    pub baseline: f64,
    /// 상단 곡선 `(x, y)`
    pub points: Vec<(f64, f64)>,
    pub color: Rgb,
    pub alpha: f64,
}

/// 하단 통계 테이블.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatisticsTable {
    pub headers: [String; 4],
    pub rows: Vec<[String; 4]>,
}

impl StatisticsTable {
    /// 통계 목록으로 테이블을 만듭니다 (순서 유지).
    pub fn from_statistics(stats: &[AssetStatistics]) -> Self {
        Self {
            headers: STATISTICS_HEADERS.map(str::to_string),
            rows: stats.iter().map(AssetStatistics::table_row).collect(),
        }
    }
}

/// 구성된 그림 (메모리 내 장면).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FigureArtifact {
    pub style: FigureStyle,
    /// 데이터 좌표 x 범위
    pub x_range: (f64, f64),
    /// 데이터 좌표 y 범위
    pub y_range: (f64, f64),
    /// 아래(0번)부터 위로 그릴 릿지
    pub ridges: Vec<RidgeArea>,
    pub y_ticks: Vec<AxisTick>,
    pub x_ticks: Vec<AxisTick>,
    pub table: StatisticsTable,
}

/// 그림 구성기.
#[derive(Debug, Clone, Default)]
pub struct FigureComposer {
    style: FigureStyle,
}

impl FigureComposer {
    pub fn new(style: FigureStyle) -> Self {
        Self { style }
    }

    /// 배치된 곡선과 통계로 그림을 구성합니다.
    ///
    /// 통계는 곡선과 같은 순서, 같은 개수여야 합니다.
    pub fn compose(
        &self,
        layout: &RidgeLayout,
        statistics: &[AssetStatistics],
    ) -> RidgeResult<FigureArtifact> {
        if layout.curves.is_empty() {
            return Err(RidgeError::InvalidInput(
                "returns table has no asset columns".to_string(),
            ));
        }
        if layout.curves.len() != statistics.len() {
            return Err(RidgeError::InvalidInput(format!(
                "{} curves but {} statistics rows",
                layout.curves.len(),
                statistics.len()
            )));
        }
        if let Some((curve, stat)) = layout
            .curves
            .iter()
            .zip(statistics)
            .find(|(c, s)| c.asset_id != s.asset_id)
        {
            return Err(RidgeError::InvalidInput(format!(
                "statistics order mismatch: curve {} vs row {}",
                curve.asset_id, stat.asset_id
            )));
        }

        let total = layout.curves.len();
        let ridges: Vec<RidgeArea> = layout
            .curves
            .iter()
            .map(|curve| RidgeArea {
                asset_id: curve.asset_id.clone(),
                baseline: curve.baseline,
                points: curve.points().collect(),
                color: palette::color(curve.index, total),
                alpha: self.style.fill_alpha,
            })
            .collect();

        let (x_min, x_max) = layout.x_extent().unwrap_or((-1.0, 1.0));
        let x_range = pad_range(x_min, x_max, 0.02);

        let y_top = layout.y_max().max(layout.y_spacing * (total - 1) as f64);
        let y_range = pad_range(0.0, y_top, 0.05);

        let x_ticks = nice_ticks(x_range.0, x_range.1, 7)
            .into_iter()
            .map(|position| AxisTick {
                position,
                label: format_tick(position),
            })
            .collect();

        debug!(
            assets = total,
            x_min = x_range.0,
            x_max = x_range.1,
            y_max = y_range.1,
            "Figure composed"
        );

        Ok(FigureArtifact {
            style: self.style.clone(),
            x_range,
            y_range,
            ridges,
            y_ticks: layout.ticks.clone(),
            x_ticks,
            table: StatisticsTable::from_statistics(statistics),
        })
    }
}

/// 범위 양쪽에 비율만큼 여백을 추가합니다. 폭이 0이면 ±1 단위로 넓힙니다.
fn pad_range(lo: f64, hi: f64, ratio: f64) -> (f64, f64) {
    let span = hi - lo;
    if span.abs() < f64::EPSILON {
        let adjust = if lo == 0.0 { 1.0 } else { lo.abs() * 0.1 };
        return (lo - adjust, hi + adjust);
    }
    (lo - span * ratio, hi + span * ratio)
}

/// 1, 2, 5 × 10^k 간격의 눈금.
pub fn nice_ticks(lo: f64, hi: f64, max_ticks: usize) -> Vec<f64> {
    if !(lo.is_finite() && hi.is_finite()) || hi <= lo || max_ticks < 2 {
        return Vec::new();
    }

    let raw_step = (hi - lo) / (max_ticks - 1) as f64;
    let magnitude = 10f64.powf(raw_step.log10().floor());
    let step = [1.0, 2.0, 5.0, 10.0]
        .iter()
        .map(|m| m * magnitude)
        .find(|s| *s >= raw_step)
        .unwrap_or(10.0 * magnitude);

    let first = (lo / step).ceil() as i64;
    let last = (hi / step).floor() as i64;
    (first..=last)
        .map(|k| {
            let v = k as f64 * step;
            // -0.0 방지
            if v == 0.0 {
                0.0
            } else {
                v
            }
        })
        .collect()
}

/// 눈금 라벨 (불필요한 0 제거).
fn format_tick(value: f64) -> String {
    let s = format!("{:.4}", value);
    let s = s.trim_end_matches('0').trim_end_matches('.');
    if s == "-0" {
        "0".to_string()
    } else {
        s.to_string()
    }
}
