//! 이미지 내보내기.
//!
//! [`FigureArtifact`]를 PNG(기본) 또는 SVG 파일로 씁니다. 형식은 파일 확장자로
//! 결정하며, 대상 디렉토리는 미리 존재해야 합니다 (생성하지 않음).
//!
//! 캔버스는 그림 내용에 맞춰 여백을 최소화한 배치([`CanvasLayout`])를 사용하고,
//! 통계 테이블 영역만큼 아래로 확장됩니다.
//!
//! 해상도는 픽셀 크기(인치 × dpi)로만 반영됩니다. PNG에 물리 해상도(pHYs)
//! 청크는 기록하지 않습니다.
//!
//! 이미지는 같은 디렉토리의 임시 파일에 그린 뒤 이름을 바꿔 완성하므로,
//! 실패해도 기존 파일은 그대로 남습니다.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters_backend::DrawingBackend;
use ridge_core::{RidgeError, RidgeResult, DEFAULT_DPI, MAX_DPI};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::composer::{FigureArtifact, FigureStyle, StatisticsTable};
use crate::font;

/// 출력 이미지 형식
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    Svg,
}

impl ImageFormat {
    /// 파일 확장자로 형식을 결정합니다 (대소문자 무시).
    pub fn from_path(path: &Path) -> RidgeResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase());

        match ext.as_deref() {
            Some("png") => Ok(Self::Png),
            Some("svg") => Ok(Self::Svg),
            Some(other) => Err(RidgeError::export(
                path,
                format!("unsupported image format: .{}", other),
            )),
            None => Err(RidgeError::export(path, "file name has no image extension")),
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
        }
    }
}

/// 내보내기 옵션
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportOptions {
    /// 해상도 (인치당 픽셀)
    pub dpi: u32,
    /// 라벨용 TrueType 폰트 (없으면 시스템 폰트 탐색). 읽을 수 없으면 내보내기 실패
    pub font_path: Option<PathBuf>,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            dpi: DEFAULT_DPI,
            font_path: None,
        }
    }
}

/// 픽셀 사각형 (좌상단 포함, 우하단 제외)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x0: i32,
    pub y0: i32,
    pub x1: i32,
    pub y1: i32,
}

impl PixelRect {
    pub fn width(&self) -> i32 {
        self.x1 - self.x0
    }

    pub fn height(&self) -> i32 {
        self.y1 - self.y0
    }

    fn center_x(&self) -> i32 {
        (self.x0 + self.x1) / 2
    }
}

/// 캔버스 배치 (픽셀 단위).
///
/// 위에서부터 제목, 플롯 영역, x축 눈금/라벨, 통계 테이블 순서로 겹치지 않게
/// 쌓입니다. 왼쪽 여백은 가장 긴 자산 라벨에 맞춥니다.
#[derive(Debug, Clone, PartialEq)]
pub struct CanvasLayout {
    pub width: u32,
    pub height: u32,
    /// 1pt당 픽셀 수 (dpi / 72)
    pub px_per_pt: f64,
    pub title_y: i32,
    pub axes: PixelRect,
    pub x_tick_y: i32,
    pub x_label_y: i32,
    pub table: PixelRect,
    pub row_height: i32,
}

impl CanvasLayout {
    /// `dpi`는 `1..=MAX_DPI`로 제한됩니다.
    pub fn compute(figure: &FigureArtifact, dpi: u32) -> Self {
        let style = &figure.style;
        let dpi = f64::from(dpi.clamp(1, MAX_DPI));
        let pt = dpi / 72.0;
        let inch = |v: f64| (v * dpi).round() as i32;
        let points = |v: f64| (v * pt).round() as i32;

        let longest_label = figure
            .y_ticks
            .iter()
            .map(|t| t.label.chars().count())
            .max()
            .unwrap_or(0) as f64;

        let left = inch(0.25) + points(longest_label * style.tick_font_pt * 0.62 + 6.0);
        let right = inch(0.4);
        let top = inch(0.15);
        let title_band = points(style.title_font_pt * 2.0);
        let x_axis_band = points((style.tick_font_pt + style.label_font_pt) * 2.0);

        let (width_in, height_in) = style.plot_size_in;
        let width = inch(width_in).max(left + right + inch(2.0));
        let plot_bottom = inch(height_in).max(top + title_band + inch(1.0)) - x_axis_band;

        let axes = PixelRect {
            x0: left,
            y0: top + title_band,
            x1: width - right,
            y1: plot_bottom,
        };

        let row_height = points(style.table_font_pt * 2.2).max(1);
        let rows = figure.table.rows.len() as i32 + 1;
        let table_top = axes.y1 + x_axis_band + inch(0.2);
        let table = PixelRect {
            x0: axes.x0,
            y0: table_top,
            x1: axes.x1,
            y1: table_top + rows * row_height,
        };
        let height = table.y1 + inch(0.2);

        Self {
            width: width as u32,
            height: height as u32,
            px_per_pt: pt,
            title_y: top + title_band / 2,
            axes,
            x_tick_y: axes.y1 + points(style.tick_font_pt * 0.9),
            x_label_y: axes.y1 + points(style.tick_font_pt * 1.8 + style.label_font_pt * 0.8),
            table,
            row_height,
        }
    }

    fn line_width(&self) -> u32 {
        (0.8 * self.px_per_pt).round().max(1.0) as u32
    }
}

/// 이미지 내보내기기.
#[derive(Debug, Clone, Default)]
pub struct ImageExporter {
    options: ExportOptions,
}

impl ImageExporter {
    pub fn new(options: ExportOptions) -> Self {
        Self { options }
    }

    /// 그림을 `directory/file_name`에 기록하고 경로를 반환합니다.
    ///
    /// 디렉토리가 없거나 쓸 수 없으면 `Export` 오류이며 파일은 생기지 않습니다.
    /// 같은 이름의 파일은 성공했을 때만 교체됩니다. PNG는 글자를 그릴 폰트가
    /// 없으면 실패합니다.
    pub fn export(
        &self,
        figure: &FigureArtifact,
        directory: &Path,
        file_name: &str,
    ) -> RidgeResult<PathBuf> {
        if file_name.trim().is_empty() {
            return Err(RidgeError::export(directory, "empty file name"));
        }
        if Path::new(file_name).components().count() != 1 {
            return Err(RidgeError::export(
                directory,
                format!("file name must not contain a path: {}", file_name),
            ));
        }
        if self.options.dpi == 0 || self.options.dpi > MAX_DPI {
            return Err(RidgeError::export(
                directory,
                format!("dpi must be between 1 and {} (got {})", MAX_DPI, self.options.dpi),
            ));
        }

        check_directory(directory)?;

        let path = directory.join(file_name);
        let format = ImageFormat::from_path(&path)?;

        let font = font::acquire(self.options.font_path.as_deref())?;
        require_font(format, font.path(), &path)?;

        let layout = CanvasLayout::compute(figure, self.options.dpi);
        debug!(
            width = layout.width,
            height = layout.height,
            font = ?font.path(),
            "Canvas prepared"
        );

        let size = (layout.width, layout.height);
        write_staged(&path, format, |staging| match format {
            ImageFormat::Png => render(
                BitMapBackend::new(staging, size).into_drawing_area(),
                figure,
                &layout,
            ),
            ImageFormat::Svg => render(
                SVGBackend::new(staging, size).into_drawing_area(),
                figure,
                &layout,
            ),
        })
        .map_err(|reason| RidgeError::export(&path, reason))?;
        drop(font);

        info!(
            path = %path.display(),
            format = ?format,
            width = layout.width,
            height = layout.height,
            dpi = self.options.dpi,
            "Ridge plot exported"
        );
        Ok(path)
    }
}

fn check_directory(directory: &Path) -> RidgeResult<()> {
    let metadata = fs::metadata(directory)
        .map_err(|_| RidgeError::export(directory, "destination directory does not exist"))?;

    if !metadata.is_dir() {
        return Err(RidgeError::export(directory, "destination is not a directory"));
    }
    if metadata.permissions().readonly() {
        return Err(RidgeError::export(
            directory,
            "destination directory is not writable",
        ));
    }
    Ok(())
}

/// 비트맵은 글리프를 직접 그리므로 등록된 폰트가 필요합니다.
/// SVG는 글자를 `<text>` 요소로 남기므로 폰트 없이도 완전합니다.
fn require_font(format: ImageFormat, font: Option<&Path>, path: &Path) -> RidgeResult<()> {
    if format == ImageFormat::Png && font.is_none() {
        return Err(RidgeError::export(
            path,
            "no usable font for PNG labels (set plot.font_path)",
        ));
    }
    Ok(())
}

static STAGING_SEQ: AtomicU64 = AtomicU64::new(0);

/// `path` 옆의 숨김 임시 파일 경로. 백엔드가 확장자로 인코딩을 고르므로
/// 형식 확장자를 유지합니다.
fn staging_path(path: &Path, format: ImageFormat) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let seq = STAGING_SEQ.fetch_add(1, Ordering::Relaxed);
    path.with_file_name(format!(
        ".{}.{}-{}.partial.{}",
        stem,
        std::process::id(),
        seq,
        format.extension()
    ))
}

/// 임시 파일에 그린 뒤 `path`로 이름을 바꿉니다. 실패하면 임시 파일만 지웁니다.
fn write_staged<F>(path: &Path, format: ImageFormat, draw: F) -> Result<(), String>
where
    F: FnOnce(&Path) -> Result<(), String>,
{
    let staging = staging_path(path, format);
    let result = draw(&staging).and_then(|_| {
        fs::rename(&staging, path).map_err(|e| format!("cannot move image into place: {}", e))
    });

    if result.is_err() {
        let _ = fs::remove_file(&staging);
    }
    result
}

fn render<DB: DrawingBackend>(
    root: DrawingArea<DB, Shift>,
    figure: &FigureArtifact,
    layout: &CanvasLayout,
) -> Result<(), String> {
    draw_figure(&root, figure, layout)
        .and_then(|_| root.present())
        .map_err(|e| e.to_string())
}

fn text_style(size_pt: f64, px_per_pt: f64, weight: FontStyle, pos: Pos) -> TextStyle<'static> {
    FontDesc::new(FontFamily::SansSerif, size_pt * px_per_pt, weight)
        .color(&BLACK)
        .pos(pos)
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &FigureArtifact,
    layout: &CanvasLayout,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let style = &figure.style;
    let pt = layout.px_per_pt;

    root.fill(&WHITE)?;

    let title = text_style(
        style.title_font_pt,
        pt,
        FontStyle::Bold,
        Pos::new(HPos::Center, VPos::Center),
    );
    root.draw_text(&style.title, &title, (layout.axes.center_x(), layout.title_y))?;

    let axes = root.clone().shrink(
        (layout.axes.x0, layout.axes.y0),
        (layout.axes.width(), layout.axes.height()),
    );
    let mut chart = ChartBuilder::on(&axes).build_cartesian_2d(
        figure.x_range.0..figure.x_range.1,
        figure.y_range.0..figure.y_range.1,
    )?;

    if style.show_grid {
        let grid = BLACK.mix(0.15);
        chart.draw_series(figure.x_ticks.iter().map(|t| {
            PathElement::new(
                vec![(t.position, figure.y_range.0), (t.position, figure.y_range.1)],
                grid,
            )
        }))?;
        chart.draw_series(figure.y_ticks.iter().map(|t| {
            PathElement::new(
                vec![(figure.x_range.0, t.position), (figure.x_range.1, t.position)],
                grid,
            )
        }))?;
    }

    // 0번(맨 아래)부터 그려 위쪽 릿지가 아래를 덮음
    for ridge in &figure.ridges {
        let color = RGBColor(ridge.color.r, ridge.color.g, ridge.color.b);
        chart.draw_series(AreaSeries::new(
            ridge.points.iter().copied(),
            ridge.baseline,
            color.mix(ridge.alpha).filled(),
        ))?;
    }

    if style.show_spines {
        root.draw(&Rectangle::new(
            [
                (layout.axes.x0, layout.axes.y0),
                (layout.axes.x1, layout.axes.y1),
            ],
            BLACK.stroke_width(layout.line_width()),
        ))?;
    }

    let pad = (4.0 * pt).round() as i32;
    let y_tick = text_style(
        style.tick_font_pt,
        pt,
        FontStyle::Normal,
        Pos::new(HPos::Right, VPos::Center),
    );
    for tick in &figure.y_ticks {
        let (_, py) = chart.backend_coord(&(figure.x_range.0, tick.position));
        root.draw_text(&tick.label, &y_tick, (layout.axes.x0 - pad, py))?;
    }

    let x_tick = text_style(
        style.tick_font_pt,
        pt,
        FontStyle::Normal,
        Pos::new(HPos::Center, VPos::Center),
    );
    for tick in &figure.x_ticks {
        let (px, _) = chart.backend_coord(&(tick.position, figure.y_range.0));
        root.draw_text(&tick.label, &x_tick, (px, layout.x_tick_y))?;
    }

    let x_label = text_style(
        style.label_font_pt,
        pt,
        FontStyle::Normal,
        Pos::new(HPos::Center, VPos::Center),
    );
    root.draw_text(
        &style.x_label,
        &x_label,
        (layout.axes.center_x(), layout.x_label_y),
    )?;

    draw_table(root, &figure.table, style, layout)
}

fn draw_table<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    table: &StatisticsTable,
    style: &FigureStyle,
    layout: &CanvasLayout,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let rect = layout.table;
    let columns = table.headers.len() as i32;
    let column_width = rect.width() / columns;
    let border = BLACK.stroke_width(layout.line_width());
    let cell_text = text_style(
        style.table_font_pt,
        layout.px_per_pt,
        FontStyle::Normal,
        Pos::new(HPos::Center, VPos::Center),
    );

    let rows = std::iter::once(&table.headers).chain(table.rows.iter());
    for (r, row) in rows.enumerate() {
        let y0 = rect.y0 + r as i32 * layout.row_height;
        let y1 = y0 + layout.row_height;

        for (c, cell) in row.iter().enumerate() {
            let c = c as i32;
            let x0 = rect.x0 + c * column_width;
            let x1 = if c == columns - 1 {
                rect.x1
            } else {
                x0 + column_width
            };

            root.draw(&Rectangle::new([(x0, y0), (x1, y1)], border))?;
            root.draw_text(cell, &cell_text, ((x0 + x1) / 2, (y0 + y1) / 2))?;
        }
    }
    Ok(())
}
