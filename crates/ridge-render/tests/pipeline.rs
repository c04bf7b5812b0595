//! 수익률 테이블 → 이미지 파일 전체 흐름 테스트.

use std::fs;

use ridge_core::{ReturnsTable, RidgeError};
use ridge_render::{render_ridge_plot, RenderRequest};

const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

fn two_asset_table() -> ReturnsTable {
    ReturnsTable::new()
        .with_column("A", vec![0.01, -0.02, 0.03, -0.01, 0.02])
        .unwrap()
        .with_column("B", vec![0.05, -0.05, 0.04, -0.04, 0.0])
        .unwrap()
}

fn request(dir: &std::path::Path, file_name: &str) -> RenderRequest {
    // 테스트 속도를 위해 낮은 해상도
    RenderRequest::new(dir, file_name).with_dpi(40)
}

#[test]
fn renders_two_assets_with_statistics() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = render_ridge_plot(&two_asset_table(), &request(dir.path(), "plot.png")).unwrap();

    assert_eq!(outcome.output_path, dir.path().join("plot.png"));
    let bytes = fs::read(&outcome.output_path).unwrap();
    assert_eq!(&bytes[..8], PNG_SIGNATURE);

    let [a, b] = outcome.statistics.as_slice() else {
        panic!("expected two rows, got {:?}", outcome.statistics);
    };
    assert_eq!(a.asset_id, "A");
    assert!((a.mean - 0.006).abs() < 1e-12);
    assert!((a.std_dev - 0.00043f64.sqrt()).abs() < 1e-12);
    assert!((a.width80 - 0.042).abs() < 1e-12);

    assert_eq!(b.asset_id, "B");
    assert!(b.mean.abs() < 1e-12);
    assert!((b.std_dev - 0.00205f64.sqrt()).abs() < 1e-12);
    assert!((b.width80 - 0.092).abs() < 1e-12);

    assert_eq!(a.table_row(), ["A", "0.01", "0.02", "0.04"]);
    assert_eq!(b.table_row(), ["B", "0.00", "0.05", "0.09"]);
}

#[test]
fn zero_spacing_is_rejected_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let request = request(dir.path(), "plot.png").with_y_spacing(0.0);

    let err = render_ridge_plot(&two_asset_table(), &request).unwrap_err();

    assert!(matches!(err, RidgeError::InvalidSpacing(s) if s == 0.0));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn missing_output_directory_fails_with_export_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("not-created");

    let err = render_ridge_plot(&two_asset_table(), &request(&missing, "plot.png")).unwrap_err();

    assert!(err.is_export_error(), "{}", err);
    assert!(!missing.exists());
}

#[test]
fn rendering_is_repeatable() {
    let dir = tempfile::tempdir().unwrap();
    let table = two_asset_table();

    let first = render_ridge_plot(&table, &request(dir.path(), "plot.png")).unwrap();
    let first_bytes = fs::read(&first.output_path).unwrap();

    let second = render_ridge_plot(&table, &request(dir.path(), "plot.png")).unwrap();
    let second_bytes = fs::read(&second.output_path).unwrap();

    assert_eq!(first.statistics, second.statistics);
    assert_eq!(first_bytes, second_bytes);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn svg_output_by_extension() {
    let dir = tempfile::tempdir().unwrap();
    let outcome = render_ridge_plot(&two_asset_table(), &request(dir.path(), "plot.svg")).unwrap();

    let text = fs::read_to_string(&outcome.output_path).unwrap();
    assert!(text.contains("<svg"));
    // 자산마다 채워진 다각형 하나
    assert!(text.matches("<polygon").count() >= 2);
}

#[test]
fn unsupported_extension_is_export_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = render_ridge_plot(&two_asset_table(), &request(dir.path(), "plot.jpg")).unwrap_err();

    assert!(err.is_export_error());
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn degenerate_column_stops_pipeline() {
    let dir = tempfile::tempdir().unwrap();
    let table = ReturnsTable::new()
        .with_column("FLAT", vec![0.01, 0.01, 0.01])
        .unwrap();

    let err = render_ridge_plot(&table, &request(dir.path(), "plot.png")).unwrap_err();

    assert!(matches!(err, RidgeError::DegenerateSeries { ref asset, .. } if asset == "FLAT"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn empty_table_is_invalid_input() {
    let dir = tempfile::tempdir().unwrap();
    let err = render_ridge_plot(&ReturnsTable::new(), &request(dir.path(), "plot.png")).unwrap_err();

    assert!(matches!(err, RidgeError::InvalidInput(_)));
}

#[test]
fn unreadable_font_path_fails_without_output() {
    let dir = tempfile::tempdir().unwrap();
    let request = request(dir.path(), "plot.png")
        .with_font_path(Some(dir.path().join("not-here.ttf")));

    let err = render_ridge_plot(&two_asset_table(), &request).unwrap_err();

    assert!(err.is_export_error(), "{}", err);
    assert!(err.to_string().contains("not-here.ttf"));
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}

#[test]
fn rerender_replaces_existing_file_cleanly() {
    let dir = tempfile::tempdir().unwrap();
    let target = dir.path().join("plot.png");
    fs::write(&target, b"stale").unwrap();

    render_ridge_plot(&two_asset_table(), &request(dir.path(), "plot.png")).unwrap();

    assert_eq!(&fs::read(&target).unwrap()[..8], PNG_SIGNATURE);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
}

#[test]
fn dpi_above_limit_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let request = request(dir.path(), "plot.png").with_dpi(1_000_000_000);

    let err = render_ridge_plot(&two_asset_table(), &request).unwrap_err();

    assert!(err.is_export_error(), "{}", err);
    assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
}
