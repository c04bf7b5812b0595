//! 수익률 테이블 CSV 스냅샷.
//!
//! 형식:
//!
//! ```text
//! date,AAPL,MSFT,SPY
//! 2024-01-03,-0.0075,0.0012,-0.0081
//! 2024-01-04,-0.0127,-0.0073,-0.0034
//! ```
//!
//! 첫 열 `date`는 선택 사항입니다. 나머지 열 이름이 자산 식별자가 되며
//! 열 순서가 그대로 플롯 순서가 됩니다.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use ridge_core::{ReturnsTable, RidgeError, RidgeResult};
use tracing::{debug, info};

const DATE_COLUMN: &str = "date";
const DATE_FORMAT: &str = "%Y-%m-%d";

fn invalid(path: &Path, message: impl std::fmt::Display) -> RidgeError {
    RidgeError::InvalidInput(format!("{}: {}", path.display(), message))
}

/// CSV 스냅샷에서 수익률 테이블을 읽습니다.
///
/// 파일이 없으면 `InputNotFound`, 빈 셀이나 숫자가 아닌 값, NaN/무한대,
/// 중복 열, 자산 열 없음은 `InvalidInput`입니다.
pub fn load_returns(path: impl AsRef<Path>) -> RidgeResult<ReturnsTable> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(RidgeError::InputNotFound(path.to_path_buf()));
    }

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_path(path)
        .map_err(|e| invalid(path, e))?;

    let headers = reader.headers().map_err(|e| invalid(path, e))?.clone();
    let has_date = headers
        .get(0)
        .is_some_and(|h| h.eq_ignore_ascii_case(DATE_COLUMN));
    let offset = usize::from(has_date);

    let asset_ids: Vec<String> = headers.iter().skip(offset).map(str::to_string).collect();
    if asset_ids.is_empty() {
        return Err(invalid(path, "no asset columns"));
    }

    let mut dates: Vec<NaiveDate> = Vec::new();
    let mut columns: Vec<Vec<f64>> = vec![Vec::new(); asset_ids.len()];

    for (row, record) in reader.records().enumerate() {
        // 헤더가 1행이므로 데이터는 2행부터
        let line = row + 2;
        let record = record.map_err(|e| invalid(path, e))?;

        if has_date {
            let raw = record.get(0).unwrap_or_default();
            let date = NaiveDate::parse_from_str(raw, DATE_FORMAT)
                .map_err(|_| invalid(path, format!("line {}: invalid date '{}'", line, raw)))?;
            if dates.last().is_some_and(|prev| *prev >= date) {
                return Err(invalid(
                    path,
                    format!("line {}: dates must be strictly ascending ({})", line, date),
                ));
            }
            dates.push(date);
        }

        for (col, field) in record.iter().skip(offset).enumerate() {
            let value: f64 = field.parse().map_err(|_| {
                invalid(
                    path,
                    format!("line {}, column {}: not a number '{}'", line, asset_ids[col], field),
                )
            })?;
            if !value.is_finite() {
                return Err(invalid(
                    path,
                    format!("line {}, column {}: non-finite value", line, asset_ids[col]),
                ));
            }
            columns[col].push(value);
        }
    }

    let mut table = if has_date {
        ReturnsTable::with_dates(dates)
    } else {
        ReturnsTable::new()
    };
    for (asset_id, returns) in asset_ids.into_iter().zip(columns) {
        table.push_column(asset_id, returns)?;
    }

    debug!(
        path = %path.display(),
        assets = table.num_assets(),
        rows = table.num_rows(),
        "Returns table loaded"
    );
    Ok(table)
}

/// 수익률 테이블을 CSV 스냅샷으로 저장합니다.
///
/// 상위 디렉토리가 없으면 생성합니다.
pub fn save_returns(path: impl AsRef<Path>, table: &ReturnsTable) -> RidgeResult<()> {
    let path = path.as_ref();
    if table.is_empty() {
        return Err(invalid(path, "refusing to save a table without asset columns"));
    }

    let rows = table.num_rows();
    if let Some(short) = table.columns().iter().find(|c| c.returns.len() != rows) {
        return Err(invalid(
            path,
            format!("column {} has {} values, expected {}", short.asset_id, short.returns.len(), rows),
        ));
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| invalid(parent, e))?;
    }

    let has_date = !table.dates().is_empty();
    let mut writer = csv::Writer::from_path(path).map_err(|e| invalid(path, e))?;

    let mut header: Vec<&str> = Vec::with_capacity(table.num_assets() + 1);
    if has_date {
        header.push(DATE_COLUMN);
    }
    header.extend(table.asset_ids());
    writer.write_record(&header).map_err(|e| invalid(path, e))?;

    for i in 0..rows {
        let mut record: Vec<String> = Vec::with_capacity(header.len());
        if has_date {
            record.push(table.dates()[i].format(DATE_FORMAT).to_string());
        }
        record.extend(table.columns().iter().map(|c| c.returns[i].to_string()));
        writer.write_record(&record).map_err(|e| invalid(path, e))?;
    }
    writer.flush().map_err(|e| invalid(path, e))?;

    info!(
        path = %path.display(),
        assets = table.num_assets(),
        rows,
        "Returns table saved"
    );
    Ok(())
}
