//! 가격 데이터 Provider.
//!
//! - `PriceProvider`: 종목별 일간 조정 종가 조회 trait
//! - `YahooPriceProvider`: Yahoo Finance v8 chart API 구현
//! - `fetch_price_table`: 여러 종목을 순서대로 받아 `PriceTable` 구성

pub mod yahoo;

use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{DataError, DataResult};
use crate::returns::{PricePoint, PriceTable};

pub use yahoo::{parse_chart_response, validate_range, YahooPriceProvider, YAHOO_CHART_URL};

/// 요청 사이 대기 시간 (과도한 호출 방지)
pub const REQUEST_INTERVAL: Duration = Duration::from_millis(250);

/// 일간 조정 종가 Provider.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Provider 이름 (로그용)
    fn name(&self) -> &str;

    /// `range` 기간의 일간 조정 종가를 조회합니다.
    async fn fetch_adjusted_closes(&self, symbol: &str, range: &str) -> DataResult<Vec<PricePoint>>;
}

/// 종목들을 순서대로 조회하여 가격 테이블을 만듭니다.
///
/// 데이터가 없는 종목은 경고 후 제외하며, 모든 종목이 실패하면 오류입니다.
/// `on_symbol`은 각 요청 직전에 (순번, 심볼)로 호출됩니다.
pub async fn fetch_price_table<P>(
    provider: &P,
    symbols: &[String],
    range: &str,
    mut on_symbol: impl FnMut(usize, &str),
) -> DataResult<PriceTable>
where
    P: PriceProvider + ?Sized,
{
    validate_range(range)?;

    let mut table = PriceTable::new();
    let mut failed: Vec<&str> = Vec::new();

    for (i, symbol) in symbols.iter().enumerate() {
        if i > 0 {
            tokio::time::sleep(REQUEST_INTERVAL).await;
        }
        on_symbol(i, symbol.as_str());

        match provider.fetch_adjusted_closes(symbol, range).await {
            Ok(points) => {
                info!(
                    symbol = %symbol,
                    count = points.len(),
                    "Fetched {} daily prices from {}",
                    points.len(),
                    provider.name()
                );
                table.insert_series(symbol.clone(), points)?;
            }
            Err(e) => {
                warn!(symbol = %symbol, "{} failed: {}, skipping", provider.name(), e);
                failed.push(symbol.as_str());
            }
        }
    }

    if table.is_empty() {
        return Err(DataError::NoData(format!(
            "all symbols failed: {}",
            failed.join(", ")
        )));
    }
    if !failed.is_empty() {
        warn!(skipped = ?failed, "Some symbols were excluded");
    }
    debug!(symbols = ?table.symbols(), "Price table assembled");
    Ok(table)
}
