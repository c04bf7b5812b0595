//! 가격 → 수익률 변환.
//!
//! 종목별 (날짜, 조정 종가) 시계열을 모아 전체 날짜의 합집합으로 정렬한 뒤,
//! 종목마다 직전 가격으로 빈 날짜를 채우고 일간 수익률 `p_t / p_{t-1} - 1`을
//! 계산합니다. 한 종목이라도 값이 없는 날짜는 행 전체를 제외합니다.

use std::collections::{BTreeMap, BTreeSet};

use chrono::NaiveDate;
use ridge_core::{ReturnsTable, RidgeError, RidgeResult};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{DataError, DataResult};

/// 하루치 가격.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PricePoint {
    pub date: NaiveDate,
    /// 조정 종가
    pub close: f64,
}

impl PricePoint {
    pub fn new(date: NaiveDate, close: f64) -> Self {
        Self { date, close }
    }
}

/// 종목별 가격 테이블 (삽입 순서 유지).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PriceTable {
    series: Vec<(String, BTreeMap<NaiveDate, f64>)>,
}

impl PriceTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// 종목 시계열을 추가합니다. 같은 날짜가 반복되면 마지막 값을 사용합니다.
    pub fn insert_series(
        &mut self,
        symbol: impl Into<String>,
        points: impl IntoIterator<Item = PricePoint>,
    ) -> DataResult<()> {
        let symbol = symbol.into();
        if self.series.iter().any(|(s, _)| *s == symbol) {
            return Err(DataError::InvalidData(format!(
                "duplicate symbol: {}",
                symbol
            )));
        }

        let prices: BTreeMap<NaiveDate, f64> = points
            .into_iter()
            .filter(|p| p.close.is_finite() && p.close > 0.0)
            .map(|p| (p.date, p.close))
            .collect();

        self.series.push((symbol, prices));
        Ok(())
    }

    /// 종목 목록 (삽입 순서).
    pub fn symbols(&self) -> Vec<&str> {
        self.series.iter().map(|(s, _)| s.as_str()).collect()
    }

    /// 모든 종목 날짜의 합집합 (오름차순).
    pub fn dates(&self) -> Vec<NaiveDate> {
        self.series
            .iter()
            .flat_map(|(_, prices)| prices.keys().copied())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    /// 일간 수익률 테이블로 변환합니다.
    ///
    /// 모든 종목이 겹치는 구간이 없으면 `InvalidInput`입니다.
    pub fn to_returns(&self) -> RidgeResult<ReturnsTable> {
        if self.series.is_empty() {
            return Err(RidgeError::InvalidInput(
                "price table has no symbols".to_string(),
            ));
        }

        let dates = self.dates();
        let filled: Vec<Vec<Option<f64>>> = self
            .series
            .iter()
            .map(|(_, prices)| forward_fill(&dates, prices))
            .collect();
        let returns: Vec<Vec<Option<f64>>> = filled.iter().map(|p| pct_change(p)).collect();

        let keep: Vec<usize> = (0..dates.len())
            .filter(|&row| returns.iter().all(|col| col[row].is_some()))
            .collect();

        if keep.is_empty() {
            return Err(RidgeError::InvalidInput(
                "no trading days with prices for every symbol".to_string(),
            ));
        }

        let mut table = ReturnsTable::with_dates(keep.iter().map(|&row| dates[row]).collect());
        for ((symbol, _), column) in self.series.iter().zip(&returns) {
            let values = keep.iter().filter_map(|&row| column[row]).collect();
            table.push_column(symbol.clone(), values)?;
        }

        debug!(
            symbols = table.num_assets(),
            rows = table.num_rows(),
            dropped = dates.len() - keep.len(),
            "Prices converted to returns"
        );
        Ok(table)
    }
}

/// 날짜 축에 맞춰 가격을 정렬하고 빈 날짜를 직전 가격으로 채웁니다.
/// 첫 가격 이전 날짜는 비어 있습니다.
fn forward_fill(dates: &[NaiveDate], prices: &BTreeMap<NaiveDate, f64>) -> Vec<Option<f64>> {
    let mut last = None;
    dates
        .iter()
        .map(|date| {
            if let Some(&price) = prices.get(date) {
                last = Some(price);
            }
            last
        })
        .collect()
}

/// 변화율. 첫 행과 값이 없는 행은 `None`.
fn pct_change(prices: &[Option<f64>]) -> Vec<Option<f64>> {
    std::iter::once(None)
        .chain(prices.windows(2).map(|w| match (w[0], w[1]) {
            (Some(prev), Some(curr)) => Some(curr / prev - 1.0).filter(|r| r.is_finite()),
            _ => None,
        }))
        .take(prices.len())
        .collect()
}
