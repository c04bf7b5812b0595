//! Yahoo Finance 일봉 조정 종가 Provider.
//!
//! v8 chart API(`range`, `interval=1d`)를 사용합니다. 조정 종가(`adjclose`)가
//! 있으면 우선 사용하고, 없으면 종가(`close`)로 대체합니다.

use std::time::Duration;

use async_trait::async_trait;
use chrono::DateTime;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};

use super::PriceProvider;
use crate::error::{DataError, DataResult};
use crate::returns::PricePoint;

/// 기본 API 주소
pub const YAHOO_CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// Yahoo Finance가 허용하는 조회 기간
pub const VALID_RANGES: &[&str] = &[
    "1d", "5d", "1mo", "3mo", "6mo", "1y", "2y", "5y", "10y", "ytd", "max",
];

const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// Yahoo Finance API v8 응답 구조
#[derive(Debug, Deserialize)]
struct YahooChartResponse {
    chart: YahooChart,
}

#[derive(Debug, Deserialize)]
struct YahooChart {
    result: Option<Vec<YahooResult>>,
    error: Option<YahooError>,
}

#[derive(Debug, Deserialize)]
struct YahooError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct YahooResult {
    meta: Option<YahooMeta>,
    timestamp: Option<Vec<i64>>,
    indicators: YahooIndicators,
}

#[derive(Debug, Deserialize)]
struct YahooMeta {
    /// 거래소 현지 시간 오프셋 (초)
    gmtoffset: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct YahooIndicators {
    quote: Vec<YahooQuote>,
    #[serde(rename = "adjclose")]
    adj_close: Option<Vec<YahooAdjClose>>,
}

#[derive(Debug, Deserialize)]
struct YahooQuote {
    close: Option<Vec<Option<f64>>>,
}

#[derive(Debug, Deserialize)]
struct YahooAdjClose {
    #[serde(rename = "adjclose")]
    adj_close: Option<Vec<Option<f64>>>,
}

/// 조회 기간 문자열을 검증합니다.
pub fn validate_range(range: &str) -> DataResult<()> {
    if VALID_RANGES.contains(&range) {
        Ok(())
    } else {
        Err(DataError::InvalidData(format!(
            "unsupported period '{}' (expected one of {})",
            range,
            VALID_RANGES.join(", ")
        )))
    }
}

/// chart API 응답 본문에서 일별 조정 종가를 추출합니다.
///
/// 가격이 비어 있는 날짜는 건너뜁니다.
pub fn parse_chart_response(symbol: &str, body: &str) -> DataResult<Vec<PricePoint>> {
    let response: YahooChartResponse = serde_json::from_str(body)?;

    if let Some(error) = response.chart.error {
        return Err(DataError::ProviderError {
            code: error.code,
            description: error.description,
        });
    }

    let result = response
        .chart
        .result
        .and_then(|r| r.into_iter().next())
        .ok_or_else(|| DataError::NoData(symbol.to_string()))?;

    let offset = result.meta.and_then(|m| m.gmtoffset).unwrap_or(0);
    let timestamps = result.timestamp.unwrap_or_default();

    let closes = result
        .indicators
        .quote
        .into_iter()
        .next()
        .and_then(|q| q.close)
        .unwrap_or_default();

    // 조정 종가 사용 (있는 경우)
    let adj_closes = result
        .indicators
        .adj_close
        .and_then(|ac| ac.into_iter().next())
        .and_then(|ac| ac.adj_close);

    let mut points = Vec::with_capacity(timestamps.len());
    for (i, &ts) in timestamps.iter().enumerate() {
        let close = adj_closes
            .as_ref()
            .and_then(|ac| ac.get(i).copied().flatten())
            .or_else(|| closes.get(i).copied().flatten());

        let Some(close) = close else {
            continue;
        };
        let Some(date) = DateTime::from_timestamp(ts + offset, 0).map(|dt| dt.date_naive()) else {
            warn!(symbol, timestamp = ts, "Invalid timestamp skipped");
            continue;
        };
        points.push(PricePoint::new(date, close));
    }

    if points.is_empty() {
        return Err(DataError::NoData(symbol.to_string()));
    }
    Ok(points)
}

/// Yahoo Finance Provider.
#[derive(Debug, Clone)]
pub struct YahooPriceProvider {
    client: Client,
    base_url: String,
}

impl YahooPriceProvider {
    pub fn new(timeout: Duration) -> DataResult<Self> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: YAHOO_CHART_URL.to_string(),
        })
    }

    /// API 주소를 변경합니다 (프록시/미러용).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn chart_url(&self, symbol: &str, range: &str) -> String {
        format!(
            "{}/{}?range={}&interval=1d&events=history",
            self.base_url.trim_end_matches('/'),
            symbol,
            range
        )
    }
}

#[async_trait]
impl PriceProvider for YahooPriceProvider {
    fn name(&self) -> &str {
        "Yahoo Finance"
    }

    async fn fetch_adjusted_closes(&self, symbol: &str, range: &str) -> DataResult<Vec<PricePoint>> {
        validate_range(range)?;

        let url = self.chart_url(symbol, range);
        debug!("Fetching from Yahoo Finance: {}", url);

        let response = self.client.get(&url).send().await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            // 404 응답도 chart.error 본문을 포함
            return Err(match parse_chart_response(symbol, &body) {
                Err(err @ DataError::ProviderError { .. }) => err,
                _ => DataError::FetchError(format!("Yahoo Finance API error: {}", status)),
            });
        }

        let body = response.text().await?;
        debug!("Yahoo Finance response length: {} bytes", body.len());

        parse_chart_response(symbol, &body)
    }
}
