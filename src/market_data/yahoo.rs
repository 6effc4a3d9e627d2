// =============================================================================
// Yahoo Finance Chart API Client
// =============================================================================
//
// Public, unauthenticated endpoint:
//   GET {base}/v8/finance/chart/{ticker}?range={range}&interval={interval}
//
// Every request carries an explicit timeout; an elapsed timeout is reported
// as `ProviderError::Timeout` so the analyzer classifies it as a fetch
// failure like any other provider error.
// =============================================================================

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use super::bar::{Bar, PriceSeries};
use super::provider::{CompanyProfile, HistoryRequest, MarketDataProvider, MarketSnapshot, ProviderError};

/// Default public endpoint.
pub const DEFAULT_BASE_URL: &str = "https://query1.finance.yahoo.com";

/// The endpoint rejects requests without a browser-like user agent.
const USER_AGENT: &str = "Mozilla/5.0 (compatible; vantage-advisor/1.0)";

// -----------------------------------------------------------------------------
// Wire format
// -----------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: String,
    #[serde(default)]
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    #[serde(default)]
    meta: ChartMeta,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ChartMeta {
    long_name: Option<String>,
    short_name: Option<String>,
    long_business_summary: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<ChartQuote>,
}

/// Column-oriented OHLCV arrays; gaps in trading are reported as `null`.
#[derive(Debug, Default, Deserialize)]
struct ChartQuote {
    #[serde(default)]
    open: Vec<Option<f64>>,
    #[serde(default)]
    high: Vec<Option<f64>>,
    #[serde(default)]
    low: Vec<Option<f64>>,
    #[serde(default)]
    close: Vec<Option<f64>>,
    #[serde(default)]
    volume: Vec<Option<f64>>,
}

// -----------------------------------------------------------------------------
// Client
// -----------------------------------------------------------------------------

/// HTTP client for the Yahoo Finance chart endpoint.
#[derive(Clone)]
pub struct YahooChartClient {
    base_url: reqwest::Url,
    client: reqwest::Client,
}

impl YahooChartClient {
    /// Create a client against `base_url` with the given request timeout.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = reqwest::Url::parse(base_url)
            .with_context(|| format!("invalid market data base url '{base_url}'"))?;

        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .context("failed to build reqwest client")?;

        debug!(base_url = %base_url, timeout_secs = timeout.as_secs(), "YahooChartClient initialised");

        Ok(Self { base_url, client })
    }

    fn chart_url(&self, ticker: &str) -> Result<reqwest::Url, ProviderError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ProviderError::Malformed(format!("base url {} cannot carry a path", self.base_url)))?
            .pop_if_empty()
            .extend(["v8", "finance", "chart", ticker]);
        Ok(url)
    }
}

#[async_trait]
impl MarketDataProvider for YahooChartClient {
    #[instrument(skip_all, fields(ticker = %req.ticker, interval = %req.interval), name = "yahoo::fetch_history")]
    async fn fetch_history(&self, req: &HistoryRequest) -> Result<MarketSnapshot, ProviderError> {
        let url = self.chart_url(&req.ticker)?;

        let resp = self
            .client
            .get(url)
            .query(&[("range", req.range.as_str()), ("interval", req.interval.as_str())])
            .send()
            .await
            .map_err(classify)?;

        let status = resp.status();
        let body = resp.text().await.map_err(classify)?;

        // Error responses still carry a chart envelope with a description.
        let envelope: ChartEnvelope = match serde_json::from_str(&body) {
            Ok(env) => env,
            Err(e) if status.is_success() => {
                return Err(ProviderError::Malformed(format!("chart response: {e}")));
            }
            Err(_) => {
                warn!(status = status.as_u16(), "chart endpoint returned non-JSON error");
                return Err(ProviderError::Status {
                    status: status.as_u16(),
                });
            }
        };

        if !status.is_success() && envelope.chart.error.is_none() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
            });
        }

        let snapshot = parse_chart(&req.ticker, envelope)?;
        debug!(bars = snapshot.series.len(), "chart history fetched");
        Ok(snapshot)
    }
}

impl std::fmt::Debug for YahooChartClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("YahooChartClient")
            .field("base_url", &self.base_url.as_str())
            .finish()
    }
}

// -----------------------------------------------------------------------------
// Parsing helpers
// -----------------------------------------------------------------------------

fn classify(err: reqwest::Error) -> ProviderError {
    if err.is_timeout() {
        ProviderError::Timeout
    } else {
        ProviderError::Request(err)
    }
}

fn value_at(column: &[Option<f64>], i: usize) -> Option<f64> {
    column.get(i).copied().flatten()
}

/// Convert the chart envelope into a snapshot. Rows with any missing OHLC
/// value are skipped; a missing volume counts as zero.
fn parse_chart(ticker: &str, envelope: ChartEnvelope) -> Result<MarketSnapshot, ProviderError> {
    if let Some(err) = envelope.chart.error {
        return Err(ProviderError::Api(format!("{}: {}", err.code, err.description)));
    }

    let result = envelope
        .chart
        .result
        .and_then(|mut r| if r.is_empty() { None } else { Some(r.swap_remove(0)) })
        .ok_or_else(|| ProviderError::Empty {
            ticker: ticker.to_string(),
        })?;

    let quote = result.indicators.quote.into_iter().next().unwrap_or_default();

    let mut bars = Vec::with_capacity(result.timestamp.len());
    let mut skipped = 0usize;
    for (i, &ts) in result.timestamp.iter().enumerate() {
        let (Some(open), Some(high), Some(low), Some(close)) = (
            value_at(&quote.open, i),
            value_at(&quote.high, i),
            value_at(&quote.low, i),
            value_at(&quote.close, i),
        ) else {
            skipped += 1;
            continue;
        };
        let Some(date) = DateTime::<Utc>::from_timestamp(ts, 0) else {
            return Err(ProviderError::Malformed(format!("timestamp {ts} out of range")));
        };
        bars.push(Bar::new(date, open, high, low, close, value_at(&quote.volume, i).unwrap_or(0.0)));
    }

    if skipped > 0 {
        debug!(ticker, skipped, "skipped incomplete chart rows");
    }

    let series = PriceSeries::from_bars(bars)?;
    if series.is_empty() {
        return Err(ProviderError::Empty {
            ticker: ticker.to_string(),
        });
    }

    let meta = result.meta;
    let company = CompanyProfile::new(
        ticker,
        meta.long_name.or(meta.short_name),
        meta.long_business_summary,
    );

    Ok(MarketSnapshot { series, company })
}

// -----------------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{self, AnalysisError, Analyzer};
    use crate::types::Interval;

    fn parse(json: &str) -> Result<MarketSnapshot, ProviderError> {
        let envelope: ChartEnvelope = serde_json::from_str(json).expect("valid envelope");
        parse_chart("AAPL", envelope)
    }

    #[test]
    fn parse_chart_ok_skips_null_rows() {
        let json = r#"{
            "chart": {
                "result": [{
                    "meta": { "symbol": "AAPL", "longName": "Apple Inc.", "shortName": "Apple" },
                    "timestamp": [1700000000, 1700086400, 1700172800],
                    "indicators": { "quote": [{
                        "open":   [189.0, null, 190.5],
                        "high":   [190.0, null, 192.0],
                        "low":    [188.0, null, 190.0],
                        "close":  [189.5, null, 191.2],
                        "volume": [1000,  null, null]
                    }]}
                }],
                "error": null
            }
        }"#;
        let snap = parse(json).expect("should parse");
        assert_eq!(snap.series.len(), 2);
        assert_eq!(snap.series.closes(), vec![189.5, 191.2]);
        assert_eq!(snap.series.bars()[1].volume, 0.0);
        assert_eq!(snap.company.name, "Apple Inc.");
    }

    #[test]
    fn parse_chart_short_name_fallback() {
        let json = r#"{"chart":{"result":[{"meta":{"shortName":"Apple"},
            "timestamp":[1700000000],
            "indicators":{"quote":[{"open":[1.0],"high":[1.0],"low":[1.0],"close":[1.0],"volume":[1]}]}}],
            "error":null}}"#;
        assert_eq!(parse(json).unwrap().company.name, "Apple");
    }

    #[test]
    fn parse_chart_error_object() {
        let json = r#"{"chart":{"result":null,"error":{"code":"Not Found","description":"No data found, symbol may be delisted"}}}"#;
        match parse(json) {
            Err(ProviderError::Api(msg)) => assert!(msg.contains("delisted")),
            other => panic!("expected Api error, got {other:?}"),
        }
    }

    #[test]
    fn parse_chart_empty_result() {
        let json = r#"{"chart":{"result":[],"error":null}}"#;
        assert!(matches!(parse(json), Err(ProviderError::Empty { .. })));

        let json = r#"{"chart":{"result":[{"meta":{},"timestamp":[],"indicators":{"quote":[{}]}}],"error":null}}"#;
        assert!(matches!(parse(json), Err(ProviderError::Empty { .. })));
    }

    #[test]
    fn chart_url_encodes_ticker() {
        let client = YahooChartClient::new("https://example.test", Duration::from_secs(1)).unwrap();
        let url = client.chart_url("BTC/USD").unwrap();
        assert_eq!(url.as_str(), "https://example.test/v8/finance/chart/BTC%2FUSD");
    }

    #[test]
    fn rejects_bad_base_url() {
        assert!(YahooChartClient::new("not a url", Duration::from_secs(1)).is_err());
    }

    /// Accepts connections and holds them open without ever answering.
    async fn silent_server() -> std::net::SocketAddr {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let mut held = Vec::new();
            while let Ok((stream, _)) = listener.accept().await {
                held.push(stream);
            }
        });
        addr
    }

    #[tokio::test]
    async fn unanswered_request_times_out() {
        let addr = silent_server().await;
        let client = YahooChartClient::new(&format!("http://{addr}"), Duration::from_millis(200)).unwrap();

        let res = client.fetch_history(&HistoryRequest::new("AAPL", Interval::Day)).await;
        assert!(matches!(res, Err(ProviderError::Timeout)), "got {res:?}");

        let err = analysis::analyze_ticker(&client, &Analyzer::default(), "aapl", Interval::Day)
            .await
            .unwrap_err();
        match err {
            AnalysisError::FetchFailure { ticker, source } => {
                assert_eq!(ticker, "AAPL");
                assert!(matches!(source, ProviderError::Timeout));
            }
            other => panic!("expected FetchFailure, got {other:?}"),
        }
    }
}
