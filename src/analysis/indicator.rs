// =============================================================================
// Indicator Catalogue — the ten indicators behind every report
// =============================================================================
//
// `IndicatorKind::ALL` fixes both the set and the order of indicators. Each
// kind knows how to compute its reading from the full series, derive its vote
// and lay out its chart. Votes always use the true latest value; the chart
// window (zero-padded where an indicator has no value yet) is display-only.
// =============================================================================

use serde::Serialize;

use super::error::AnalysisError;
use super::report::{ChartData, ChartKind, Dataset, IndicatorResult};
use crate::indicators::{
    bollinger::{self, BOLLINGER_PERIOD, BOLLINGER_STD},
    cci::{self, CCI_PERIOD},
    ema, macd,
    macd::{MACD_FAST, MACD_SIGNAL, MACD_SLOW},
    regression::{self, SLOPE_WINDOW},
    roc::{self, ROC_PERIOD},
    rsi::{self, RSI_PERIOD},
    sma,
    stochastic::{self, STOCH_PERIOD, WILLIAMS_PERIOD},
};
use crate::signals::vote;

const SMA_FAST: usize = 50;
const SMA_SLOW: usize = 200;
const EMA_TREND_PERIOD: usize = 20;

const BLUE: &str = "#3b82f6";
const RED: &str = "#ef4444";
const GREEN: &str = "#10b981";
const AMBER: &str = "#f59e0b";
const SLATE: &str = "#94a3b8";
const LIGHT: &str = "#f1f5f9";
const VIOLET: &str = "#8b5cf6";
const PINK: &str = "#ec4899";
const TEAL: &str = "#14b8a6";

/// The fixed set of indicators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum IndicatorKind {
    #[serde(rename = "rsi")]
    Rsi,
    #[serde(rename = "macd")]
    Macd,
    #[serde(rename = "sma")]
    SmaCross,
    #[serde(rename = "bb")]
    Bollinger,
    #[serde(rename = "stoch")]
    Stochastic,
    #[serde(rename = "ema")]
    EmaTrend,
    #[serde(rename = "cci")]
    Cci,
    #[serde(rename = "wr")]
    WilliamsR,
    #[serde(rename = "roc")]
    Roc,
    #[serde(rename = "slope")]
    Slope,
}

/// Inputs shared by every indicator evaluation.
pub struct SeriesContext<'a> {
    pub closes: &'a [f64],
    pub highs: &'a [f64],
    pub lows: &'a [f64],
    /// Labels of the last `window` bars.
    pub labels: &'a [String],
    pub window: usize,
    pub current_price: f64,
}

impl SeriesContext<'_> {
    /// Last `window` values of an end-aligned series, left-padded with zeros
    /// and with non-finite values zeroed.
    fn tail(&self, series: &[f64]) -> Vec<f64> {
        let take = series.len().min(self.window);
        let mut out = vec![0.0; self.window - take];
        out.extend(
            series[series.len() - take..]
                .iter()
                .map(|v| if v.is_finite() { *v } else { 0.0 }),
        );
        out
    }

    fn constant(&self, value: f64) -> Vec<f64> {
        vec![value; self.window]
    }

    fn prices(&self) -> Vec<f64> {
        self.tail(self.closes)
    }

    fn line_chart(&self, datasets: Vec<Dataset>) -> ChartData {
        ChartData {
            kind: ChartKind::Line,
            labels: self.labels.to_vec(),
            datasets,
        }
    }
}

/// Fields produced by one evaluation before the static texts are attached.
struct Reading {
    value: String,
    primary_value: f64,
    vote: crate::types::Vote,
    chart: ChartData,
}

impl IndicatorKind {
    pub const ALL: [IndicatorKind; 10] = [
        Self::Rsi,
        Self::Macd,
        Self::SmaCross,
        Self::Bollinger,
        Self::Stochastic,
        Self::EmaTrend,
        Self::Cci,
        Self::WilliamsR,
        Self::Roc,
        Self::Slope,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Rsi => "Relative Strength Index (RSI)",
            Self::Macd => "MACD",
            Self::SmaCross => "Moving Average Cross (SMA 50/200)",
            Self::Bollinger => "Bollinger Bands",
            Self::Stochastic => "Stochastic Oscillator",
            Self::EmaTrend => "EMA Trend (20)",
            Self::Cci => "CCI (Commodity Channel Index)",
            Self::WilliamsR => "Williams %R",
            Self::Roc => "Momentum (Rate of Change)",
            Self::Slope => "Slope (Linear Regression)",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::Rsi => "Measures the speed and change of price movements.",
            Self::Macd => "Follows the trend and shows the relationship between two moving averages.",
            Self::SmaCross => "Compares the short-term (50) and long-term (200) trends.",
            Self::Bollinger => "Evaluates volatility and relative price levels.",
            Self::Stochastic => "Compares the closing price with the price range over a period.",
            Self::EmaTrend => "Short-term trend using an exponential moving average.",
            Self::Cci => "Identifies cyclical trends at their extremes.",
            Self::WilliamsR => "Inverse momentum indicator on a 0 to -100 scale.",
            Self::Roc => "Measures the percentage change in price.",
            Self::Slope => "Simple direction of the last 10 bars.",
        }
    }

    pub fn explanation(&self) -> &'static str {
        match self {
            Self::Rsi => "RSI is a momentum oscillator that measures the speed and magnitude of recent price changes to evaluate overbought or oversold conditions.",
            Self::Macd => "MACD is a trend-following momentum indicator that shows the relationship between two moving averages of a security's price.",
            Self::SmaCross => "A moving average cross helps identify the direction of the overall trend.",
            Self::Bollinger => "Bollinger Bands consist of a middle band (moving average) and two outer bands set by standard deviation.",
            Self::Stochastic => "The stochastic oscillator is a momentum indicator comparing a particular closing price with the range of prices over a certain period.",
            Self::EmaTrend => "The Exponential Moving Average gives more weight to recent prices than the simple moving average.",
            Self::Cci => "CCI measures the difference between the current price and its historical average.",
            Self::WilliamsR => "Williams %R is a momentum indicator that moves between 0 and -100 and measures overbought and oversold levels.",
            Self::Roc => "ROC is a momentum oscillator measuring the percentage change between the current price and the price n periods ago (12 here).",
            Self::Slope => "Computes the slope of the best-fit line through the closing prices of the last 10 bars.",
        }
    }

    pub fn methodology(&self) -> &'static str {
        match self {
            Self::Rsi => "Compares the magnitude of recent gains with recent losses over 14 periods. A value above 70 signals overbought (possible drop), below 30 oversold (possible rise).",
            Self::Macd => "The 26-period EMA is subtracted from the 12-period EMA and compared with its 9-period EMA (the signal line). MACD above the signal is bullish (UP), otherwise bearish (DOWN).",
            Self::SmaCross => "Compares the 50-bar and 200-bar simple moving averages. A 'Golden Cross' (50 > 200) suggests a long-term uptrend; a 'Death Cross' (50 below 200) the opposite.",
            Self::Bollinger => "20-period average with bands 2 standard deviations away. A close in the lowest fifth of the band range is considered cheap (UP); in the highest fifth, expensive (DOWN).",
            Self::Stochastic => "%K over 14 periods. Values above 80 indicate overbought (sell); below 20, oversold (buy).",
            Self::EmaTrend => "Uses the 20-period EMA. A close above the EMA indicates a short-term uptrend; below it, a downtrend.",
            Self::Cci => "20-period CCI. Above 100 implies overbought (possible fall); below -100 implies oversold (possible rise).",
            Self::WilliamsR => "14-period %R. Above -20 (near 0) the asset is overbought; below -80 it is oversold (buying opportunity).",
            Self::Roc => "A positive ROC means bullish momentum; a negative ROC means bearish momentum.",
            Self::Slope => "Least-squares linear regression. A positive slope means the very short-term trend points up.",
        }
    }

    pub fn history(&self) -> &'static str {
        match self {
            Self::Rsi => "Developed by J. Welles Wilder Jr. in 1978 and published in 'New Concepts in Technical Trading Systems'. One of the most widely used indicators for spotting market turning points.",
            Self::Macd => "Created by Gerald Appel in the late 1970s. Thomas Aspray added the histogram in 1986.",
            Self::SmaCross => "Moving averages became popular with computerised technical analysis; the 50/200 cross is followed closely by institutional investors.",
            Self::Bollinger => "Developed by John Bollinger in the 1980s to adapt trading bands to changing volatility.",
            Self::Stochastic => "Developed by George Lane in the late 1950s.",
            Self::EmaTrend => "Exponential moving averages gained popularity as a faster-reacting alternative to simple averages.",
            Self::Cci => "Developed by Donald Lambert in 1980, originally to identify cyclical turns in commodities.",
            Self::WilliamsR => "Developed by the trader and author Larry Williams.",
            Self::Roc => "Rate of Change is one of the oldest and simplest momentum concepts in technical analysis.",
            Self::Slope => "Linear regression is a fundamental statistical technique dating back to Legendre and Gauss.",
        }
    }

    /// Compute reading, vote and chart for this indicator.
    ///
    /// Fails with [`AnalysisError::Indicator`] when the latest value cannot be
    /// computed; the caller aborts the whole analysis in that case.
    pub fn evaluate(self, ctx: &SeriesContext<'_>) -> Result<IndicatorResult, AnalysisError> {
        let reading = self.read(ctx).ok_or(AnalysisError::Indicator(self))?;
        Ok(IndicatorResult {
            id: self,
            name: self.name(),
            value: reading.value,
            primary_value: reading.primary_value,
            vote: reading.vote,
            description: self.description(),
            explanation: self.explanation(),
            methodology: self.methodology(),
            history: self.history(),
            chart: reading.chart,
        })
    }

    fn read(self, ctx: &SeriesContext<'_>) -> Option<Reading> {
        let price = ctx.current_price;
        match self {
            Self::Rsi => {
                let series = rsi::calculate_rsi(ctx.closes, RSI_PERIOD);
                let latest = rsi::current_rsi(ctx.closes, RSI_PERIOD)?;
                Some(Reading {
                    value: format!("{latest:.2}"),
                    primary_value: latest,
                    vote: vote::rsi_vote(latest),
                    chart: ctx.line_chart(vec![
                        Dataset::solid("RSI", ctx.tail(&series), BLUE),
                        Dataset::dashed("Overbought (70)", ctx.constant(vote::RSI_OVERBOUGHT), RED),
                        Dataset::dashed("Oversold (30)", ctx.constant(vote::RSI_OVERSOLD), GREEN),
                    ]),
                })
            }
            Self::Macd => {
                let series = macd::calculate_macd(ctx.closes, MACD_FAST, MACD_SLOW, MACD_SIGNAL);
                let (line, signal) = series.latest()?;
                Some(Reading {
                    value: format!("MACD: {line:.2}"),
                    primary_value: line,
                    vote: vote::macd_vote(line, signal),
                    chart: ctx.line_chart(vec![
                        Dataset::solid("MACD", ctx.tail(&series.line), BLUE),
                        Dataset::solid("Signal", ctx.tail(&series.signal), AMBER),
                    ]),
                })
            }
            Self::SmaCross => {
                let fast = sma::calculate_sma(ctx.closes, SMA_FAST);
                let slow = sma::calculate_sma(ctx.closes, SMA_SLOW);
                let fast_last = sma::current_sma(ctx.closes, SMA_FAST)?;
                let slow_last = sma::current_sma(ctx.closes, SMA_SLOW)?;
                Some(Reading {
                    value: format!("50: {fast_last:.2} / 200: {slow_last:.2}"),
                    primary_value: fast_last - slow_last,
                    vote: vote::sma_cross_vote(fast_last, slow_last),
                    chart: ctx.line_chart(vec![
                        Dataset::solid("Price", ctx.prices(), SLATE),
                        Dataset::solid("SMA 50", ctx.tail(&fast), BLUE),
                        Dataset::solid("SMA 200", ctx.tail(&slow), RED),
                    ]),
                })
            }
            Self::Bollinger => {
                let bands = bollinger::calculate_bollinger(ctx.closes, BOLLINGER_PERIOD, BOLLINGER_STD)?;
                let series = bollinger::bollinger_series(ctx.closes, BOLLINGER_PERIOD, BOLLINGER_STD);
                let upper: Vec<f64> = series.iter().map(|b| b.upper).collect();
                let lower: Vec<f64> = series.iter().map(|b| b.lower).collect();
                Some(Reading {
                    value: format!("P: {price:.2}, Low: {:.2}", bands.lower),
                    primary_value: price,
                    vote: vote::bollinger_vote(price, &bands),
                    chart: ctx.line_chart(vec![
                        Dataset::solid("Price", ctx.prices(), LIGHT),
                        Dataset::solid("Upper Band", ctx.tail(&upper), RED),
                        Dataset::solid("Lower Band", ctx.tail(&lower), GREEN),
                    ]),
                })
            }
            Self::Stochastic => {
                let series = stochastic::calculate_stochastic_k(ctx.highs, ctx.lows, ctx.closes, STOCH_PERIOD);
                let latest = series.last().copied().filter(|v| v.is_finite())?;
                Some(Reading {
                    value: format!("K%: {latest:.2}"),
                    primary_value: latest,
                    vote: vote::stochastic_vote(latest),
                    chart: ctx.line_chart(vec![
                        Dataset::solid("Stoch K%", ctx.tail(&series), VIOLET),
                        Dataset::dashed("80", ctx.constant(vote::STOCH_OVERBOUGHT), RED),
                        Dataset::dashed("20", ctx.constant(vote::STOCH_OVERSOLD), GREEN),
                    ]),
                })
            }
            Self::EmaTrend => {
                let series = ema::calculate_ema(ctx.closes, EMA_TREND_PERIOD);
                let latest = ema::current_ema(ctx.closes, EMA_TREND_PERIOD)?;
                Some(Reading {
                    value: format!("P: {price:.2} vs EMA: {latest:.2}"),
                    primary_value: latest,
                    vote: vote::ema_trend_vote(price, latest),
                    chart: ctx.line_chart(vec![
                        Dataset::solid("Price", ctx.prices(), SLATE),
                        Dataset::solid("EMA 20", ctx.tail(&series), AMBER),
                    ]),
                })
            }
            Self::Cci => {
                let series = cci::calculate_cci(ctx.highs, ctx.lows, ctx.closes, CCI_PERIOD);
                let latest = series.last().copied().filter(|v| v.is_finite())?;
                Some(Reading {
                    value: format!("CCI: {latest:.2}"),
                    primary_value: latest,
                    vote: vote::cci_vote(latest),
                    chart: ctx.line_chart(vec![
                        Dataset::solid("CCI", ctx.tail(&series), PINK),
                        Dataset::dashed("100", ctx.constant(vote::CCI_OVERBOUGHT), RED),
                        Dataset::dashed("-100", ctx.constant(vote::CCI_OVERSOLD), GREEN),
                    ]),
                })
            }
            Self::WilliamsR => {
                let series = stochastic::calculate_williams_r(ctx.highs, ctx.lows, ctx.closes, WILLIAMS_PERIOD);
                let latest = series.last().copied().filter(|v| v.is_finite())?;
                Some(Reading {
                    value: format!("%R: {latest:.2}"),
                    primary_value: latest,
                    vote: vote::williams_vote(latest),
                    chart: ctx.line_chart(vec![
                        Dataset::solid("Williams %R", ctx.tail(&series), TEAL),
                        Dataset::dashed("-20", ctx.constant(vote::WILLIAMS_OVERBOUGHT), RED),
                        Dataset::dashed("-80", ctx.constant(vote::WILLIAMS_OVERSOLD), GREEN),
                    ]),
                })
            }
            Self::Roc => {
                let series = roc::calculate_roc(ctx.closes, ROC_PERIOD);
                let latest = roc::current_roc(ctx.closes, ROC_PERIOD)?;
                Some(Reading {
                    value: format!("ROC: {latest:.2}%"),
                    primary_value: latest,
                    vote: vote::roc_vote(latest),
                    chart: ChartData {
                        kind: ChartKind::Bar,
                        labels: ctx.labels.to_vec(),
                        datasets: vec![Dataset::solid("ROC", ctx.tail(&series), BLUE)],
                    },
                })
            }
            Self::Slope => {
                let fit = regression::fit_tail(ctx.closes, SLOPE_WINDOW)?;
                let recent = ctx.closes[ctx.closes.len() - SLOPE_WINDOW..].to_vec();
                let trend = (0..SLOPE_WINDOW).map(|i| fit.at(i)).collect();
                let labels = &ctx.labels[ctx.labels.len().saturating_sub(SLOPE_WINDOW)..];
                Some(Reading {
                    value: format!("Slope: {:.2}", fit.slope),
                    primary_value: fit.slope,
                    vote: vote::slope_vote(fit.slope),
                    chart: ChartData {
                        kind: ChartKind::Line,
                        labels: labels.to_vec(),
                        datasets: vec![
                            Dataset::solid("Actual Price", recent, SLATE),
                            Dataset::dashed("Linear Trend", trend, BLUE),
                        ],
                    },
                })
            }
        }
    }
}

impl std::fmt::Display for IndicatorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(n: usize) -> Vec<String> {
        (0..n).map(|i| format!("d{i}")).collect()
    }

    #[test]
    fn all_kinds_are_distinct_and_ordered() {
        let ids: Vec<String> = IndicatorKind::ALL
            .iter()
            .map(|k| serde_json::to_string(k).unwrap())
            .collect();
        assert_eq!(
            ids,
            vec!["\"rsi\"", "\"macd\"", "\"sma\"", "\"bb\"", "\"stoch\"", "\"ema\"", "\"cci\"", "\"wr\"", "\"roc\"", "\"slope\""]
        );
    }

    #[test]
    fn tail_pads_short_series_with_zeros() {
        let closes = vec![1.0; 5];
        let l = labels(5);
        let ctx = SeriesContext {
            closes: &closes,
            highs: &closes,
            lows: &closes,
            labels: &l,
            window: 5,
            current_price: 1.0,
        };
        assert_eq!(ctx.tail(&[7.0, f64::NAN, 9.0]), vec![0.0, 0.0, 7.0, 0.0, 9.0]);
        assert_eq!(ctx.tail(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]), vec![2.0, 3.0, 4.0, 5.0, 6.0]);
    }

    #[test]
    fn short_history_fails_the_indicator() {
        let closes: Vec<f64> = (1..=30).map(|x| x as f64).collect();
        let l = labels(30);
        let ctx = SeriesContext {
            closes: &closes,
            highs: &closes,
            lows: &closes,
            labels: &l,
            window: 30,
            current_price: 30.0,
        };
        // 30 bars satisfy RSI(14) but not SMA(200).
        assert!(IndicatorKind::Rsi.evaluate(&ctx).is_ok());
        assert!(matches!(
            IndicatorKind::SmaCross.evaluate(&ctx),
            Err(AnalysisError::Indicator(IndicatorKind::SmaCross))
        ));
    }
}
