// =============================================================================
// Shared types used across the Vantage advisor
// =============================================================================

use serde::{Deserialize, Serialize};

/// Directional signal emitted by a single indicator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Vote {
    Up,
    Down,
    Neutral,
}

impl std::fmt::Display for Vote {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Up => write!(f, "UP"),
            Self::Down => write!(f, "DOWN"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Aggregate recommendation derived from the vote counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Decision {
    Buy,
    Sell,
    Neutral,
}

impl std::fmt::Display for Decision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
            Self::Neutral => write!(f, "NEUTRAL"),
        }
    }
}

/// Bar interval accepted by the API.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1h")]
    Hour,
    #[default]
    #[serde(rename = "1d")]
    Day,
    #[serde(rename = "1wk")]
    Week,
    #[serde(rename = "1mo")]
    Month,
}

impl Interval {
    /// Parse the provider's interval code. Returns `None` for unsupported
    /// codes.
    pub fn parse(code: &str) -> Option<Self> {
        match code.trim() {
            "1h" | "60m" => Some(Self::Hour),
            "1d" => Some(Self::Day),
            "1wk" => Some(Self::Week),
            "1mo" => Some(Self::Month),
            _ => None,
        }
    }

    /// Interval code as understood by the market-data provider.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hour => "1h",
            Self::Day => "1d",
            Self::Week => "1wk",
            Self::Month => "1mo",
        }
    }

    /// History range requested from the provider. Hourly history is capped
    /// at 730 days upstream; every range yields well over 200 bars for a
    /// listed instrument.
    pub fn lookback_range(&self) -> &'static str {
        match self {
            Self::Hour => "730d",
            Self::Day => "2y",
            Self::Week => "10y",
            Self::Month => "max",
        }
    }

    /// Whether bars carry a meaningful time of day.
    pub fn is_intraday(&self) -> bool {
        matches!(self, Self::Hour)
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vote_serialises_uppercase() {
        assert_eq!(serde_json::to_string(&Vote::Up).unwrap(), "\"UP\"");
        assert_eq!(serde_json::to_string(&Decision::Neutral).unwrap(), "\"NEUTRAL\"");
    }

    #[test]
    fn interval_parse_and_display() {
        assert_eq!(Interval::parse("1d"), Some(Interval::Day));
        assert_eq!(Interval::parse(" 1wk "), Some(Interval::Week));
        assert_eq!(Interval::parse("60m"), Some(Interval::Hour));
        assert_eq!(Interval::parse("5m"), None);
        assert_eq!(Interval::Month.to_string(), "1mo");
        assert_eq!(serde_json::to_string(&Interval::Hour).unwrap(), "\"1h\"");
    }

    #[test]
    fn interval_lookback() {
        assert_eq!(Interval::default().lookback_range(), "2y");
        assert!(Interval::Hour.is_intraday());
        assert!(!Interval::Day.is_intraday());
    }
}
