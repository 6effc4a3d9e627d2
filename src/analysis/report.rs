// =============================================================================
// Analysis Report — immutable output of one (ticker, interval) analysis
// =============================================================================

use serde::Serialize;

use super::indicator::IndicatorKind;
use crate::market_data::CompanyProfile;
use crate::signals::VoteSummary;
use crate::types::{Interval, Vote};

/// How the front end should draw a chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
}

/// One plotted series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dataset {
    pub label: String,
    pub data: Vec<f64>,
    pub color: &'static str,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub dashed: bool,
}

impl Dataset {
    pub fn solid(label: impl Into<String>, data: Vec<f64>, color: &'static str) -> Self {
        Self {
            label: label.into(),
            data,
            color,
            dashed: false,
        }
    }

    pub fn dashed(label: impl Into<String>, data: Vec<f64>, color: &'static str) -> Self {
        Self {
            label: label.into(),
            data,
            color,
            dashed: true,
        }
    }
}

/// Display-only chart payload. Never feeds back into values or votes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
}

/// Outcome of a single indicator.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorResult {
    pub id: IndicatorKind,
    pub name: &'static str,
    /// Latest reading formatted for display.
    pub value: String,
    /// Latest reading the vote was derived from.
    pub primary_value: f64,
    pub vote: Vote,
    pub description: &'static str,
    pub explanation: &'static str,
    pub methodology: &'static str,
    pub history: &'static str,
    pub chart: ChartData,
}

/// Full analysis of one instrument.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisReport {
    pub ticker: String,
    pub interval: Interval,
    pub company: CompanyProfile,
    pub current_price: f64,
    /// One entry per [`IndicatorKind::ALL`], in that order.
    pub results: Vec<IndicatorResult>,
    pub summary: VoteSummary,
}

impl AnalysisReport {
    /// `|up - down|`, used to rank batch results.
    pub fn clarity(&self) -> usize {
        self.summary.clarity()
    }

    #[cfg(test)]
    pub fn result(&self, kind: IndicatorKind) -> Option<&IndicatorResult> {
        self.results.iter().find(|r| r.id == kind)
    }
}
