use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::enums::{Confidence, DemandLevel, Priority, TrendDirection, TrendStrength};
use crate::error::CoreError;
use crate::validate;

/// A single time-stamped observation.
///
/// Ordering by timestamp is the caller's responsibility unless a function
/// explicitly sorts its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataPoint {
    pub timestamp: DateTime<Utc>,
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<Map<String, Value>>,
}

impl DataPoint {
    pub fn new(timestamp: DateTime<Utc>, value: f64) -> Self {
        Self {
            timestamp,
            value,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Looks up a numeric metadata entry.
    pub fn metadata_f64(&self, key: &str) -> Option<f64> {
        self.metadata.as_ref()?.get(key)?.as_f64()
    }
}

/// A named metric and its samples.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeSeries {
    pub metric: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    pub data: Vec<DataPoint>,
}

impl TimeSeries {
    pub fn new(metric: impl Into<String>, data: Vec<DataPoint>) -> Self {
        Self {
            metric: metric.into(),
            unit: None,
            data,
        }
    }

    /// Returns a copy of the series ordered by timestamp.
    pub fn sorted(&self) -> Self {
        let mut data = self.data.clone();
        data.sort_by_key(|p| p.timestamp);
        Self {
            metric: self.metric.clone(),
            unit: self.unit.clone(),
            data,
        }
    }

    pub fn values(&self) -> impl Iterator<Item = f64> + '_ {
        self.data.iter().map(|p| p.value)
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A snapshot of a node's operating figures at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceMetrics {
    /// Fraction of the period the node was earning, in `[0, 1]`.
    pub utilization: f64,
    pub revenue_usd: f64,
    /// Fraction of the period the node was reachable, in `[0, 1]`.
    pub uptime: f64,
    /// Milliseconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_rate: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub queue_depth: Option<u32>,
    pub timestamp: DateTime<Utc>,
}

impl PerformanceMetrics {
    pub fn validate(&self) -> Result<(), CoreError> {
        validate::unit_interval("utilization", self.utilization)?;
        validate::non_negative("revenueUsd", self.revenue_usd)?;
        validate::unit_interval("uptime", self.uptime)?;
        if let Some(response_time) = self.response_time {
            validate::non_negative("responseTime", response_time)?;
        }
        if let Some(error_rate) = self.error_rate {
            validate::unit_interval("errorRate", error_rate)?;
        }
        Ok(())
    }
}

/// The result of fitting a least-squares line through a series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendAnalysis {
    pub direction: TrendDirection,
    pub strength: TrendStrength,
    /// Change in value per millisecond.
    pub slope: f64,
    pub correlation: f64,
    pub confidence: f64,
    pub period: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevShareResult {
    pub gross_usd: f64,
    pub my_cut_usd: f64,
    pub owner_cut_usd: f64,
    pub rev_share_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpectedImpact {
    pub utilization_change: f64,
    pub revenue_change: f64,
}

/// A recommended price move and its expected effect.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingSuggestion {
    pub current_price: f64,
    pub suggested_price: f64,
    pub adjustment_percent: f64,
    pub adjustment_amount: f64,
    pub reason: String,
    pub confidence: Confidence,
    pub priority: Priority,
    pub expected_impact: ExpectedImpact,
}

/// Optional market context that modulates a price adjustment.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketConditions {
    pub demand_level: DemandLevel,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub competitor_pricing: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasonality: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network_congestion: Option<f64>,
}

impl MarketConditions {
    pub fn validate(&self) -> Result<(), CoreError> {
        if let Some(price) = self.competitor_pricing {
            validate::non_negative("competitorPricing", price)?;
        }
        if let Some(seasonality) = self.seasonality {
            validate::unit_interval("seasonality", seasonality)?;
        }
        if let Some(congestion) = self.network_congestion {
            validate::unit_interval("networkCongestion", congestion)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn metrics(utilization: f64) -> PerformanceMetrics {
        PerformanceMetrics {
            utilization,
            revenue_usd: 12.5,
            uptime: 0.99,
            response_time: None,
            error_rate: Some(0.01),
            queue_depth: Some(3),
            timestamp: Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(),
        }
    }

    #[test]
    fn metrics_validation_names_the_field() {
        assert!(metrics(0.5).validate().is_ok());
        let err = metrics(1.5).validate().unwrap_err();
        assert_eq!(
            err,
            CoreError::InvalidInput(
                "utilization".to_string(),
                "must be between 0 and 1".to_string()
            )
        );
    }

    #[test]
    fn metrics_json_uses_camel_case() {
        let json = serde_json::to_value(metrics(0.5)).unwrap();
        assert_eq!(json["revenueUsd"], 12.5);
        assert_eq!(json["queueDepth"], 3);
        assert!(json.get("responseTime").is_none());
    }

    #[test]
    fn sorted_series_orders_by_timestamp() {
        let late = DataPoint::new(Utc.with_ymd_and_hms(2024, 3, 2, 0, 0, 0).unwrap(), 2.0);
        let early = DataPoint::new(Utc.with_ymd_and_hms(2024, 3, 1, 0, 0, 0).unwrap(), 1.0);
        let series = TimeSeries::new("utilization", vec![late, early]).sorted();
        assert_eq!(series.values().collect::<Vec<_>>(), vec![1.0, 2.0]);
    }

    #[test]
    fn market_conditions_reject_out_of_range_seasonality() {
        let conditions = MarketConditions {
            seasonality: Some(1.2),
            ..Default::default()
        };
        assert!(conditions.validate().is_err());
    }
}
