// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Metric alarm trigger
//!
//! The alerting service evaluates the metric condition on its own cadence and
//! reports every cycle in which it held. The alarm turns that stream of
//! observations into fire decisions: it fires once `cumulate_threshold`
//! observations arrive with no gap longer than two cycles between them.

use crate::describe;
use crate::error::ValidationError;
use crate::id::{PolicyId, TriggerId};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shortest evaluation cycle the alerting service supports, in seconds
pub const MIN_CYCLE_SECS: u32 = 300;

/// Metric watched by an alarm
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Indicator {
    #[serde(rename = "cpu")]
    Cpu,
    #[serde(rename = "mem")]
    Memory,
    #[serde(rename = "disk_read")]
    DiskRead,
    #[serde(rename = "disk_write")]
    DiskWrite,
    #[serde(rename = "flow_into")]
    FlowInto,
    #[serde(rename = "flow_out")]
    FlowOut,
}

impl Indicator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Indicator::Cpu => "cpu",
            Indicator::Memory => "mem",
            Indicator::DiskRead => "disk_read",
            Indicator::DiskWrite => "disk_write",
            Indicator::FlowInto => "flow_into",
            Indicator::FlowOut => "flow_out",
        }
    }

    /// Measurement and field the alerting service queries, if it can watch this metric
    pub fn metric(&self) -> Option<(&'static str, &'static str)> {
        match self {
            Indicator::Cpu => Some(("vm_cpu", "usage_active")),
            Indicator::DiskRead => Some(("vm_diskio", "read_bps")),
            Indicator::DiskWrite => Some(("vm_diskio", "write_bps")),
            Indicator::FlowInto => Some(("vm_netio", "bps_recv")),
            Indicator::FlowOut => Some(("vm_netio", "bps_sent")),
            Indicator::Memory => None,
        }
    }
}

impl FromStr for Indicator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cpu" => Ok(Indicator::Cpu),
            "mem" => Ok(Indicator::Memory),
            "disk_read" => Ok(Indicator::DiskRead),
            "disk_write" => Ok(Indicator::DiskWrite),
            "flow_into" => Ok(Indicator::FlowInto),
            "flow_out" => Ok(Indicator::FlowOut),
            other => Err(ValidationError::UnknownIndicator(other.to_string())),
        }
    }
}

/// How individual instance values are aggregated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Wrapper {
    Min,
    Max,
    Average,
}

impl Wrapper {
    pub fn as_str(&self) -> &'static str {
        match self {
            Wrapper::Min => "min",
            Wrapper::Max => "max",
            Wrapper::Average => "average",
        }
    }
}

impl FromStr for Wrapper {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "min" => Ok(Wrapper::Min),
            "max" => Ok(Wrapper::Max),
            "average" => Ok(Wrapper::Average),
            other => Err(ValidationError::UnknownWrapper(other.to_string())),
        }
    }
}

/// Comparison against the threshold value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    #[serde(rename = "gt")]
    GreaterThan,
    #[serde(rename = "lt")]
    LessThan,
}

impl Operator {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operator::GreaterThan => "gt",
            Operator::LessThan => "lt",
        }
    }
}

impl FromStr for Operator {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "gt" => Ok(Operator::GreaterThan),
            "lt" => Ok(Operator::LessThan),
            other => Err(ValidationError::UnknownOperator(other.to_string())),
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Alarm creation input as received from the policy service
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlarmInput {
    #[serde(default)]
    pub cumulate: i64,
    /// Evaluation cycle in seconds; 0 means the default
    #[serde(default)]
    pub cycle: i64,
    pub indicator: String,
    pub wrapper: String,
    /// Empty means greater-than
    #[serde(default)]
    pub operator: String,
    pub value: f64,
}

impl AlarmInput {
    pub fn new(
        indicator: impl Into<String>,
        wrapper: impl Into<String>,
        value: f64,
        cumulate: i64,
    ) -> Self {
        Self {
            cumulate,
            cycle: 0,
            indicator: indicator.into(),
            wrapper: wrapper.into(),
            operator: String::new(),
            value,
        }
    }

    pub fn with_operator(mut self, operator: impl Into<String>) -> Self {
        self.operator = operator.into();
        self
    }

    pub fn with_cycle(mut self, cycle: i64) -> Self {
        self.cycle = cycle;
        self
    }

    /// Fill defaults and check the input into an [`AlarmSpec`]
    pub fn validate(self) -> Result<AlarmSpec, ValidationError> {
        let operator = if self.operator.is_empty() {
            Operator::GreaterThan
        } else {
            self.operator.parse()?
        };
        let cycle = if self.cycle == 0 {
            MIN_CYCLE_SECS as i64
        } else {
            self.cycle
        };

        let indicator: Indicator = self.indicator.parse()?;
        if indicator.metric().is_none() {
            return Err(ValidationError::UnknownIndicator(self.indicator));
        }
        let wrapper: Wrapper = self.wrapper.parse()?;

        if cycle < MIN_CYCLE_SECS as i64 {
            return Err(ValidationError::CycleTooShort(cycle));
        }
        let cycle_seconds =
            u32::try_from(cycle).map_err(|_| ValidationError::CycleTooShort(cycle))?;
        let cumulate_threshold = u32::try_from(self.cumulate)
            .ok()
            .filter(|c| *c >= 1)
            .ok_or(ValidationError::InvalidCumulate(self.cumulate))?;

        Ok(AlarmSpec {
            cumulate_threshold,
            cycle_seconds,
            indicator,
            wrapper,
            operator,
            value: self.value,
        })
    }
}

/// Validated alarm definition
#[derive(Debug, Clone, PartialEq)]
pub struct AlarmSpec {
    pub cumulate_threshold: u32,
    pub cycle_seconds: u32,
    pub indicator: Indicator,
    pub wrapper: Wrapper,
    pub operator: Operator,
    pub value: f64,
}

/// Alert rule to provision in the alerting service for an alarm
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRule {
    pub name: String,
    pub policy_id: PolicyId,
    pub period_secs: u32,
    pub measurement: String,
    pub field: String,
    pub reducer: Wrapper,
    pub comparator: Operator,
    pub threshold: f64,
}

/// Result of a single observation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Observation {
    pub fire: bool,
    /// Streak length after the observation (0 right after firing)
    pub running_count: u32,
}

/// A metric alarm with a cumulative-cycle counter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmTrigger {
    pub id: TriggerId,
    pub policy_id: PolicyId,
    /// External alert rule provisioned for this alarm
    #[serde(default)]
    pub alert_id: Option<String>,
    pub cumulate_threshold: u32,
    pub cycle_seconds: u32,
    pub indicator: Indicator,
    pub wrapper: Wrapper,
    pub operator: Operator,
    pub value: f64,
    #[serde(default)]
    pub running_count: u32,
    #[serde(default)]
    pub last_observed_at: Option<DateTime<Utc>>,
}

impl AlarmTrigger {
    pub fn new(id: TriggerId, policy_id: PolicyId, spec: AlarmSpec) -> Self {
        Self {
            id,
            policy_id,
            alert_id: None,
            cumulate_threshold: spec.cumulate_threshold,
            cycle_seconds: spec.cycle_seconds,
            indicator: spec.indicator,
            wrapper: spec.wrapper,
            operator: spec.operator,
            value: spec.value,
            running_count: 0,
            last_observed_at: None,
        }
    }

    /// Longest gap between observations that keeps a streak alive
    pub fn streak_window(&self) -> Duration {
        Duration::seconds(2 * self.cycle_seconds as i64)
    }

    /// Record that the condition held during the cycle ending at `now`.
    ///
    /// A gap longer than [`streak_window`](Self::streak_window) starts a new
    /// streak that counts this observation as its first member.
    pub fn observe(&mut self, now: DateTime<Utc>) -> Observation {
        let broken = self
            .last_observed_at
            .map_or(true, |last| now - last > self.streak_window());

        self.running_count = if broken {
            1
        } else {
            self.running_count.saturating_add(1)
        };
        self.last_observed_at = Some(now);

        let fire = self.running_count >= self.cumulate_threshold;
        if fire {
            self.running_count = 0;
        }
        tracing::debug!(
            trigger_id = %self.id,
            running_count = self.running_count,
            broken,
            fire,
            "alarm observed"
        );

        Observation {
            fire,
            running_count: self.running_count,
        }
    }

    /// Provisioned with the alerting service
    pub fn is_trigger(&self) -> bool {
        self.alert_id.is_some()
    }

    /// Alert rule the alerting service should evaluate for this alarm
    pub fn alert_rule(&self) -> Result<AlertRule, ValidationError> {
        let (measurement, field) = self
            .indicator
            .metric()
            .ok_or_else(|| ValidationError::UnknownIndicator(self.indicator.as_str().to_string()))?;
        Ok(AlertRule {
            name: format!("sp-{}", self.policy_id),
            policy_id: self.policy_id.clone(),
            period_secs: self.cycle_seconds,
            measurement: measurement.to_string(),
            field: field.to_string(),
            reducer: self.wrapper,
            comparator: self.operator,
            threshold: self.value,
        })
    }

    pub fn describe(&self, policy_name: &str) -> String {
        let indicator = self.indicator.as_str();
        format!(
            "Alarm task(the {} {} of the instance is {} than {}{}) execute scaling policy \"{}\"",
            describe::phrase(self.wrapper.as_str()),
            describe::phrase(indicator),
            describe::phrase(self.operator.as_str()),
            self.value,
            describe::unit(indicator),
            policy_name,
        )
    }
}

#[cfg(test)]
#[path = "alarm_tests.rs"]
mod tests;
