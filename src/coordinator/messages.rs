//! Command and report types for the worker loops

use serde::Serialize;

/// Commands consumed by the producer loop
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProducerCommand<T> {
    /// Push a value onto the shared queue
    Push(T),

    /// Stop the loop
    Terminate,
}

/// Commands consumed by the consumer loop
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsumerCommand {
    /// Pop one value from the shared queue
    Pop,

    /// Stop the loop
    Terminate,
}

/// Counters accumulated by the producer loop, returned when it exits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProducerMetrics {
    /// Pushes that completed
    pub pushed: u64,

    /// Times a push found the queue full and had to wait for room
    #[serde(rename = "blocked-on-full")]
    pub blocked_on_full: u64,
}

/// Counters accumulated by the consumer loop, returned when it exits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ConsumerMetrics {
    /// Pops that completed
    pub popped: u64,

    /// Times a pop found the queue empty and had to wait for data
    #[serde(rename = "blocked-on-empty")]
    pub blocked_on_empty: u64,
}

/// Aggregated metrics for one complete run of both loops
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RunReport {
    pub producer: ProducerMetrics,
    pub consumer: ConsumerMetrics,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_start_at_zero() {
        let report = RunReport::default();
        assert_eq!(report.producer.pushed, 0);
        assert_eq!(report.producer.blocked_on_full, 0);
        assert_eq!(report.consumer.popped, 0);
        assert_eq!(report.consumer.blocked_on_empty, 0);
    }

    #[test]
    fn test_run_report_serialization() {
        let report = RunReport {
            producer: ProducerMetrics {
                pushed: 8,
                blocked_on_full: 2,
            },
            consumer: ConsumerMetrics {
                popped: 8,
                blocked_on_empty: 1,
            },
        };

        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("blocked-on-full"));
        assert!(json.contains("blocked-on-empty"));
        assert!(json.contains("\"pushed\":8"));
    }
}
