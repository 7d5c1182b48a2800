//! Coordinator configuration

use serde::{Deserialize, Serialize};

/// What a loop does with commands still buffered behind the terminate
/// sentinel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TerminatePolicy {
    /// Exit as soon as the sentinel is observed; buffered commands are
    /// dropped
    #[default]
    StopImmediately,

    /// Execute the work commands already buffered when the sentinel is
    /// observed, then exit
    DrainPending,
}

impl std::str::FromStr for TerminatePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "stop" | "stop-immediately" => Ok(Self::StopImmediately),
            "drain" | "drain-pending" => Ok(Self::DrainPending),
            _ => Err(format!("Unknown policy: {}. Use: stop or drain", s)),
        }
    }
}

impl std::fmt::Display for TerminatePolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StopImmediately => write!(f, "stop-immediately"),
            Self::DrainPending => write!(f, "drain-pending"),
        }
    }
}

/// Coordinator configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CoordinatorConfig {
    /// Buffer size of each command channel
    #[serde(rename = "command-buffer")]
    pub command_buffer: usize,

    /// Termination policy applied by both loops
    #[serde(rename = "terminate-policy")]
    pub terminate_policy: TerminatePolicy,
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self {
            command_buffer: 1024,
            terminate_policy: TerminatePolicy::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = CoordinatorConfig::default();
        assert_eq!(config.command_buffer, 1024);
        assert_eq!(config.terminate_policy, TerminatePolicy::StopImmediately);
    }

    #[test]
    fn test_policy_from_str() {
        assert_eq!("stop".parse::<TerminatePolicy>().unwrap(), TerminatePolicy::StopImmediately);
        assert_eq!("drain".parse::<TerminatePolicy>().unwrap(), TerminatePolicy::DrainPending);
        assert_eq!(
            "drain-pending".parse::<TerminatePolicy>().unwrap(),
            TerminatePolicy::DrainPending
        );
        assert!("flush".parse::<TerminatePolicy>().is_err());
    }

    #[test]
    fn test_policy_serde_kebab_case() {
        let yaml = "terminate-policy: drain-pending\n";
        let config: CoordinatorConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.terminate_policy, TerminatePolicy::DrainPending);
        assert_eq!(config.command_buffer, 1024);
    }
}
