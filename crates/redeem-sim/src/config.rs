//! Simulation and session-timer configuration.
//!
//! Defaults reproduce the production page: stages of 3 s, 2 s, and 2 s, a
//! 15-minute payment window that restarts when it runs out, and a 10-minute
//! urgency countdown that stops at zero. Override via environment variables
//! or explicit construction.

use std::time::Duration;

use redeem_state::Prefill;

use crate::protocol::DEFAULT_PROTOCOL_PREFIX;

/// Timing and naming knobs of a redemption session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationConfig {
    /// Delay of each of the three confirmation stages.
    pub stage_durations: [Duration; 3],
    /// Prefix of generated protocol codes.
    pub protocol_prefix: String,
    /// Length of the restarting payment-window countdown.
    pub payment_window: Duration,
    /// Length of the urgency countdown, which halts at zero.
    pub urgency_window: Duration,
    /// Countdown tick period.
    pub tick: Duration,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            stage_durations: [
                Duration::from_millis(3000),
                Duration::from_millis(2000),
                Duration::from_millis(2000),
            ],
            protocol_prefix: DEFAULT_PROTOCOL_PREFIX.to_string(),
            payment_window: Duration::from_secs(15 * 60),
            urgency_window: Duration::from_secs(10 * 60),
            tick: Duration::from_secs(1),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from environment variables.
    ///
    /// Variables:
    /// - `REDEEM_STAGE1_MS`, `REDEEM_STAGE2_MS`, `REDEEM_STAGE3_MS` (default: 3000, 2000, 2000)
    /// - `REDEEM_PROTOCOL_PREFIX` (default: `TSN-LIB-2025-`)
    /// - `REDEEM_PAYMENT_WINDOW_SECS` (default: 900)
    /// - `REDEEM_URGENCY_SECS` (default: 600)
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            stage_durations: [
                env_millis("REDEEM_STAGE1_MS", defaults.stage_durations[0])?,
                env_millis("REDEEM_STAGE2_MS", defaults.stage_durations[1])?,
                env_millis("REDEEM_STAGE3_MS", defaults.stage_durations[2])?,
            ],
            protocol_prefix: std::env::var("REDEEM_PROTOCOL_PREFIX")
                .unwrap_or(defaults.protocol_prefix),
            payment_window: env_secs("REDEEM_PAYMENT_WINDOW_SECS", defaults.payment_window)?,
            urgency_window: env_secs("REDEEM_URGENCY_SECS", defaults.urgency_window)?,
            tick: defaults.tick,
        })
    }

    /// Short stage delays for demos and smoke runs.
    pub fn fast() -> Self {
        Self {
            stage_durations: [
                Duration::from_millis(30),
                Duration::from_millis(20),
                Duration::from_millis(20),
            ],
            ..Self::default()
        }
    }

    /// Total time a confirmation run takes.
    pub fn total_stage_time(&self) -> Duration {
        self.stage_durations.iter().sum()
    }
}

/// Prefill values from `REDEEM_PREFILL_NAME`, `REDEEM_PREFILL_PRIZE`, and
/// `REDEEM_PREFILL_PROTOCOL`. Unset or empty variables are skipped.
pub fn prefill_from_env() -> Prefill {
    let var = |name: &str| std::env::var(name).ok().filter(|v| !v.trim().is_empty());
    Prefill {
        display_name: var("REDEEM_PREFILL_NAME"),
        prize_amount: var("REDEEM_PREFILL_PRIZE"),
        protocol: var("REDEEM_PREFILL_PROTOCOL"),
    }
}

fn env_millis(var: &str, default: Duration) -> Result<Duration, ConfigError> {
    env_u64(var).map(|v| v.map_or(default, Duration::from_millis))
}

fn env_secs(var: &str, default: Duration) -> Result<Duration, ConfigError> {
    env_u64(var).map(|v| v.map_or(default, Duration::from_secs))
}

fn env_u64(var: &str) -> Result<Option<u64>, ConfigError> {
    match std::env::var(var) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber(var.to_string(), raw)),
        Err(_) => Ok(None),
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid number for {0}: {1:?}")]
    InvalidNumber(String, String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_matches_page_timings() {
        let cfg = SimulationConfig::default();
        assert_eq!(cfg.total_stage_time(), Duration::from_millis(7000));
        assert_eq!(cfg.payment_window, Duration::from_secs(900));
        assert_eq!(cfg.protocol_prefix, "TSN-LIB-2025-");
    }

    #[test]
    fn fast_keeps_default_windows() {
        let cfg = SimulationConfig::fast();
        assert_eq!(cfg.total_stage_time(), Duration::from_millis(70));
        assert_eq!(cfg.payment_window, SimulationConfig::default().payment_window);
    }

    #[test]
    fn env_millis_uses_default_when_var_absent() {
        let d = env_millis("NONEXISTENT_REDEEM_VAR_12345", Duration::from_millis(7)).unwrap();
        assert_eq!(d, Duration::from_millis(7));
    }

    #[test]
    fn env_millis_reads_value() {
        std::env::set_var("TEST_REDEEM_STAGE_OK", " 250 ");
        let d = env_millis("TEST_REDEEM_STAGE_OK", Duration::ZERO);
        std::env::remove_var("TEST_REDEEM_STAGE_OK");
        assert_eq!(d.unwrap(), Duration::from_millis(250));
    }

    #[test]
    fn env_millis_rejects_garbage() {
        std::env::set_var("TEST_REDEEM_STAGE_BAD", "soon");
        let result = env_millis("TEST_REDEEM_STAGE_BAD", Duration::ZERO);
        std::env::remove_var("TEST_REDEEM_STAGE_BAD");
        assert!(matches!(result, Err(ConfigError::InvalidNumber(..))));
    }

    #[test]
    fn prefill_skips_empty_values() {
        std::env::set_var("REDEEM_PREFILL_NAME", "  ");
        let prefill = prefill_from_env();
        std::env::remove_var("REDEEM_PREFILL_NAME");
        assert_eq!(prefill.display_name, None);
    }
}
