use serde::Deserialize;

/// Knobs for a voting power evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Evaluate at this unix timestamp instead of the system clock.
    pub now_ts: Option<i64>,

    /// Added to the evaluation time, to allow tests to move forward in time.
    pub time_offset: i64,

    /// Decimals of the governing token; power is reported in whole tokens.
    pub token_decimals: u8,

    /// Also skip deposits whose current amount is not above the amount that
    /// was initially locked. Some tooling treats that as a withdrawal in
    /// progress; the governance program itself does not, so this is off by
    /// default.
    pub exclude_not_above_initial_lock: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            now_ts: None,
            time_offset: 0,
            token_decimals: 6,
            exclude_not_above_initial_lock: false,
        }
    }
}

impl EngineConfig {
    pub fn at(now_ts: i64) -> Self {
        EngineConfig {
            now_ts: Some(now_ts),
            ..EngineConfig::default()
        }
    }

    pub fn clock_unix_timestamp(&self) -> i64 {
        let now_ts = self.now_ts.unwrap_or_else(|| {
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map_or(0, |elapsed| elapsed.as_secs() as i64)
        });
        now_ts.saturating_add(self.time_offset)
    }

    /// Native units per whole token.
    pub fn decimals_factor(&self) -> f64 {
        10f64.powi(self.token_decimals as i32)
    }
}
