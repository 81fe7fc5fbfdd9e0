//! Lockup vote weight multipliers.
//!
//! A deposit's voting power is `amount * multiplier`, where the multiplier is
//!
//! ```text
//!   (baseline + bonus) / baseline
//! ```
//!
//! and `bonus` depends on the lockup kind and on how much of the lockup is
//! left at evaluation time:
//!
//! - `None`, or any lockup at or past `end_ts`: no bonus, multiplier 1.
//! - `Cliff` and `Constant`: everything unlocks at `end_ts`, the bonus ramps
//!   linearly with the time left, up to `max_extra` at saturation.
//! - `Daily` and `Monthly`: the deposit unlocks in equal tranches, one per
//!   period. Each tranche earns the ramp bonus for its own unlock time, and
//!   the bonus is the average over all tranches still locked.

use crate::state::*;

/// The multiplier of a deposit that is not (or no longer) locked.
pub const BASELINE_MULTIPLIER: f64 = 1.0;

/// Vote weight multiplier of `lockup` under `config` at `now_ts`.
///
/// Configs with a zero baseline or zero saturation can't express a bonus and
/// yield the baseline multiplier; `Registrar::validate` rejects
/// them before they get here.
pub fn multiplier(lockup: &Lockup, config: &VotingMintConfig, now_ts: i64) -> f64 {
    let baseline = config.baseline_vote_weight_scaled_factor as f64;
    let saturation_secs = config.lockup_saturation_secs as f64;
    if baseline == 0.0 || saturation_secs == 0.0 || lockup.expired(now_ts) {
        return BASELINE_MULTIPLIER;
    }

    let max_extra = config.max_extra_lockup_vote_weight_scaled_factor as f64;
    let seconds_left = lockup.seconds_left(now_ts) as f64;
    let bonus = match lockup.kind {
        LockupKind::None => 0.0,
        LockupKind::Cliff | LockupKind::Constant => {
            max_extra * seconds_left.min(saturation_secs) / saturation_secs
        }
        LockupKind::Daily | LockupKind::Monthly => vested_bonus(
            max_extra,
            seconds_left,
            saturation_secs,
            lockup.kind.period_secs() as f64,
        ),
    };
    (baseline + bonus) / baseline
}

/// The largest multiplier `config` can hand out, for a saturated lockup.
pub fn max_multiplier(config: &VotingMintConfig) -> f64 {
    let baseline = config.baseline_vote_weight_scaled_factor as f64;
    if baseline == 0.0 {
        return BASELINE_MULTIPLIER;
    }
    (baseline + config.max_extra_lockup_vote_weight_scaled_factor as f64) / baseline
}

// Periods are fractional: a lockup ending mid-period counts the partial
// period. The closed form below sums the per-tranche ramp bonus
// `k / periods_before_saturation` over the unsaturated tranches
// k = 1..=unsaturated and a full bonus for every saturated one.
fn vested_bonus(max_extra: f64, seconds_left: f64, saturation_secs: f64, period_secs: f64) -> f64 {
    let total_periods = seconds_left / period_secs;
    if total_periods <= 0.0 {
        return 0.0;
    }
    let periods_before_saturation = saturation_secs / period_secs;
    let unsaturated = total_periods.min(periods_before_saturation);
    let saturated = (total_periods - unsaturated).max(0.0);
    let bonus = max_extra / total_periods
        * (saturated + (unsaturated + 1.0) * unsaturated / 2.0 / periods_before_saturation);
    // a saturation shorter than one period would overshoot
    bonus.min(max_extra)
}
