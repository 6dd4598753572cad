//! Class boundary post-processing: middle-point override, rounding and
//! display unit scaling.
//!
//! Every step validates first and mutates only on success, so a failed step
//! leaves the class set exactly as it was.
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::breaks::Method;
use crate::class::{format_value, ClassSet};
use crate::error::{ClassifyError, RoundingError};

/// Decimal places beyond which rounding is considered a mistake.
pub const MAX_DECIMALS: i32 = 10;

/// Coarsest snapping accepted: `10^308` is the largest finite power of ten.
pub const MAX_SNAP_EXPONENT: i32 = 308;

/// Rounding actually applied for a run: explicit setting wins, logarithmic
/// classification defaults to 2 decimals, more than [`MAX_DECIMALS`]
/// decimals is replaced by whole numbers.
pub fn effective_rounding(requested: Option<i32>, method: Method) -> Option<i32> {
    match requested {
        Some(n) if n > MAX_DECIMALS => {
            warn!(requested = n, "rounding class boundaries to more than {MAX_DECIMALS} decimals, using whole numbers (0) instead");
            Some(0)
        }
        Some(n) => Some(n),
        None if method == Method::Logarithmic => Some(crate::breaks::logarithmic::DEFAULT_ROUNDING),
        None => None,
    }
}

/// Optimal negative rounding setting for a highest boundary of `max`:
/// snaps to two orders of magnitude below the first power of ten ≥ `max`.
pub fn suggest_rounding(max: f64) -> i32 {
    let max = max.abs();
    if !max.is_finite() {
        return 0;
    }
    let mut exp = 1;
    while max > 10f64.powi(exp) && exp < 308 {
        exp += 1;
    }
    2 - exp
}

/// Round every boundary.
///
/// `n ≥ 0` rounds to `n` decimals and keeps fixed-decimal labels.
/// `n < 0` snaps to the nearest `10^|n|`: the lowest boundary is rounded up,
/// the highest down, the rest to nearest. Snapping is refused when the
/// granularity exceeds the highest boundary or the lowest threshold
/// (`value[1]`), or when it merges neighbouring boundaries. `n` outside
/// `-MAX_SNAP_EXPONENT..=MAX_DECIMALS` is refused outright.
pub fn round_classes(classes: &mut ClassSet, n: i32) -> Result<(), RoundingError> {
    if !(-MAX_SNAP_EXPONENT..=MAX_DECIMALS).contains(&n) {
        return Err(RoundingError::MagnitudeOutOfRange { n, min: -MAX_SNAP_EXPONENT, max: MAX_DECIMALS });
    }
    if classes.is_empty() {
        return Ok(());
    }
    if n >= 0 {
        round_decimals(classes, n as u32)
    } else {
        snap_to_power_of_ten(classes, n)
    }
}

fn round_decimals(classes: &mut ClassSet, decimals: u32) -> Result<(), RoundingError> {
    let scale = 10f64.powi(decimals as i32);
    let original = classes.values();
    let rounded: Vec<f64> = original.iter().map(|v| (v * scale).round() / scale).collect();

    for i in 1..rounded.len() {
        if rounded[i] <= rounded[i - 1] {
            return Err(RoundingError::DecimalCollision {
                decimals,
                index: i - 1,
                next: i,
                rounded: rounded[i],
            });
        }
    }

    let d = decimals as usize;
    for (class, v) in classes.as_mut_slice().iter_mut().zip(rounded) {
        class.value = v;
        class.label = format!("{v:.d$}");
    }
    debug!(decimals, values = ?classes.values(), "class boundaries rounded");
    Ok(())
}

fn snap_to_power_of_ten(classes: &mut ClassSet, n: i32) -> Result<(), RoundingError> {
    let granularity = 10f64.powi(n.abs());
    let original = classes.values();
    let last = original.len() - 1;
    let max = original.iter().cloned().fold(f64::NEG_INFINITY, f64::max);

    if granularity > max {
        return Err(RoundingError::GranularityAboveMax {
            n,
            granularity,
            max,
            suggested: suggest_rounding(max),
        });
    }
    if max < 10f64.powi(n.abs() + 1) {
        warn!(
            n,
            granularity,
            max,
            "rounding this coarse may leave the lowest class without features; consider a rounding of {}",
            n + 1
        );
    }

    let snapped: Vec<f64> = original
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let q = v / granularity;
            let q = if i == 0 {
                q.ceil()
            } else if i == last {
                q.floor()
            } else {
                q.round()
            };
            q * granularity
        })
        .collect();

    if snapped.len() >= 2 && snapped[1] <= snapped[0] {
        return Err(RoundingError::LowestCollapse {
            granularity,
            low: original[0],
            next: original[1],
            rounded: snapped[1],
            suggested: n + 1,
        });
    }
    if let Some(&threshold) = original.get(1) {
        if threshold != 0.0 && granularity > threshold.abs() {
            return Err(RoundingError::GranularityAboveLowest {
                granularity,
                threshold,
                suggested: suggest_rounding(threshold),
            });
        }
    }
    for i in 2..snapped.len() {
        if snapped[i] <= snapped[i - 1] {
            return Err(RoundingError::SnapCollision {
                granularity,
                index: i - 1,
                next: i,
                rounded: snapped[i],
                suggested: n + 1,
            });
        }
    }

    for (class, v) in classes.as_mut_slice().iter_mut().zip(snapped) {
        class.set_value(v);
    }
    debug!(granularity, values = ?classes.values(), "class boundaries snapped");
    Ok(())
}

/// Replace the boundary between the two middle classes with `value`.
///
/// Only applies to an even number of classes; odd counts are left alone
/// with a warning. `value` must lie strictly between the neighbouring
/// boundaries.
pub fn apply_middle_point(classes: &mut ClassSet, value: f64) -> Result<(), ClassifyError> {
    let len = classes.len();
    if len == 0 || len % 2 != 0 {
        warn!(classes = len, "middle point value only applies to an even number of classes; ignored");
        return Ok(());
    }
    let mid = len / 2;
    let values = classes.values();
    let low = values[mid - 1];
    let high = values.get(mid + 1).copied().unwrap_or(f64::INFINITY);
    if !(value > low && value < high) {
        return Err(ClassifyError::MiddlePoint { value, low, high });
    }
    debug!(index = mid, from = values[mid], to = value, "middle class boundary adjusted");
    classes.as_mut_slice()[mid].set_value(value);
    Ok(())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UnitAction {
    Multiply,
    Divide,
}

/// Display-only scaling of boundary values (e.g. metres shown as km).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UnitModifier {
    pub action: UnitAction,
    pub by: f64,
}

/// Multiply or divide every boundary by `modifier.by`. Meant for a display
/// copy of the classes, after rounding.
pub fn unit_modify(classes: &mut ClassSet, modifier: UnitModifier) -> Result<(), ClassifyError> {
    let UnitModifier { action, by } = modifier;
    if !by.is_finite() {
        return Err(ClassifyError::UnitModifier(format!("factor {by} is not finite")));
    }
    if action == UnitAction::Divide && by == 0.0 {
        return Err(ClassifyError::UnitModifier("cannot divide by 0".to_string()));
    }
    for class in classes.as_mut_slice() {
        let v = match action {
            UnitAction::Multiply => class.value * by,
            UnitAction::Divide => class.value / by,
        };
        class.value = v;
        class.label = format_value(v);
    }
    Ok(())
}
