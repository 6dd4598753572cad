//! Jenks natural breaks (Fisher–Jenks dynamic programme).
//!
//! Minimises the summed within-class squared deviation over the sorted
//! values. O(n² · k) time, O(n · k) memory.
use crate::stats::sorted;

/// Lower boundaries of `class_count` natural-breaks classes.
///
/// The optimisation yields `class_count + 1` breaks (min, the inner breaks,
/// max); the trailing maximum is dropped. Returns the sorted values when
/// there are fewer values than classes.
pub fn jenks_breaks(values: &[f64], class_count: usize) -> Vec<f64> {
    let data = sorted(values);
    if class_count == 0 || data.is_empty() {
        return Vec::new();
    }
    if class_count > data.len() {
        return data;
    }
    let mut breaks = natural_breaks(&data, class_count);
    breaks.pop();
    breaks
}

/// Full break list (`class_count + 1` entries) over sorted `data`.
fn natural_breaks(data: &[f64], class_count: usize) -> Vec<f64> {
    let lower_limits = lower_class_limits(data, class_count);

    let mut breaks = vec![0.0; class_count + 1];
    breaks[class_count] = data[data.len() - 1];

    // Walk the limits matrix back from the last value; each limit is the
    // first value of its class.
    let mut k = data.len();
    for class in (1..=class_count).rev() {
        let limit = lower_limits[k][class].max(1);
        breaks[class - 1] = data[limit - 1];
        k = limit - 1;
    }
    breaks
}

/// `limits[l][j]`: 1-based index of the first value in class `j` of the
/// optimal `j`-class split of the first `l` values.
fn lower_class_limits(data: &[f64], class_count: usize) -> Vec<Vec<usize>> {
    let n = data.len();
    let mut limits = vec![vec![0usize; class_count + 1]; n + 1];
    let mut variance = vec![vec![0.0f64; class_count + 1]; n + 1];

    for j in 1..=class_count {
        limits[1][j] = 1;
        for row in variance.iter_mut().skip(2) {
            row[j] = f64::INFINITY;
        }
    }

    for l in 2..=n {
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        let mut w = 0.0;
        let mut var = 0.0;

        for m in 1..=l {
            let lower = l - m + 1;
            let val = data[lower - 1];

            w += 1.0;
            sum += val;
            sum_sq += val * val;
            var = sum_sq - (sum * sum) / w;

            let prev = lower - 1;
            if prev != 0 {
                for j in 2..=class_count {
                    let candidate = var + variance[prev][j - 1];
                    if variance[l][j] >= candidate {
                        limits[l][j] = lower;
                        variance[l][j] = candidate;
                    }
                }
            }
        }

        limits[l][1] = 1;
        variance[l][1] = var;
    }

    limits
}
