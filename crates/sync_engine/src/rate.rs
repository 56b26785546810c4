//! Adaptive warp-rate selection.

/// Choose the warp index to close `offset_s`
///
/// Scans from the fastest rate down to index 1 and returns the first whose
/// projected catch-up time `|offset| / rate` exceeds `min_catch_up_s`. Falls
/// back to index 1 when every rate would close the gap too fast.
///
/// Returns `None` when the table has no rate beyond index 0.
pub fn select_warp_index(rates: &[f64], offset_s: f64, min_catch_up_s: f64) -> Option<usize> {
    if rates.len() < 2 {
        return None;
    }

    let gap = offset_s.abs();
    let chosen = (1..rates.len())
        .rev()
        .find(|&i| gap / rates[i] > min_catch_up_s)
        .unwrap_or(1);
    Some(chosen)
}
