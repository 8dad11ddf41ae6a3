//! Easing for the counter animation.

/// Ease-out-cubic: fast start, gentle landing.
///
/// `progress` is clamped to `[0, 1]`; the output is monotonic over that
/// range with `ease_out_cubic(0) == 0` and `ease_out_cubic(1) == 1`.
#[must_use]
pub fn ease_out_cubic(progress: f64) -> f64 {
    let p = progress.clamp(0.0, 1.0);
    1.0 - (1.0 - p).powi(3)
}

/// The sequence of counter values painted while animating from `from` to
/// `to` in `steps` frames.
///
/// The sequence is monotonic and always ends exactly at `to`. With zero
/// steps the target is the only frame.
#[must_use]
pub fn animation_frames(from: u64, to: u64, steps: u32) -> Vec<u64> {
    if steps == 0 {
        return vec![to];
    }

    let mut frames = Vec::with_capacity(steps as usize);
    let span = to as f64 - from as f64;
    for step in 1..=steps {
        let progress = f64::from(step) / f64::from(steps);
        let eased = ease_out_cubic(progress);
        let value = (from as f64 + span * eased).floor();
        frames.push(if value < 0.0 { 0 } else { value as u64 });
    }
    // Floor rounding can land one short on the last frame.
    if let Some(last) = frames.last_mut() {
        *last = to;
    }
    frames
}
