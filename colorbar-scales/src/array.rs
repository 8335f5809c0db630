//! Tick, bisection and quantile helpers over `f32` slices

const E10: f32 = 7.071_068; // sqrt(50)
const E5: f32 = 3.162_277_7; // sqrt(10)
const E2: f32 = std::f32::consts::SQRT_2;

/// Largest tick count honored, larger requests are clamped to it
pub const MAX_TICK_COUNT: f32 = 1000.0;

/// Generate approximately `count` nicely rounded ticks between `start` and `stop`
pub fn ticks(start: f32, stop: f32, count: f32) -> Vec<f32> {
    if count <= 0.0 || count.is_nan() || !start.is_finite() || !stop.is_finite() {
        return vec![];
    }
    let count = count.min(MAX_TICK_COUNT);

    if start == stop {
        return vec![start];
    }

    let reverse = stop < start;
    let (i1, i2, inc) = if reverse {
        tick_spec(stop, start, count)
    } else {
        tick_spec(start, stop, count)
    };

    if !(i2 >= i1) {
        return vec![];
    }

    // A negative increment encodes the reciprocal of a fractional step, which keeps
    // values like 0.1 exact instead of accumulating 0.1 * 3 = 0.30000001
    let n = (i2 - i1 + 1.0) as usize;
    let tick_at = |i: f32| if inc < 0.0 { i / -inc } else { i * inc };
    if reverse {
        (0..n).map(|i| tick_at(i2 - i as f32)).collect()
    } else {
        (0..n).map(|i| tick_at(i1 + i as f32)).collect()
    }
}

/// Returns (first tick index, last tick index, increment)
fn tick_spec(start: f32, stop: f32, count: f32) -> (f32, f32, f32) {
    let step = (stop - start) / count.max(0.0);
    let power = step.log10().floor();
    let error = step / 10.0_f32.powf(power);
    let factor = nice_factor(error);

    let (mut i1, mut i2, inc);
    if power < 0.0 {
        let temp_inc = 10.0_f32.powf(-power) / factor;
        i1 = (start * temp_inc).round();
        i2 = (stop * temp_inc).round();
        if i1 / temp_inc < start {
            i1 += 1.0;
        }
        if i2 / temp_inc > stop {
            i2 -= 1.0;
        }
        inc = -temp_inc;
    } else {
        inc = 10.0_f32.powf(power) * factor;
        i1 = (start / inc).round();
        i2 = (stop / inc).round();
        if i1 * inc < start {
            i1 += 1.0;
        }
        if i2 * inc > stop {
            i2 -= 1.0;
        }
    }

    if i2 < i1 && 0.5 <= count && count < 2.0 {
        return tick_spec(start, stop, count * 2.0);
    }

    (i1, i2, inc)
}

fn nice_factor(error: f32) -> f32 {
    if error >= E10 {
        10.0
    } else if error >= E5 {
        5.0
    } else if error >= E2 {
        2.0
    } else {
        1.0
    }
}

/// Magnitude of the step between ticks for the given interval and count
pub fn tick_increment(start: f32, stop: f32, count: f32) -> f32 {
    if !(count > 0.0) {
        return f32::NAN;
    }
    let count = count.min(MAX_TICK_COUNT);

    if start == stop {
        return f32::NEG_INFINITY;
    }

    let step = (stop - start).abs() / count;
    if step == 0.0 || !step.is_finite() {
        return f32::NAN;
    }

    let power = step.log10().floor();
    if power < 0.0 {
        // Divide by an exact power of ten so steps like 0.1 stay as close as f32 allows
        let scale = 10.0_f32.powf(-power);
        nice_factor(step * scale) / scale
    } else {
        let scale = 10.0_f32.powf(power);
        nice_factor(step / scale) * scale
    }
}

/// Signed step between ticks, negative when `stop < start`
pub fn tick_step(start: f32, stop: f32, count: f32) -> f32 {
    let inc = tick_increment(start, stop, count);
    if stop < start {
        -inc
    } else {
        inc
    }
}

/// Index of the first element of `sorted` strictly greater than `x`
pub fn bisect_right(sorted: &[f32], x: f32) -> usize {
    sorted.partition_point(|v| *v <= x)
}

/// Linearly interpolated `p`-quantile of an ascending slice (R-7 method)
pub fn quantile_sorted(sorted: &[f32], p: f32) -> Option<f32> {
    let n = sorted.len();
    if n == 0 || p.is_nan() {
        return None;
    }
    if p <= 0.0 || n < 2 {
        return Some(sorted[0]);
    }
    if p >= 1.0 {
        return Some(sorted[n - 1]);
    }

    let i = (n - 1) as f32 * p;
    let i0 = i.floor() as usize;
    let value0 = sorted[i0];
    let value1 = sorted[i0 + 1];
    Some(value0 + (value1 - value0) * (i - i0 as f32))
}
