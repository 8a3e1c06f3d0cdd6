//! Quarter-wave sine table, built at compile time with integer Taylor series.

use super::{FRAC_BITS, ONE_RAW};

pub(super) const HALF_PI_RAW: i64 = 6_746_518_852;

const TABLE_BITS: u32 = 10;
const TABLE_SEGMENTS: i64 = 1 << TABLE_BITS;

static SIN_TABLE: [i64; (1 << TABLE_BITS) + 1] = build_sin_table();

const fn mul_raw(a: i128, b: i128) -> i128 {
    (a * b) >> FRAC_BITS
}

/// sin(x) for x in [0, π/2], Q32.32 in and out.
const fn taylor_sin(x: i128) -> i128 {
    let x2 = mul_raw(x, x);
    let mut term = x;
    let mut sum = x;
    let mut k: i128 = 1;
    while k <= 12 {
        term = -mul_raw(term, x2) / ((2 * k) * (2 * k + 1));
        sum += term;
        k += 1;
    }
    sum
}

const fn build_sin_table() -> [i64; (1 << TABLE_BITS) + 1] {
    let mut table = [0i64; (1 << TABLE_BITS) + 1];
    let mut i: i64 = 0;
    while i <= TABLE_SEGMENTS {
        let x = (HALF_PI_RAW as i128 * i as i128) / TABLE_SEGMENTS as i128;
        let mut v = taylor_sin(x);
        if v > ONE_RAW as i128 {
            v = ONE_RAW as i128;
        }
        table[i as usize] = v as i64;
        i += 1;
    }
    table[0] = 0;
    table[TABLE_SEGMENTS as usize] = ONE_RAW;
    table
}

/// sin over the first quadrant, `r` in [0, HALF_PI_RAW].
fn quarter_sin(r: i64) -> i64 {
    let scaled = r as i128 * TABLE_SEGMENTS as i128;
    let idx = (scaled / HALF_PI_RAW as i128) as usize;
    if idx >= TABLE_SEGMENTS as usize {
        return SIN_TABLE[TABLE_SEGMENTS as usize];
    }
    let rem = scaled % HALF_PI_RAW as i128;
    let lo = SIN_TABLE[idx] as i128;
    let hi = SIN_TABLE[idx + 1] as i128;
    (lo + (hi - lo) * rem / HALF_PI_RAW as i128) as i64
}

pub(super) fn sin_raw(angle: i64) -> i64 {
    let period = 4 * HALF_PI_RAW;
    let a = angle.rem_euclid(period);
    let quadrant = a / HALF_PI_RAW;
    let r = a % HALF_PI_RAW;
    match quadrant {
        0 => quarter_sin(r),
        1 => quarter_sin(HALF_PI_RAW - r),
        2 => -quarter_sin(r),
        _ => -quarter_sin(HALF_PI_RAW - r),
    }
}
