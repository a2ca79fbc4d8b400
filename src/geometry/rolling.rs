/// One odometer column: `digit` is rolling towards `next` by `fraction`.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct DigitRoll {
    /// Digit leaving the window.
    pub digit: u8,
    /// Digit entering the window.
    pub next: u8,
    /// Roll progress in `[0, 1)`.
    pub fraction: f64,
}

impl DigitRoll {
    /// Vertical offsets of the outgoing and incoming glyphs for a cell of `cell_height`.
    pub fn offsets(&self, cell_height: f64) -> (f64, f64) {
        (
            -self.fraction * cell_height,
            (1.0 - self.fraction) * cell_height,
        )
    }
}

/// Most columns a readout can have; `10^38 - 1` still fits in a `u128`.
pub const MAX_ROLLING_DIGITS: u32 = 38;

/// Odometer decomposition of `value` into `digit_count` columns, most significant first.
///
/// The ones column rolls continuously with the fractional part; a higher column
/// only moves while every column below it is passing from 9 to 0. Negative and
/// NaN values read as zero; values past capacity saturate at all nines.
/// `digit_count` is clamped to [`MAX_ROLLING_DIGITS`].
pub fn rolling_digits(value: f64, digit_count: u32) -> Vec<DigitRoll> {
    let digit_count = digit_count.min(MAX_ROLLING_DIGITS);
    if digit_count == 0 {
        return Vec::new();
    }
    let capacity = 10f64.powi(digit_count as i32) - 1.0;
    let v = if value.is_nan() { 0.0 } else { value.max(0.0) };
    if v >= capacity {
        return vec![
            DigitRoll {
                digit: 9,
                next: 9,
                fraction: 0.0,
            };
            digit_count as usize
        ];
    }

    let whole = v.floor() as u128;
    let mut fraction = v - v.floor();
    let mut columns = Vec::with_capacity(digit_count as usize);
    let mut rest = whole;
    for _ in 0..digit_count {
        let digit = (rest % 10) as u8;
        columns.push(DigitRoll {
            digit,
            next: (digit + 1) % 10,
            fraction,
        });
        if digit != 9 {
            fraction = 0.0;
        }
        rest /= 10;
    }
    columns.reverse();
    columns
}

#[cfg(test)]
#[path = "../../tests/unit/geometry/rolling.rs"]
mod tests;
