use super::*;

fn digits(rolls: &[DigitRoll]) -> Vec<u8> {
    rolls.iter().map(|d| d.digit).collect()
}

#[test]
fn integer_values_are_at_rest() {
    let r = rolling_digits(42.0, 3);
    assert_eq!(digits(&r), vec![0, 4, 2]);
    assert!(r.iter().all(|d| d.fraction == 0.0));
}

#[test]
fn ones_column_rolls_with_fraction() {
    let r = rolling_digits(37.25, 2);
    assert_eq!(digits(&r), vec![3, 7]);
    assert_eq!(r[1].next, 8);
    assert!((r[1].fraction - 0.25).abs() < 1e-12);
    assert_eq!(r[0].fraction, 0.0);
}

#[test]
fn carry_propagates_through_nines() {
    let r = rolling_digits(199.5, 4);
    assert_eq!(digits(&r), vec![0, 1, 9, 9]);
    assert!((r[3].fraction - 0.5).abs() < 1e-12);
    assert!((r[2].fraction - 0.5).abs() < 1e-12);
    assert!((r[1].fraction - 0.5).abs() < 1e-12);
    assert_eq!(r[1].next, 2);
    assert_eq!(r[0].fraction, 0.0);
}

#[test]
fn out_of_range_values_saturate() {
    assert_eq!(digits(&rolling_digits(-5.0, 2)), vec![0, 0]);
    assert_eq!(digits(&rolling_digits(f64::NAN, 2)), vec![0, 0]);
    let r = rolling_digits(1234.0, 3);
    assert_eq!(digits(&r), vec![9, 9, 9]);
    assert!(r.iter().all(|d| d.fraction == 0.0));
    assert!(rolling_digits(5.0, 0).is_empty());
}

#[test]
fn offsets_move_glyphs_by_one_cell() {
    let d = DigitRoll {
        digit: 3,
        next: 4,
        fraction: 0.25,
    };
    let (out, inc) = d.offsets(40.0);
    assert_eq!(out, -10.0);
    assert_eq!(inc, 30.0);
}

#[test]
fn wide_readouts_keep_their_full_capacity() {
    let r = rolling_digits(1e15, 16);
    let mut expected = vec![0; 16];
    expected[0] = 1;
    assert_eq!(digits(&r), expected);

    let r = rolling_digits(123_456_789_012_345_678.0, 20);
    assert_eq!(r.len(), 20);
    assert_eq!(&digits(&r)[..4], &[0, 0, 1, 2]);
    assert!(r.iter().all(|d| d.fraction == 0.0));

    assert_eq!(digits(&rolling_digits(1e16, 16)), vec![9; 16]);
}

#[test]
fn column_count_is_clamped() {
    let r = rolling_digits(1e22, 50);
    assert_eq!(r.len(), MAX_ROLLING_DIGITS as usize);
    let mut expected = vec![0; MAX_ROLLING_DIGITS as usize];
    expected[MAX_ROLLING_DIGITS as usize - 23] = 1;
    assert_eq!(digits(&r), expected);
}
