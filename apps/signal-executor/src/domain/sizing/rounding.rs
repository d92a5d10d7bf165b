//! Step rounding helpers.
//!
//! A non-positive step means "no constraint" and passes the value through.

use rust_decimal::Decimal;

/// Round `value` up to the next multiple of `step`.
#[must_use]
pub fn round_up_to_step(value: Decimal, step: Decimal) -> Decimal {
    if step <= Decimal::ZERO {
        return value;
    }
    (value / step).ceil() * step
}

/// Round `value` down to the previous multiple of `step`.
#[must_use]
pub fn round_down_to_step(value: Decimal, step: Decimal) -> Decimal {
    if step <= Decimal::ZERO {
        return value;
    }
    (value / step).floor() * step
}

/// Round `value` to the nearest multiple of `step`.
#[must_use]
pub fn round_to_step(value: Decimal, step: Decimal) -> Decimal {
    if step <= Decimal::ZERO {
        return value;
    }
    (value / step).round() * step
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn round_up_moves_to_next_step() {
        assert_eq!(round_up_to_step(dec!(0.0025), dec!(0.001)), dec!(0.003));
        assert_eq!(round_up_to_step(dec!(0.003), dec!(0.001)), dec!(0.003));
        assert_eq!(round_up_to_step(dec!(12.01), dec!(1)), dec!(13));
    }

    #[test]
    fn round_down_moves_to_previous_step() {
        assert_eq!(round_down_to_step(dec!(2300.009), dec!(0.01)), dec!(2300.00));
        assert_eq!(round_down_to_step(dec!(0.00259), dec!(0.0001)), dec!(0.0025));
        assert_eq!(round_down_to_step(dec!(7), dec!(5)), dec!(5));
    }

    #[test]
    fn round_nearest() {
        assert_eq!(round_to_step(dec!(1700.004), dec!(0.01)), dec!(1700.00));
        assert_eq!(round_to_step(dec!(1700.006), dec!(0.01)), dec!(1700.01));
    }

    #[test]
    fn non_positive_step_passes_through() {
        assert_eq!(round_up_to_step(dec!(0.0025), Decimal::ZERO), dec!(0.0025));
        assert_eq!(round_down_to_step(dec!(0.0025), dec!(-0.1)), dec!(0.0025));
        assert_eq!(round_to_step(dec!(1.234), Decimal::ZERO), dec!(1.234));
    }
}
