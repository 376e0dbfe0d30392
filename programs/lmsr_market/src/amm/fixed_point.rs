//! # Signed Fixed-Point Arithmetic
//!
//! The pricing engine works in a signed 128-bit fixed-point format with
//! 18 fractional digits, independent of the collateral token's decimals.
//!
//! ```text
//!   raw value        real value
//!   1_000_000_000_000_000_000  =  1.0
//!     500_000_000_000_000_000  =  0.5
//!  -2_000_000_000_000_000_000  = -2.0
//! ```
//!
//! ## Precision and bounds
//!
//! | Operation | Rounding            | Domain                              |
//! |-----------|---------------------|-------------------------------------|
//! | `mul`     | toward −∞           | any, fails if the result overflows  |
//! | `div`     | toward −∞           | non-zero divisor                    |
//! | `exp`     | ≤ 1e-16 relative    | `x ≤ 46.0`; returns 0 below `-42.0` |
//! | `ln`      | ≤ 1e-16 absolute    | `x > 0`                             |
//!
//! Every overflow is reported as an [`AmmError`]; nothing wraps or saturates.

use anchor_lang::prelude::*;

/// Errors raised by the pricing engine
#[error_code(offset = 7000)]
pub enum AmmError {
    #[msg("Arithmetic overflow in fixed-point math")]
    Overflow,
    #[msg("Division by zero")]
    DivisionByZero,
    #[msg("Exponent input above the supported range")]
    ExpOverflow,
    #[msg("Logarithm of a non-positive value")]
    LnOfNonPositive,
    #[msg("Liquidity parameter must be positive")]
    InvalidLiquidityParam,
    #[msg("Cannot sell more shares than outstanding")]
    InsufficientShares,
    #[msg("Negative value cannot be converted to token units")]
    NegativeAmount,
    #[msg("Collateral decimals exceed engine precision")]
    UnsupportedDecimals,
}

/// Number of fractional decimal digits carried by [`Fixed`]
pub const DECIMALS: u8 = 18;

/// Raw representation of 1.0
pub const SCALE: i128 = 1_000_000_000_000_000_000;

/// ln(2) in raw fixed-point units
pub const LN_2: i128 = 693_147_180_559_945_309;

/// Largest accepted `exp` input (e^46 ≈ 9.5e19 still fits the raw range)
pub const EXP_MAX_INPUT: i128 = 46 * SCALE;

/// Below this input `exp` is smaller than one raw unit
pub const EXP_MIN_INPUT: i128 = -42 * SCALE;

/// Rounding direction for integer conversions
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Rounding {
    Down,
    Up,
}

/// Signed fixed-point number with 18 fractional digits
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
pub struct Fixed(i128);

impl Fixed {
    pub const ZERO: Fixed = Fixed(0);
    pub const ONE: Fixed = Fixed(SCALE);

    pub const fn from_raw(raw: i128) -> Self {
        Fixed(raw)
    }

    pub const fn raw(self) -> i128 {
        self.0
    }

    /// Whole number `n` as fixed-point
    pub fn from_int(n: i64) -> Result<Self> {
        (n as i128)
            .checked_mul(SCALE)
            .map(Fixed)
            .ok_or_else(|| error!(AmmError::Overflow))
    }

    pub fn is_positive(self) -> bool {
        self.0 > 0
    }

    pub fn checked_add(self, rhs: Fixed) -> Result<Fixed> {
        self.0
            .checked_add(rhs.0)
            .map(Fixed)
            .ok_or_else(|| error!(AmmError::Overflow))
    }

    pub fn checked_sub(self, rhs: Fixed) -> Result<Fixed> {
        self.0
            .checked_sub(rhs.0)
            .map(Fixed)
            .ok_or_else(|| error!(AmmError::Overflow))
    }

    /// `self * rhs`, rounded toward negative infinity
    pub fn checked_mul(self, rhs: Fixed) -> Result<Fixed> {
        signed_mul_div(self.0, rhs.0, SCALE)
    }

    /// `self / rhs`, rounded toward negative infinity
    pub fn checked_div(self, rhs: Fixed) -> Result<Fixed> {
        require!(rhs.0 != 0, AmmError::DivisionByZero);
        signed_mul_div(self.0, SCALE, rhs.0)
    }

    /// e^self
    ///
    /// Range reduction `x = k·ln2 + r` with `r ∈ [0, ln2)`, a Taylor series
    /// for e^r, then a binary shift by `k`.
    pub fn exp(self) -> Result<Fixed> {
        let x = self.0;
        require!(x <= EXP_MAX_INPUT, AmmError::ExpOverflow);
        if x < EXP_MIN_INPUT {
            return Ok(Fixed::ZERO);
        }

        let k = x.div_euclid(LN_2);
        let r = x - k * LN_2;

        let mut term = SCALE;
        let mut sum = SCALE;
        let mut n: i128 = 1;
        while term != 0 {
            term = term * r / (n * SCALE);
            sum += term;
            n += 1;
        }

        let raw = if k >= 0 {
            sum.checked_mul(1i128 << k)
                .ok_or_else(|| error!(AmmError::ExpOverflow))?
        } else {
            sum >> (-k)
        };
        Ok(Fixed(raw))
    }

    /// Natural logarithm
    ///
    /// Normalises to `m·2^k` with `m ∈ [1, 2)` and evaluates
    /// `ln(m) = 2·atanh((m-1)/(m+1))`, which converges quickly for `z < 1/3`.
    pub fn ln(self) -> Result<Fixed> {
        require!(self.0 > 0, AmmError::LnOfNonPositive);

        let mut m = self.0;
        let mut k: i128 = 0;
        while m >= 2 * SCALE {
            m >>= 1;
            k += 1;
        }
        while m < SCALE {
            m <<= 1;
            k -= 1;
        }

        let z = (m - SCALE) * SCALE / (m + SCALE);
        let z2 = z * z / SCALE;
        let mut term = z;
        let mut sum = z;
        let mut n: i128 = 3;
        loop {
            term = term * z2 / SCALE;
            if term == 0 {
                break;
            }
            sum += term / n;
            n += 2;
        }

        Ok(Fixed(k * LN_2 + 2 * sum))
    }

    pub fn max(self, other: Fixed) -> Fixed {
        if self >= other { self } else { other }
    }
}

/// Token base units → engine precision. `scale` is `10^(18 - decimals)`, so
/// the conversion is an exact multiplication.
pub fn to_engine(amount: u64, scale: u64) -> Result<Fixed> {
    (amount as i128)
        .checked_mul(scale as i128)
        .map(Fixed)
        .ok_or_else(|| error!(AmmError::Overflow))
}

/// Engine precision → token base units with an explicit rounding direction
pub fn to_token_units(value: Fixed, scale: u64, rounding: Rounding) -> Result<u64> {
    require!(value.0 >= 0, AmmError::NegativeAmount);
    require!(scale > 0, AmmError::DivisionByZero);
    let units = mul_div(value.0 as u128, 1, scale as u128, rounding)?;
    u64::try_from(units).map_err(|_| error!(AmmError::Overflow))
}

/// `10^(18 - decimals)`, the exact factor between token base units and engine precision
pub fn share_scale(decimals: u8) -> Result<u64> {
    require!(decimals <= DECIMALS, AmmError::UnsupportedDecimals);
    Ok(10u64.pow((DECIMALS - decimals) as u32))
}

/// `a * b / d` over unsigned operands with a 256-bit intermediate product
pub fn mul_div(a: u128, b: u128, d: u128, rounding: Rounding) -> Result<u128> {
    require!(d != 0, AmmError::DivisionByZero);

    let (quotient, remainder) = match a.checked_mul(b) {
        Some(product) => (product / d, product % d),
        None => {
            let (hi, lo) = widening_mul(a, b);
            // quotient must fit in 128 bits
            require!(hi < d, AmmError::Overflow);
            div_wide(hi, lo, d)
        }
    };

    match rounding {
        Rounding::Down => Ok(quotient),
        Rounding::Up if remainder != 0 => quotient
            .checked_add(1)
            .ok_or_else(|| error!(AmmError::Overflow)),
        Rounding::Up => Ok(quotient),
    }
}

fn signed_mul_div(a: i128, b: i128, d: i128) -> Result<Fixed> {
    let negative = (a < 0) ^ (b < 0) ^ (d < 0);
    let rounding = if negative { Rounding::Up } else { Rounding::Down };
    let magnitude = mul_div(a.unsigned_abs(), b.unsigned_abs(), d.unsigned_abs(), rounding)?;
    let magnitude = i128::try_from(magnitude).map_err(|_| error!(AmmError::Overflow))?;
    Ok(Fixed(if negative { -magnitude } else { magnitude }))
}

/// Full 256-bit product of two u128 values as `(high, low)`
fn widening_mul(a: u128, b: u128) -> (u128, u128) {
    const MASK: u128 = u64::MAX as u128;
    let (a1, a0) = (a >> 64, a & MASK);
    let (b1, b0) = (b >> 64, b & MASK);

    let p00 = a0 * b0;
    let p01 = a0 * b1;
    let p10 = a1 * b0;
    let p11 = a1 * b1;

    let mid = (p00 >> 64) + (p01 & MASK) + (p10 & MASK);
    let lo = (p00 & MASK) | ((mid & MASK) << 64);
    let hi = p11 + (p01 >> 64) + (p10 >> 64) + (mid >> 64);
    (hi, lo)
}

/// Long division of `(hi, lo)` by `d`. Requires `hi < d`.
fn div_wide(hi: u128, lo: u128, d: u128) -> (u128, u128) {
    let mut rem = hi;
    let mut quot: u128 = 0;
    for i in (0..128).rev() {
        let carry = rem >> 127;
        rem = (rem << 1) | ((lo >> i) & 1);
        quot <<= 1;
        if carry == 1 || rem >= d {
            rem = rem.wrapping_sub(d);
            quot |= 1;
        }
    }
    (quot, rem)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn close(actual: Fixed, expected: i128, tolerance: i128) -> bool {
        (actual.raw() - expected).abs() <= tolerance
    }

    #[test]
    fn test_exp_known_values() {
        assert_eq!(Fixed::ZERO.exp().unwrap(), Fixed::ONE);
        assert!(close(Fixed::ONE.exp().unwrap(), 2_718_281_828_459_045_235, 1_000));
        assert!(close(
            Fixed::from_raw(-SCALE).exp().unwrap(),
            367_879_441_171_442_321,
            1_000
        ));
        assert!(close(
            Fixed::from_int(10).unwrap().exp().unwrap(),
            22_026_465_794_806_716_516_957,
            10_000_000
        ));
    }

    #[test]
    fn test_exp_bounds() {
        assert!(Fixed::from_raw(EXP_MAX_INPUT).exp().is_ok());
        assert!(Fixed::from_raw(EXP_MAX_INPUT + 1).exp().is_err());
        assert_eq!(Fixed::from_int(-50).unwrap().exp().unwrap(), Fixed::ZERO);
    }

    #[test]
    fn test_exp_is_monotonic() {
        let mut previous = Fixed::from_int(-20).unwrap().exp().unwrap();
        let step = SCALE / 4;
        let mut x = -20 * SCALE + step;
        while x <= 20 * SCALE {
            let current = Fixed::from_raw(x).exp().unwrap();
            assert!(current > previous);
            previous = current;
            x += step;
        }
    }

    #[test]
    fn test_ln_known_values() {
        assert_eq!(Fixed::ONE.ln().unwrap(), Fixed::ZERO);
        assert!(close(Fixed::from_int(2).unwrap().ln().unwrap(), LN_2, 10));
        assert!(close(
            Fixed::from_int(10).unwrap().ln().unwrap(),
            2_302_585_092_994_045_684,
            1_000
        ));
        assert!(close(
            Fixed::from_raw(SCALE / 2).ln().unwrap(),
            -LN_2,
            10
        ));
    }

    #[test]
    fn test_ln_rejects_non_positive() {
        assert!(Fixed::ZERO.ln().is_err());
        assert!(Fixed::from_raw(-1).ln().is_err());
    }

    #[test]
    fn test_ln_inverts_exp() {
        for n in [-5i64, -1, 0, 1, 3, 7, 15] {
            let x = Fixed::from_int(n).unwrap();
            let round_trip = x.exp().unwrap().ln().unwrap();
            assert!(close(round_trip, x.raw(), 1_000_000), "n = {}", n);
        }
    }

    #[test]
    fn test_mul_div_rounding() {
        let half = Fixed::from_raw(SCALE / 2);
        assert_eq!(half.checked_mul(Fixed::from_int(3).unwrap()).unwrap().raw(), 3 * SCALE / 2);

        let third = Fixed::ONE.checked_div(Fixed::from_int(3).unwrap()).unwrap();
        assert_eq!(third.raw(), 333_333_333_333_333_333);

        let neg_third = Fixed::from_raw(-SCALE)
            .checked_div(Fixed::from_int(3).unwrap())
            .unwrap();
        assert_eq!(neg_third.raw(), -333_333_333_333_333_334);

        assert!(Fixed::ONE.checked_div(Fixed::ZERO).is_err());
    }

    #[test]
    fn test_wide_mul_div_matches_narrow() {
        // a * b overflows u128 but the quotient fits
        let a: u128 = 3 << 100;
        let b: u128 = 5 << 60;
        let d: u128 = 1 << 90;
        assert_eq!(mul_div(a, b, d, Rounding::Down).unwrap(), 15 << 70);

        let large = Fixed::from_raw(1_000_000_000 * SCALE);
        let product = large.checked_mul(large).unwrap();
        assert_eq!(product.raw(), 1_000_000_000_000_000_000 * SCALE);
        assert_eq!(product.checked_div(large).unwrap(), large);
    }

    #[test]
    fn test_mul_overflow_is_an_error() {
        let huge = Fixed::from_raw(i128::MAX / 2);
        assert!(huge.checked_mul(Fixed::from_int(4).unwrap()).is_err());
        assert!(Fixed::from_raw(i128::MAX).checked_add(Fixed::ONE).is_err());
    }

    #[test]
    fn test_token_unit_conversion_is_exact() {
        let scale = share_scale(6).unwrap();
        assert_eq!(scale, 1_000_000_000_000);

        let engine = to_engine(10_200_000, scale).unwrap();
        assert_eq!(engine.raw(), 10_200_000 * 1_000_000_000_000);
        assert_eq!(to_token_units(engine, scale, Rounding::Down).unwrap(), 10_200_000);
        assert_eq!(to_token_units(engine, scale, Rounding::Up).unwrap(), 10_200_000);

        let with_dust = Fixed::from_raw(engine.raw() + 1);
        assert_eq!(to_token_units(with_dust, scale, Rounding::Down).unwrap(), 10_200_000);
        assert_eq!(to_token_units(with_dust, scale, Rounding::Up).unwrap(), 10_200_001);

        assert!(share_scale(19).is_err());
        assert_eq!(share_scale(18).unwrap(), 1);
    }

    #[test]
    fn test_error_codes_do_not_collide_with_market_errors() {
        use crate::errors::MarketError;

        assert_eq!(u32::from(AmmError::Overflow), 7000);
        assert_eq!(u32::from(AmmError::ExpOverflow), 7002);
        assert_eq!(u32::from(MarketError::ProtocolPaused), 6002);
        assert_ne!(
            Error::from(AmmError::ExpOverflow),
            Error::from(MarketError::ProtocolPaused)
        );
    }
}
