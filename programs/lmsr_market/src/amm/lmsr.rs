//! # LMSR Cost Function
//!
//! ## The Core Invariant
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                                                              │
//! │        C(q_yes, q_no) = b · ln( e^(q_yes/b) + e^(q_no/b) )   │
//! │                                                              │
//! │   Where:                                                     │
//! │   • q_yes, q_no = outstanding shares (engine precision)      │
//! │   • b          = liquidity parameter, set per pool          │
//! │                                                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! A trade is priced as the change in `C`:
//!
//! ```text
//! cost_to_buy(side, Δ)       = C(q + Δ·side) − C(q)
//! revenue_from_sell(side, Δ) = C(q) − C(q − Δ·side)
//! ```
//!
//! Instantaneous prices are the softmax of `q/b` and always sum to 1:
//!
//! ```text
//! price_yes = e^(q_yes/b) / (e^(q_yes/b) + e^(q_no/b))
//! ```
//!
//! ## Evaluation
//!
//! `C` is evaluated in log-sum-exp form, `m + b·ln(e^(q_yes/b − m) + e^(q_no/b − m))`
//! with `m = max(q_yes, q_no)/b`, so every exponent is ≤ 0 and only a
//! vanishingly small `b` relative to trade size can still fail (as an error).

use anchor_lang::prelude::*;

use super::fixed_point::{AmmError, Fixed};

/// Outcome side of a binary pool
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum Side {
    Yes,
    No,
}

/// Outstanding share counters in engine precision
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shares {
    pub yes: Fixed,
    pub no: Fixed,
}

impl Shares {
    pub fn of(&self, side: Side) -> Fixed {
        match side {
            Side::Yes => self.yes,
            Side::No => self.no,
        }
    }

    fn with(&self, side: Side, value: Fixed) -> Shares {
        match side {
            Side::Yes => Shares { yes: value, no: self.no },
            Side::No => Shares { yes: self.yes, no: value },
        }
    }
}

/// Logarithmic Market Scoring Rule over two outcomes
pub struct Lmsr {
    b: Fixed,
}

impl Lmsr {
    pub fn new(b: Fixed) -> Result<Self> {
        require!(b.is_positive(), AmmError::InvalidLiquidityParam);
        Ok(Self { b })
    }

    pub fn liquidity(&self) -> Fixed {
        self.b
    }

    /// `C(q_yes, q_no)`
    pub fn cost(&self, shares: Shares) -> Result<Fixed> {
        let yes = shares.yes.checked_div(self.b)?;
        let no = shares.no.checked_div(self.b)?;
        let m = yes.max(no);

        let sum = yes
            .checked_sub(m)?
            .exp()?
            .checked_add(no.checked_sub(m)?.exp()?)?;
        let lse = m.checked_add(sum.ln()?)?;

        self.b.checked_mul(lse)
    }

    /// Collateral required to add `amount` shares to `side`
    pub fn cost_to_buy(&self, shares: Shares, side: Side, amount: Fixed) -> Result<Fixed> {
        let after = shares.with(side, shares.of(side).checked_add(amount)?);
        let delta = self.cost(after)?.checked_sub(self.cost(shares)?)?;
        // monotone in exact arithmetic; never quote a negative cost
        Ok(delta.max(Fixed::ZERO))
    }

    /// Collateral released by removing `amount` shares from `side`
    pub fn revenue_from_sell(&self, shares: Shares, side: Side, amount: Fixed) -> Result<Fixed> {
        require!(amount <= shares.of(side), AmmError::InsufficientShares);
        let after = shares.with(side, shares.of(side).checked_sub(amount)?);
        let delta = self.cost(shares)?.checked_sub(self.cost(after)?)?;
        Ok(delta.max(Fixed::ZERO))
    }

    /// Marginal price of `side` as a probability in engine precision
    pub fn price(&self, shares: Shares, side: Side) -> Result<Fixed> {
        let yes = shares.yes.checked_div(self.b)?;
        let no = shares.no.checked_div(self.b)?;
        let m = yes.max(no);

        let e_yes = yes.checked_sub(m)?.exp()?;
        let e_no = no.checked_sub(m)?.exp()?;
        let numerator = match side {
            Side::Yes => e_yes,
            Side::No => e_no,
        };
        numerator.checked_div(e_yes.checked_add(e_no)?)
    }
}

/// Converts an engine-precision probability to basis points (floor)
pub fn to_bps(probability: Fixed) -> u64 {
    (probability.raw().max(0) * 10_000 / Fixed::ONE.raw()) as u64
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amm::fixed_point::{to_engine, SCALE, LN_2};

    fn fixed(n: i64) -> Fixed {
        Fixed::from_int(n).unwrap()
    }

    fn shares(yes: i64, no: i64) -> Shares {
        Shares { yes: fixed(yes), no: fixed(no) }
    }

    #[test]
    fn test_rejects_non_positive_liquidity() {
        assert!(Lmsr::new(Fixed::ZERO).is_err());
        assert!(Lmsr::new(fixed(-1)).is_err());
    }

    #[test]
    fn test_cost_of_balanced_book() {
        // C(q, q) = q + b·ln2
        let lmsr = Lmsr::new(fixed(100)).unwrap();
        let cost = lmsr.cost(shares(10, 10)).unwrap();
        let expected = 10 * SCALE + 100 * LN_2;
        assert!((cost.raw() - expected).abs() < 1_000);
    }

    #[test]
    fn test_cost_is_strictly_increasing_in_each_side() {
        let lmsr = Lmsr::new(fixed(50)).unwrap();
        for base in [0i64, 5, 40, 200] {
            let mut previous_yes = lmsr.cost(shares(base, 20)).unwrap();
            let mut previous_no = lmsr.cost(shares(20, base)).unwrap();
            for step in 1..=20 {
                let next_yes = lmsr.cost(shares(base + step, 20)).unwrap();
                let next_no = lmsr.cost(shares(20, base + step)).unwrap();
                assert!(next_yes > previous_yes);
                assert!(next_no > previous_no);
                previous_yes = next_yes;
                previous_no = next_no;
            }
        }
    }

    #[test]
    fn test_prices_sum_to_one() {
        let lmsr = Lmsr::new(fixed(20)).unwrap();
        let book = shares(35, 10);
        let yes = lmsr.price(book, Side::Yes).unwrap();
        let no = lmsr.price(book, Side::No).unwrap();
        assert!(yes > no);
        assert!((yes.raw() + no.raw() - SCALE).abs() <= 2);

        let balanced = lmsr.price(shares(10, 10), Side::Yes).unwrap();
        assert_eq!(to_bps(balanced), 5_000);
    }

    #[test]
    fn test_buy_cost_bounded_by_amount() {
        // each share pays out at most 1 unit, so cost < amount
        let lmsr = Lmsr::new(fixed(10)).unwrap();
        let cost = lmsr.cost_to_buy(shares(10, 10), Side::Yes, fixed(5)).unwrap();
        assert!(cost.is_positive());
        assert!(cost < fixed(5));
        // ...and above the pre-trade marginal price times the amount
        assert!(cost > Fixed::from_raw(5 * SCALE / 2));
    }

    #[test]
    fn test_buy_then_sell_round_trips() {
        let scale = 1_000_000_000_000;
        let lmsr = Lmsr::new(to_engine(5_000_000, scale).unwrap()).unwrap();
        let book = Shares {
            yes: to_engine(10_200_000, scale).unwrap(),
            no: to_engine(10_200_000, scale).unwrap(),
        };
        let amount = to_engine(1_000_000, scale).unwrap();

        let cost = lmsr.cost_to_buy(book, Side::No, amount).unwrap();
        let after = Shares { yes: book.yes, no: book.no.checked_add(amount).unwrap() };
        let revenue = lmsr.revenue_from_sell(after, Side::No, amount).unwrap();

        assert!((cost.raw() - revenue.raw()).abs() < 1_000);
    }

    #[test]
    fn test_sell_more_than_outstanding_fails() {
        let lmsr = Lmsr::new(fixed(10)).unwrap();
        assert!(lmsr.revenue_from_sell(shares(3, 3), Side::Yes, fixed(4)).is_err());
    }

    #[test]
    fn test_tiny_liquidity_fails_instead_of_wrapping() {
        // q/b far outside the representable range
        let lmsr = Lmsr::new(Fixed::from_raw(1)).unwrap();
        assert!(lmsr.cost(shares(1_000_000_000, 0)).is_err());
    }
}
