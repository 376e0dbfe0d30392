//! Prediction Pool State
//!
//! Each pool is a single yes/no question with its own LMSR book. Share
//! balances live in per-holder [`Position`] accounts; the pool keeps the
//! aggregate supplies, the engine-precision copies of them, and the
//! collateral that backs every outstanding share.
//!
//! ```text
//!   Unresolved ──resolve──▶ awaiting (pending_request = Some)
//!       │                        │
//!       │                  oracle callback
//!       │                        ▼
//!       └──force_resolve──▶ Yes | No | Inconclusive   (terminal)
//! ```

use anchor_lang::prelude::*;
use oracle_gateway::{Outcome, Request};

use crate::amm::{
    mul_div, to_bps, to_engine, to_token_units, Fixed, Lmsr, Rounding, Shares, Side,
};
use crate::constants::{BPS_DENOMINATOR, CREATOR_BONUS_BPS, MAX_PROMPT_LEN, MAX_TITLE_LEN};
use crate::errors::MarketError;
use crate::state::{FeeSchedule, FeeSplit, Position};

/// Individual prediction pool account
///
/// Seeds: ["pool", pool_id.to_le_bytes()]
#[account]
#[derive(InitSpace, Debug, Default)]
pub struct Pool {
    /// Unique pool identifier
    pub id: u64,

    /// Pool creator's address (blocked from trading this pool)
    pub creator: Pubkey,

    /// Example: "Will ETH flip BTC by market cap in 2025?"
    #[max_len(128)]
    pub title: String,

    /// Question sent to the oracle, answered with true or false
    #[max_len(512)]
    pub resolution_prompt: String,

    pub created_at: i64,

    /// Unix timestamp when trading ends
    pub closing_time: i64,

    /// Unix timestamp from which resolution may be requested
    pub resolution_time: i64,

    /// Liquidity parameter in engine precision
    pub b: i128,

    /// Outstanding YES shares in engine precision
    pub n_yes: i128,

    /// Outstanding NO shares in engine precision
    pub n_no: i128,

    /// Outstanding YES shares in token units
    pub total_supply_yes: u64,

    /// Outstanding NO shares in token units
    pub total_supply_no: u64,

    /// Collateral held in the vault on behalf of this pool
    pub collateral: u64,

    pub resolution: Resolution,

    /// Gateway request awaiting an answer, if any
    pub pending_request: Option<u64>,

    /// PDA bump seed
    pub bump: u8,
}

/// Pool settlement state
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug, Default)]
pub enum Resolution {
    #[default]
    Unresolved,
    Yes,
    No,
    /// Collateral is refunded pro-rata across both sides
    Inconclusive,
}

#[derive(AnchorSerialize, AnchorDeserialize, Clone, Debug)]
pub struct CreateBetParams {
    pub title: String,
    pub resolution_prompt: String,
    /// Collateral pulled from the creator, in token units
    pub initial_liquidity: u64,
    /// LMSR `b`, in token units
    pub liquidity_param: u64,
    pub closing_time: i64,
    pub resolution_time: i64,
}

/// Price of a trade before it is applied
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct TradeQuote {
    pub side: Side,
    pub shares: u64,
    /// Collateral entering (buy) or leaving (sell) the pool
    pub gross: u64,
    pub fee: u64,
    /// Total paid by a buyer, or refund received by a seller
    pub settled: u64,
    /// YES price after the trade
    pub yes_price_bps: u64,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TradeReceipt {
    pub quote: TradeQuote,
    pub fees: FeeSplit,
}

impl Pool {
    pub const SEED: &'static [u8] = b"pool";

    /// Sets up a new pool and seeds the creator's position with the
    /// liquidity plus bonus, split evenly between both sides.
    ///
    /// Returns the number of shares credited per side.
    #[allow(clippy::too_many_arguments)]
    pub fn initialize(
        &mut self,
        id: u64,
        creator: Pubkey,
        params: &CreateBetParams,
        creator_position: &mut Position,
        scale: u64,
        now: i64,
        bump: u8,
    ) -> Result<u64> {
        require!(params.initial_liquidity > 0, MarketError::EmptyLiquidity);
        require!(params.liquidity_param > 0, MarketError::InvalidLiquidityParam);
        require!(params.closing_time > now, MarketError::InvalidClosingTime);
        require!(
            params.resolution_time >= params.closing_time,
            MarketError::InvalidResolutionTime
        );
        require!(params.title.len() <= MAX_TITLE_LEN, MarketError::TitleTooLong);
        require!(
            !params.resolution_prompt.trim().is_empty(),
            MarketError::EmptyPrompt
        );
        require!(
            params.resolution_prompt.len() <= MAX_PROMPT_LEN,
            MarketError::PromptTooLong
        );

        let bonus = mul_div(
            params.initial_liquidity as u128,
            CREATOR_BONUS_BPS as u128,
            BPS_DENOMINATOR as u128,
            Rounding::Down,
        )?;
        let per_side = u64::try_from((params.initial_liquidity as u128 + bonus) / 2)
            .map_err(|_| error!(MarketError::MathOverflow))?;

        self.id = id;
        self.creator = creator;
        self.title = params.title.clone();
        self.resolution_prompt = params.resolution_prompt.clone();
        self.created_at = now;
        self.closing_time = params.closing_time;
        self.resolution_time = params.resolution_time;
        self.b = to_engine(params.liquidity_param, scale)?.raw();
        self.collateral = params.initial_liquidity;
        self.resolution = Resolution::Unresolved;
        self.pending_request = None;
        self.bump = bump;
        self.set_supply(Side::Yes, per_side, scale)?;
        self.set_supply(Side::No, per_side, scale)?;

        // the book must be priceable from the start
        self.engine()?.cost(self.shares())?;

        creator_position.yes = per_side;
        creator_position.no = per_side;
        creator_position.blocked = true;

        Ok(per_side)
    }

    pub fn engine(&self) -> Result<Lmsr> {
        Lmsr::new(Fixed::from_raw(self.b))
    }

    pub fn shares(&self) -> Shares {
        Shares {
            yes: Fixed::from_raw(self.n_yes),
            no: Fixed::from_raw(self.n_no),
        }
    }

    pub fn supply(&self, side: Side) -> u64 {
        match side {
            Side::Yes => self.total_supply_yes,
            Side::No => self.total_supply_no,
        }
    }

    /// Updates a side's supply together with its engine-precision copy
    fn set_supply(&mut self, side: Side, supply: u64, scale: u64) -> Result<()> {
        let scaled = to_engine(supply, scale)?.raw();
        match side {
            Side::Yes => {
                self.total_supply_yes = supply;
                self.n_yes = scaled;
            }
            Side::No => {
                self.total_supply_no = supply;
                self.n_no = scaled;
            }
        }
        Ok(())
    }

    fn shares_with(&self, side: Side, supply: u64, scale: u64) -> Result<Shares> {
        let scaled = to_engine(supply, scale)?;
        Ok(match side {
            Side::Yes => Shares { yes: scaled, no: self.shares().no },
            Side::No => Shares { yes: self.shares().yes, no: scaled },
        })
    }

    pub fn price_bps(&self, side: Side) -> Result<u64> {
        Ok(to_bps(self.engine()?.price(self.shares(), side)?))
    }

    pub fn is_trading_open(&self, now: i64) -> bool {
        self.resolution == Resolution::Unresolved && now < self.closing_time
    }

    fn ensure_can_trade(&self, position: &Position, now: i64) -> Result<()> {
        require!(
            self.resolution == Resolution::Unresolved,
            MarketError::AlreadyResolved
        );
        require!(now < self.closing_time, MarketError::TradingClosed);
        require!(position.pool_id == self.id, MarketError::PositionMismatch);
        require!(!position.blocked, MarketError::TraderBlocked);
        Ok(())
    }

    pub fn quote_buy(
        &self,
        side: Side,
        amount: u64,
        scale: u64,
        schedule: FeeSchedule,
    ) -> Result<TradeQuote> {
        require!(amount > 0, MarketError::ZeroAmount);

        let engine = self.engine()?;
        let new_supply = self
            .supply(side)
            .checked_add(amount)
            .ok_or(MarketError::MathOverflow)?;
        let after = self.shares_with(side, new_supply, scale)?;

        let cost = engine.cost_to_buy(self.shares(), side, to_engine(amount, scale)?)?;
        let gross = to_token_units(cost, scale, Rounding::Up)?;
        require!(gross > 0, MarketError::TradeTooSmall);

        let fee = schedule.fee_on(gross)?;
        let settled = gross.checked_add(fee).ok_or(MarketError::MathOverflow)?;

        Ok(TradeQuote {
            side,
            shares: amount,
            gross,
            fee,
            settled,
            yes_price_bps: to_bps(engine.price(after, Side::Yes)?),
        })
    }

    pub fn quote_sell(
        &self,
        side: Side,
        amount: u64,
        scale: u64,
        schedule: FeeSchedule,
    ) -> Result<TradeQuote> {
        require!(amount > 0, MarketError::ZeroAmount);

        let engine = self.engine()?;
        let new_supply = self
            .supply(side)
            .checked_sub(amount)
            .ok_or(MarketError::InsufficientBalance)?;
        let after = self.shares_with(side, new_supply, scale)?;

        let revenue = engine.revenue_from_sell(self.shares(), side, to_engine(amount, scale)?)?;
        let gross = to_token_units(revenue, scale, Rounding::Down)?;
        require!(gross > 0, MarketError::TradeTooSmall);

        let fee = schedule.fee_on(gross)?;
        let settled = gross.checked_sub(fee).ok_or(MarketError::MathOverflow)?;

        Ok(TradeQuote {
            side,
            shares: amount,
            gross,
            fee,
            settled,
            yes_price_bps: to_bps(engine.price(after, Side::Yes)?),
        })
    }

    /// Adds `amount` shares of `side` to `position`; the pool keeps the net
    /// cost and the caller pays `settled`.
    #[allow(clippy::too_many_arguments)]
    pub fn buy(
        &mut self,
        position: &mut Position,
        side: Side,
        amount: u64,
        now: i64,
        scale: u64,
        schedule: FeeSchedule,
        referrer_valid: bool,
    ) -> Result<TradeReceipt> {
        self.ensure_can_trade(position, now)?;

        let quote = self.quote_buy(side, amount, scale, schedule)?;
        let fees = schedule.split(quote.fee, referrer_valid)?;

        self.collateral = self
            .collateral
            .checked_add(quote.gross)
            .ok_or(MarketError::MathOverflow)?;
        self.set_supply(side, self.supply(side) + amount, scale)?;
        position.credit(side, amount)?;

        Ok(TradeReceipt { quote, fees })
    }

    /// Removes `amount` shares of `side` from `position`; the pool releases
    /// the gross revenue and the caller receives `settled`.
    #[allow(clippy::too_many_arguments)]
    pub fn sell(
        &mut self,
        position: &mut Position,
        side: Side,
        amount: u64,
        now: i64,
        scale: u64,
        schedule: FeeSchedule,
        referrer_valid: bool,
    ) -> Result<TradeReceipt> {
        self.ensure_can_trade(position, now)?;
        require!(
            position.balance(side) >= amount,
            MarketError::InsufficientBalance
        );

        let quote = self.quote_sell(side, amount, scale, schedule)?;
        let fees = schedule.split(quote.fee, referrer_valid)?;

        self.collateral = self
            .collateral
            .checked_sub(quote.gross)
            .ok_or(MarketError::InsufficientCollateral)?;
        self.set_supply(side, self.supply(side) - amount, scale)?;
        position.debit(side, amount)?;

        Ok(TradeReceipt { quote, fees })
    }

    /// Gate for submitting a resolution request. A pool with a request in
    /// flight may only be re-submitted once that request has failed.
    pub fn ensure_resolvable(&self, now: i64, prior: Option<&Request>) -> Result<()> {
        require!(
            self.resolution == Resolution::Unresolved,
            MarketError::AlreadyResolved
        );
        require!(now >= self.resolution_time, MarketError::ResolutionTooEarly);

        if let Some(pending) = self.pending_request {
            let prior = prior.ok_or(MarketError::ResolutionInFlight)?;
            require!(
                prior.id == pending && prior.pool_id == self.id,
                MarketError::PriorRequestMismatch
            );
            require!(prior.is_failed(), MarketError::ResolutionInFlight);
        }
        Ok(())
    }

    pub fn mark_awaiting(&mut self, request_id: u64) {
        self.pending_request = Some(request_id);
    }

    /// Applies an oracle answer. `Unknown` leaves the pool untouched.
    pub fn apply_oracle_outcome(&mut self, outcome: Outcome) -> Result<Option<Resolution>> {
        require!(
            self.resolution == Resolution::Unresolved,
            MarketError::AlreadyResolved
        );

        let resolution = match outcome {
            Outcome::Unknown => return Ok(None),
            Outcome::True => Resolution::Yes,
            Outcome::False => Resolution::No,
            Outcome::Inconclusive => Resolution::Inconclusive,
        };
        self.resolution = resolution;
        self.pending_request = None;
        Ok(Some(resolution))
    }

    /// Operator override for a pool whose oracle never answered
    pub fn force_resolve(&mut self, resolution: Resolution, now: i64, grace_secs: i64) -> Result<()> {
        require!(
            resolution != Resolution::Unresolved,
            MarketError::InvalidResolution
        );
        require!(
            self.resolution == Resolution::Unresolved,
            MarketError::AlreadyResolved
        );
        require!(grace_secs > 0, MarketError::FallbackDisabled);

        let deadline = self
            .resolution_time
            .checked_add(grace_secs)
            .ok_or(MarketError::MathOverflow)?;
        require!(now >= deadline, MarketError::FallbackTooEarly);

        self.resolution = resolution;
        self.pending_request = None;
        Ok(())
    }

    /// Pro-rata share of the remaining collateral owed to `position`
    pub fn payout_for(&self, position: &Position) -> Result<u64> {
        let (balance, supply) = match self.resolution {
            Resolution::Unresolved => return err!(MarketError::NotResolved),
            Resolution::Yes => (position.yes as u128, self.total_supply_yes as u128),
            Resolution::No => (position.no as u128, self.total_supply_no as u128),
            Resolution::Inconclusive => (
                position.yes as u128 + position.no as u128,
                self.total_supply_yes as u128 + self.total_supply_no as u128,
            ),
        };
        if balance == 0 || supply == 0 {
            return Ok(0);
        }

        let payout = mul_div(self.collateral as u128, balance, supply, Rounding::Down)?;
        u64::try_from(payout).map_err(|_| error!(MarketError::MathOverflow))
    }

    /// Pays out `position` and retires both of its balances
    pub fn withdraw(&mut self, position: &mut Position, scale: u64) -> Result<u64> {
        require!(position.pool_id == self.id, MarketError::PositionMismatch);
        let payout = self.payout_for(position)?;
        require!(payout > 0, MarketError::NothingToWithdraw);

        self.collateral = self
            .collateral
            .checked_sub(payout)
            .ok_or(MarketError::InsufficientCollateral)?;
        let yes = self
            .total_supply_yes
            .checked_sub(position.yes)
            .ok_or(MarketError::MathOverflow)?;
        let no = self
            .total_supply_no
            .checked_sub(position.no)
            .ok_or(MarketError::MathOverflow)?;
        self.set_supply(Side::Yes, yes, scale)?;
        self.set_supply(Side::No, no, scale)?;

        position.yes = 0;
        position.no = 0;

        Ok(payout)
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use anchor_lang::error::Error;
    use oracle_gateway::RequestStatus;

    /// 6-decimal collateral
    const SCALE: u64 = 1_000_000_000_000;
    const TOKEN: u64 = 1_000_000;
    const NOW: i64 = 1_700_000_000;
    const CLOSE: i64 = NOW + 3_600;
    const RESOLVE: i64 = NOW + 7_200;
    const FEES: FeeSchedule = FeeSchedule {
        fee_bps: 100,
        referral_bps: 2_000,
    };

    fn params() -> CreateBetParams {
        CreateBetParams {
            title: "Will it rain in Lisbon tomorrow?".to_string(),
            resolution_prompt: "Did it rain in Lisbon on 2024-05-01? Answer true or false."
                .to_string(),
            initial_liquidity: 20 * TOKEN,
            liquidity_param: 20 * TOKEN,
            closing_time: CLOSE,
            resolution_time: RESOLVE,
        }
    }

    fn position(pool_id: u64) -> Position {
        Position {
            pool_id,
            holder: Pubkey::new_unique(),
            ..Default::default()
        }
    }

    fn new_pool() -> (Pool, Position) {
        let mut pool = Pool::default();
        let mut creator = position(4);
        pool.initialize(4, creator.holder, &params(), &mut creator, SCALE, NOW, 255)
            .unwrap();
        (pool, creator)
    }

    fn assert_err<T: std::fmt::Debug>(result: Result<T>, expected: MarketError) {
        assert_eq!(result.unwrap_err(), Error::from(expected));
    }

    fn assert_supplies(pool: &Pool, positions: &[&Position]) {
        let yes: u64 = positions.iter().map(|p| p.yes).sum();
        let no: u64 = positions.iter().map(|p| p.no).sum();
        assert_eq!(pool.total_supply_yes, yes);
        assert_eq!(pool.total_supply_no, no);
        assert_eq!(pool.n_yes, pool.total_supply_yes as i128 * SCALE as i128);
        assert_eq!(pool.n_no, pool.total_supply_no as i128 * SCALE as i128);
    }

    #[test]
    fn test_create_seeds_creator_with_bonus() {
        let (pool, creator) = new_pool();

        // 20 * 1.02 / 2 = 10.2 per side
        assert_eq!(pool.total_supply_yes, 10_200_000);
        assert_eq!(pool.total_supply_no, 10_200_000);
        assert_eq!(pool.collateral, 20_000_000);
        assert_eq!(pool.resolution, Resolution::Unresolved);

        assert_eq!(creator.yes, 10_200_000);
        assert_eq!(creator.no, 10_200_000);
        assert!(creator.blocked);
        assert_supplies(&pool, &[&creator]);
        assert_eq!(pool.price_bps(Side::Yes).unwrap(), 5_000);
    }

    #[test]
    fn test_create_validation() {
        let mut creator = position(0);
        let check = |p: CreateBetParams, expected: MarketError| {
            let mut pool = Pool::default();
            let mut creator = position(0);
            assert_err(
                pool.initialize(0, creator.holder, &p, &mut creator, SCALE, NOW, 0),
                expected,
            );
        };

        check(CreateBetParams { initial_liquidity: 0, ..params() }, MarketError::EmptyLiquidity);
        check(CreateBetParams { liquidity_param: 0, ..params() }, MarketError::InvalidLiquidityParam);
        check(CreateBetParams { closing_time: NOW, ..params() }, MarketError::InvalidClosingTime);
        check(
            CreateBetParams { resolution_time: CLOSE - 1, ..params() },
            MarketError::InvalidResolutionTime,
        );
        check(
            CreateBetParams { resolution_prompt: "  ".to_string(), ..params() },
            MarketError::EmptyPrompt,
        );
        check(
            CreateBetParams { resolution_prompt: "x".repeat(MAX_PROMPT_LEN + 1), ..params() },
            MarketError::PromptTooLong,
        );
        check(
            CreateBetParams { title: "x".repeat(MAX_TITLE_LEN + 1), ..params() },
            MarketError::TitleTooLong,
        );

        // closing time equal to resolution time is allowed
        let mut pool = Pool::default();
        let same = CreateBetParams { resolution_time: CLOSE, ..params() };
        assert!(pool
            .initialize(0, creator.holder, &same, &mut creator, SCALE, NOW, 0)
            .is_ok());
    }

    #[test]
    fn test_buy_then_sell_no_round_trips() {
        let (mut pool, creator) = new_pool();
        let mut trader = position(pool.id);
        let before = (pool.total_supply_yes, pool.total_supply_no, pool.collateral, pool.n_no);

        let amount = 100 * TOKEN;
        let bought = pool
            .buy(&mut trader, Side::No, amount, NOW, SCALE, FEES, false)
            .unwrap();
        assert_eq!(trader.no, amount);
        assert!(bought.quote.gross > 0 && bought.quote.gross < amount);
        assert_eq!(bought.quote.settled, bought.quote.gross + bought.quote.fee);
        assert!(bought.quote.yes_price_bps < 5_000);
        assert_supplies(&pool, &[&creator, &trader]);

        let sold = pool
            .sell(&mut trader, Side::No, amount, NOW, SCALE, FEES, false)
            .unwrap();
        assert_eq!(trader.no, 0);
        assert_eq!(sold.quote.settled, sold.quote.gross - sold.quote.fee);
        assert_supplies(&pool, &[&creator, &trader]);

        assert_eq!(pool.total_supply_yes, before.0);
        assert_eq!(pool.total_supply_no, before.1);
        assert_eq!(pool.n_no, before.3);
        // rounding favours the pool by at most one unit per leg
        assert!(pool.collateral >= before.2);
        assert!(pool.collateral - before.2 <= 2);
        assert!(bought.quote.fee + sold.quote.fee > 0);
    }

    #[test]
    fn test_fee_split_routes_to_referrer() {
        let (mut pool, _) = new_pool();
        let mut trader = position(pool.id);

        let with_referrer = pool
            .buy(&mut trader, Side::Yes, 5 * TOKEN, NOW, SCALE, FEES, true)
            .unwrap();
        let fee = with_referrer.quote.fee;
        assert_eq!(with_referrer.fees.referrer + with_referrer.fees.reserve, fee);
        assert_eq!(with_referrer.fees.referrer, fee * 2_000 / 10_000);

        let without = pool
            .sell(&mut trader, Side::Yes, 5 * TOKEN, NOW, SCALE, FEES, false)
            .unwrap();
        assert_eq!(without.fees.referrer, 0);
        assert_eq!(without.fees.reserve, without.quote.fee);
    }

    #[test]
    fn test_quote_matches_trade_without_mutating() {
        let (mut pool, _) = new_pool();
        let mut trader = position(pool.id);

        let quote = pool.quote_buy(Side::Yes, 3 * TOKEN, SCALE, FEES).unwrap();
        assert_eq!(pool.collateral, 20 * TOKEN);

        let receipt = pool
            .buy(&mut trader, Side::Yes, 3 * TOKEN, NOW, SCALE, FEES, false)
            .unwrap();
        assert_eq!(receipt.quote, quote);
        assert_eq!(pool.price_bps(Side::Yes).unwrap(), quote.yes_price_bps);
    }

    #[test]
    fn test_trading_guards() {
        let (mut pool, mut creator) = new_pool();
        let mut trader = position(pool.id);

        assert_err(
            pool.buy(&mut creator, Side::Yes, TOKEN, NOW, SCALE, FEES, false),
            MarketError::TraderBlocked,
        );
        assert_err(
            pool.buy(&mut trader, Side::Yes, 0, NOW, SCALE, FEES, false),
            MarketError::ZeroAmount,
        );
        assert_err(
            pool.sell(&mut trader, Side::No, TOKEN, NOW, SCALE, FEES, false),
            MarketError::InsufficientBalance,
        );
        assert_err(
            pool.buy(&mut trader, Side::Yes, TOKEN, CLOSE, SCALE, FEES, false),
            MarketError::TradingClosed,
        );

        let mut stranger = position(pool.id + 1);
        assert_err(
            pool.buy(&mut stranger, Side::Yes, TOKEN, NOW, SCALE, FEES, false),
            MarketError::PositionMismatch,
        );

        // rejected trades leave the book untouched
        assert_eq!(pool.collateral, 20 * TOKEN);
        assert_eq!(trader.yes, 0);
    }

    #[test]
    fn test_supply_matches_balances_across_trades() {
        let (mut pool, creator) = new_pool();
        let mut alice = position(pool.id);
        let mut bob = position(pool.id);

        let steps: [(bool, Side, u64, bool); 6] = [
            (true, Side::Yes, 7 * TOKEN, true),
            (true, Side::No, 3 * TOKEN, false),
            (false, Side::Yes, 2 * TOKEN, true),
            (true, Side::No, 11 * TOKEN, true),
            (false, Side::No, 3 * TOKEN, false),
            (false, Side::No, 11 * TOKEN, true),
        ];
        for (buy, side, amount, by_alice) in steps {
            let holder = if by_alice { &mut alice } else { &mut bob };
            let receipt = if buy {
                pool.buy(holder, side, amount, NOW, SCALE, FEES, false)
            } else {
                pool.sell(holder, side, amount, NOW, SCALE, FEES, false)
            };
            receipt.unwrap();
            assert_supplies(&pool, &[&creator, &alice, &bob]);
        }
        assert_eq!(alice.yes, 5 * TOKEN);
        assert_eq!(alice.no, 0);
        assert_eq!(bob.no, 0);
    }

    #[test]
    fn test_yes_outcome_pays_yes_holder_only() {
        let (mut pool, mut creator) = new_pool();
        let mut alice = position(pool.id);
        let mut bob = position(pool.id);
        pool.buy(&mut alice, Side::Yes, 10 * TOKEN, NOW, SCALE, FEES, false)
            .unwrap();
        pool.buy(&mut bob, Side::No, 5 * TOKEN, NOW, SCALE, FEES, false)
            .unwrap();

        assert_err(pool.ensure_resolvable(CLOSE, None), MarketError::ResolutionTooEarly);
        pool.ensure_resolvable(RESOLVE, None).unwrap();
        pool.mark_awaiting(7);
        assert_err(pool.ensure_resolvable(RESOLVE, None), MarketError::ResolutionInFlight);

        assert_eq!(
            pool.apply_oracle_outcome(Outcome::True).unwrap(),
            Some(Resolution::Yes)
        );
        assert_eq!(pool.pending_request, None);

        let collateral = pool.collateral;
        let alice_due = pool.payout_for(&alice).unwrap();
        let expected = (collateral as u128 * alice.yes as u128 / pool.total_supply_yes as u128) as u64;
        assert!(alice_due > 0);
        assert_eq!(alice_due, expected);
        assert_eq!(pool.payout_for(&bob).unwrap(), 0);
        assert_err(pool.withdraw(&mut bob, SCALE), MarketError::NothingToWithdraw);

        let creator_due = pool.payout_for(&creator).unwrap();
        assert!(alice_due + creator_due <= collateral);

        assert_eq!(pool.withdraw(&mut alice, SCALE).unwrap(), alice_due);
        assert_eq!((alice.yes, alice.no), (0, 0));
        assert_err(pool.withdraw(&mut alice, SCALE), MarketError::NothingToWithdraw);

        let creator_paid = pool.withdraw(&mut creator, SCALE).unwrap();
        assert!(creator_paid >= creator_due);
        assert_eq!(pool.total_supply_yes, 0);
        assert_eq!(pool.collateral, collateral - alice_due - creator_paid);
        assert_supplies(&pool, &[&creator, &alice, &bob]);
    }

    #[test]
    fn test_oracle_failure_leaves_pool_unresolved() {
        let (mut pool, mut creator) = new_pool();
        pool.ensure_resolvable(RESOLVE, None).unwrap();
        pool.mark_awaiting(3);

        // the gateway records the failure; the pool never hears back
        assert_eq!(pool.resolution, Resolution::Unresolved);
        assert_err(pool.withdraw(&mut creator, SCALE), MarketError::NotResolved);
        assert_err(pool.payout_for(&creator), MarketError::NotResolved);

        let mut prior = Request {
            id: 3,
            pool_id: pool.id,
            status: RequestStatus::Pending,
            ..Default::default()
        };
        assert_err(
            pool.ensure_resolvable(RESOLVE, Some(&prior)),
            MarketError::ResolutionInFlight,
        );

        prior.status = RequestStatus::Failed;
        pool.ensure_resolvable(RESOLVE, Some(&prior)).unwrap();

        let other = Request { id: 2, ..prior.clone() };
        assert_err(
            pool.ensure_resolvable(RESOLVE, Some(&other)),
            MarketError::PriorRequestMismatch,
        );

        // unknown outcomes are ignored
        assert_eq!(pool.apply_oracle_outcome(Outcome::Unknown).unwrap(), None);
        assert_eq!(pool.pending_request, Some(3));
    }

    #[test]
    fn test_resolution_applies_once() {
        let (mut pool, _) = new_pool();
        pool.mark_awaiting(0);
        pool.apply_oracle_outcome(Outcome::False).unwrap();

        assert_err(pool.apply_oracle_outcome(Outcome::True), MarketError::AlreadyResolved);
        assert_err(pool.ensure_resolvable(RESOLVE, None), MarketError::AlreadyResolved);
        assert_err(
            pool.force_resolve(Resolution::Yes, RESOLVE + 10_000, 60),
            MarketError::AlreadyResolved,
        );
        assert_eq!(pool.resolution, Resolution::No);
    }

    #[test]
    fn test_force_resolve_after_grace() {
        let (mut pool, mut creator) = new_pool();
        let mut alice = position(pool.id);
        pool.buy(&mut alice, Side::Yes, 4 * TOKEN, NOW, SCALE, FEES, false)
            .unwrap();
        pool.mark_awaiting(1);

        assert_err(pool.force_resolve(Resolution::Yes, RESOLVE, 0), MarketError::FallbackDisabled);
        assert_err(
            pool.force_resolve(Resolution::Yes, RESOLVE + 59, 60),
            MarketError::FallbackTooEarly,
        );
        assert_err(
            pool.force_resolve(Resolution::Unresolved, RESOLVE + 60, 60),
            MarketError::InvalidResolution,
        );

        pool.force_resolve(Resolution::Inconclusive, RESOLVE + 60, 60)
            .unwrap();
        assert_eq!(pool.pending_request, None);

        // inconclusive refunds across both sides
        let collateral = pool.collateral;
        let total = pool.total_supply_yes as u128 + pool.total_supply_no as u128;
        let alice_due = pool.payout_for(&alice).unwrap();
        assert_eq!(alice_due, (collateral as u128 * 4_000_000 / total) as u64);

        let paid = pool.withdraw(&mut alice, SCALE).unwrap() + pool.withdraw(&mut creator, SCALE).unwrap();
        assert!(paid <= collateral);
        assert_eq!(pool.total_supply_yes + pool.total_supply_no, 0);
    }
}
