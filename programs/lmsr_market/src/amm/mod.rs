//! # Automated Market Maker (AMM) Module
//!
//! This module implements the **Logarithmic Market Scoring Rule** for pricing
//! YES/NO shares in binary prediction markets.
//!
//! ## The LMSR AMM
//!
//! Unlike a constant-product AMM, the LMSR quotes every trade against a
//! convex cost function whose gradient is a probability vector:
//!
//! ```text
//!   ┌────────────────────────────────────────┐
//!   │        Cost  C(q) = b·ln Σ e^(qᵢ/b)    │
//!   │                                         │
//!   │  price  ▲                               │
//!   │   1.0   │                 ╭──────────   │
//!   │         │               ╱               │
//!   │   0.5   │ · · · · · · ╳   small b       │
//!   │         │           ╱     = steep       │
//!   │   0.0   │──────────╯                    │
//!   │         └─────────────────────▶ q_yes   │
//!   └────────────────────────────────────────┘
//! ```
//!
//! Pricing runs in [`fixed_point::Fixed`], an 18-decimal signed fixed-point
//! type, and every conversion to token base units rounds in the pool's favour.

pub mod fixed_point;
pub mod lmsr;

pub use fixed_point::*;
pub use lmsr::*;
