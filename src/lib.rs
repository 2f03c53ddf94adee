//! ODDS APEX — Over/Under 2.5 fair-price model and back/lay advisor.
//!
//! Library crate exposing all modules for use by integration tests
//! and the binary entry point.
//!
//! # Example
//!
//! ```
//! use odds_apex::engine::Calculator;
//! use odds_apex::engine::input::CalculationRequest;
//!
//! let calc = Calculator::default();
//! let request = CalculationRequest {
//!     home_xg: "1.6".into(),
//!     away_xg: "1.1".into(),
//!     live_over: "2.10".into(),
//!     ..CalculationRequest::default()
//! };
//! let insights = calc.calculate(&request).unwrap();
//! assert!(insights.fair.over_probability > 0.0);
//! ```

pub mod config;
pub mod types;
pub mod model;
pub mod strategy;
pub mod engine;
pub mod dashboard;
