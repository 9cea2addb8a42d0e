//! kelly-sim: Kelly criterion betting simulator
//!
//! This library provides the core components for:
//! - Synthetic bookmaker odds with a fixed margin
//! - Value bet injection into each round's market
//! - Kelly criterion value bet detection and stake sizing
//! - Weighted-random round resolution
//! - Bankroll ledger with an injectable audit log
//! - Headless simulation loop with summary analytics and text charts
//! - Logging and metrics

pub mod audit;
pub mod cli;
pub mod config;
pub mod ledger;
pub mod market;
pub mod outcome;
pub mod risk;
pub mod simulation;
pub mod telemetry;
