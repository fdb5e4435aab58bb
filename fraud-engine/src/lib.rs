//! Fraud/Risk Decision Engine for VaultPay
//!
//! Real-time fraud assessment for consumer transactions and login events.
//!
//! # Architecture
//!
//! - **Assessors**: pure functions scoring one risk dimension each over a
//!   prefetched history snapshot
//! - **Orchestrator**: fetches collaborator data concurrently, runs every
//!   assessor in a fixed order, classifies and records the decision
//! - **Fail-cautious**: collaborator failures yield a conservative review
//!   decision, never an error and never a silent approval
//!
//! # Invariants
//!
//! - Reported risk score is always within 0..=100
//! - Reason order is stable: Amount → Velocity → Location → Device →
//!   Behavioral → Account → Blacklist → Heuristic
//! - Identical context + snapshot ⇒ identical assessment

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod assessors;
pub mod config;
pub mod error;
pub mod geo;
pub mod memory;
pub mod monitor;
pub mod orchestrator;
pub mod recorder;
pub mod repository;
pub mod rules;
pub mod takeover;
pub mod types;

pub use config::RiskConfig;
pub use error::{Error, Result};
pub use monitor::RealTimePatternMonitor;
pub use orchestrator::RiskOrchestrator;
pub use recorder::AssessmentRecorder;
pub use repository::{
    AssessmentStore, BlacklistRepository, HistoryRepository, ProfileRepository,
};
pub use rules::Signal;
pub use takeover::AccountTakeoverDetector;
pub use types::*;
