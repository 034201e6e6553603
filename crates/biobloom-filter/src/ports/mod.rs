//! Ports Layer - Trait definitions
//!
//! - Inbound: `MembershipFilter` (driving port)
//! - Outbound: `KeySource`, `ResultSink` (driven ports)

pub mod inbound;
pub mod outbound;

pub use inbound::MembershipFilter;
pub use outbound::{KeySource, ResultSink};
