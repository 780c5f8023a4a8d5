//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - API for filter callers
//! - Driven Ports (outbound) - The remote bit store the filter depends on

pub mod inbound;
pub mod outbound;

pub use inbound::MembershipFilter;
pub use outbound::BitStore;
