//! Ports Layer
//!
//! Defines the interfaces (traits) for:
//! - Driving Ports (inbound) - resource lookup as the host calls it
//! - Driven Ports (outbound) - classpath enumeration

pub mod inbound;
pub mod outbound;

pub use inbound::ResourceFinder;
pub use outbound::PathEnumerator;
