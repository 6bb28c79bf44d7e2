//! In-process publish/subscribe transport.
//!
//! Delivers set-point messages to subscribers by topic name. Callbacks run on
//! the publishing thread, so a subscriber sees messages at arbitrary times
//! relative to the simulation clock.

pub mod error;
pub mod msgs;
pub mod node;
pub mod topic;

pub use error::{TransportError, TransportResult};
pub use msgs::Double;
pub use node::{Node, Publisher};
pub use topic::{is_valid_topic, normalize_topic};
