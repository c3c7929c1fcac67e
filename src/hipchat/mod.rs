//! HipChat v2 room notifications
//!
//! [`builder`] turns extracted alert fields into a card notification and
//! [`client`] posts it to the room notification endpoint.

pub mod builder;
pub mod client;
pub mod payload;

pub use builder::NotificationBuilder;
pub use client::HipChatClient;
pub use payload::{Activity, Attribute, AttributeValue, Card, Description, Icon, NotificationPayload};
