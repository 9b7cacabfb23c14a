//! Core types for the multiview stream viewer: the channel model, the embed
//! provider registry, badge colors, icon/stream collections, config, and the
//! channel-list poller.  No UI dependencies live here.

pub mod badge;
pub mod channel;
pub mod config;
pub mod embed;
pub mod feed;
pub mod platform;
pub mod view;
