//! Thin bridge between an embedding application and the OS usage-tracking
//! services: permission checks, a settings-screen launcher, and a windowed
//! foreground-app scan, answered over a framed request/response channel.

pub mod bridge;
pub mod constants;
pub mod error;
pub mod listener;
pub mod monitor;
pub mod platform;
#[cfg(test)]
mod test_utils;

pub use bridge::{BridgeHandler, BridgeHost, MethodCall, MethodResponse};
pub use platform::{NativePlatform, PermissionMode, UsageEvent, UsageEventKind, UsagePlatform};
