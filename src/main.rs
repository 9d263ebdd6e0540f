//! Request/response host for the usage bridge.
//!
//! Runs as a standalone process for the embedding application, speaking
//! length-prefixed JSON frames over stdin/stdout until the peer closes the
//! connection.

use std::sync::Arc;
use usage_bridge_lib::platform::NativePlatform;
use usage_bridge_lib::{BridgeHandler, BridgeHost};

fn main() {
    env_logger::init();

    let platform = Arc::new(NativePlatform::new());
    let handler = BridgeHandler::new(platform);
    let mut host = BridgeHost::new(handler);

    // Read calls and write responses until the connection is closed
    if let Err(e) = host.run() {
        // Only report unexpected errors; EOF is the peer hanging up
        if e.kind() != std::io::ErrorKind::UnexpectedEof {
            eprintln!("Bridge host error: {}", e);
            std::process::exit(1);
        }
    }
}
