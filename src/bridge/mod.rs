use crate::constants::{MAX_MESSAGE_SIZE, MIN_USAGE_STATS_SDK};
use crate::monitor;
use crate::platform::UsagePlatform;
use serde::{Deserialize, Serialize};
use std::io::{self, Read, Write};
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};

/// A method call from the embedding application. None of the recognized
/// methods take arguments.
#[derive(Debug, Deserialize)]
pub struct MethodCall {
    pub method: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
#[serde(tag = "type")]
pub enum MethodResponse {
    #[serde(rename = "permission")]
    Permission { granted: bool },
    #[serde(rename = "current_app")]
    CurrentApp { package: Option<String> },
    #[serde(rename = "ack")]
    Ack,
    #[serde(rename = "not_implemented")]
    NotImplemented { method: String },
}

/// Answers method calls by querying the OS usage-stats services.
///
/// Stateless across calls: permission and foreground app are re-read from the
/// OS on every request. Platform failures never reach the caller; they resolve
/// to the safe default for the method in question.
pub struct BridgeHandler {
    platform: Arc<dyn UsagePlatform>,
}

impl BridgeHandler {
    pub fn new(platform: Arc<dyn UsagePlatform>) -> Self {
        Self { platform }
    }

    pub fn handle_call(&self, call: &MethodCall) -> MethodResponse {
        match call.method.as_str() {
            "hasPermission" => MethodResponse::Permission {
                granted: self.has_permission(),
            },
            "requestPermission" => {
                self.request_permission();
                MethodResponse::Ack
            }
            "getCurrentApp" => MethodResponse::CurrentApp {
                package: self.current_app(),
            },
            other => {
                log::warn!("Unrecognized bridge method: {}", other);
                MethodResponse::NotImplemented {
                    method: other.to_string(),
                }
            }
        }
    }

    /// True iff the AppOps registry reports the usage-stats operation as
    /// allowed. Devices below the usage-stats SDK floor read as not granted.
    fn has_permission(&self) -> bool {
        if self.platform.sdk_version() < MIN_USAGE_STATS_SDK {
            return false;
        }
        match self.platform.query_permission_mode() {
            Ok(mode) => mode.is_allowed(),
            Err(e) => {
                log::warn!("Permission-mode query failed: {}", e);
                false
            }
        }
    }

    /// Open the usage-access settings screen. Whether the user grants
    /// anything there is never observed.
    fn request_permission(&self) {
        if let Err(e) = self.platform.launch_usage_settings() {
            log::warn!("Could not open usage-access settings: {}", e);
        }
    }

    fn current_app(&self) -> Option<String> {
        monitor::current_foreground_app(self.platform.as_ref(), now_ms())
    }
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Framed request/response loop between the embedding application and the
/// bridge handler.
///
/// Generic over its transport so tests can speak the framing against
/// in-memory buffers; production wiring uses stdin/stdout.
pub struct BridgeHost<R: Read, W: Write> {
    handler: BridgeHandler,
    reader: R,
    writer: W,
}

impl BridgeHost<io::Stdin, io::Stdout> {
    pub fn new(handler: BridgeHandler) -> Self {
        Self::with_transport(handler, io::stdin(), io::stdout())
    }
}

impl<R: Read, W: Write> BridgeHost<R, W> {
    pub fn with_transport(handler: BridgeHandler, reader: R, writer: W) -> Self {
        Self {
            handler,
            reader,
            writer,
        }
    }

    pub fn run(&mut self) -> io::Result<()> {
        loop {
            let call = self.read_call()?;
            let response = self.handler.handle_call(&call);
            self.write_response(&response)?;
        }
    }

    fn read_call(&mut self) -> io::Result<MethodCall> {
        // Frames are length-prefixed in little-endian byte order.
        let mut len_bytes = [0u8; 4];
        self.reader.read_exact(&mut len_bytes)?;
        let len = u32::from_le_bytes(len_bytes) as usize;

        if len > MAX_MESSAGE_SIZE {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Message too large: {} bytes (max: {} bytes)", len, MAX_MESSAGE_SIZE),
            ));
        }

        let mut buffer = vec![0u8; len];
        self.reader.read_exact(&mut buffer)?;

        serde_json::from_slice(&buffer)
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn write_response(&mut self, response: &MethodResponse) -> io::Result<()> {
        let json = serde_json::to_vec(response)?;
        let len = json.len() as u32;

        self.writer.write_all(&len.to_le_bytes())?;
        self.writer.write_all(&json)?;
        self.writer.flush()?;

        Ok(())
    }
}
