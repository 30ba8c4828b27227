//! Placeholder protocol use case
//! 占位符替换协议

mod protocol;

pub use protocol::{CaptureError, MarkerReplacement, PlaceholderProtocol};
