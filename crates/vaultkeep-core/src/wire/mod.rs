//! Wire protocol for streaming object transfer.
//!
//! Both the server handlers and the client speak the same two-phase frame
//! protocol: one metadata frame carrying the object name, followed by raw
//! data chunk frames until the stream closes.

pub mod frame;

pub use frame::{FrameCodec, TransferFrame, encode_frame};
