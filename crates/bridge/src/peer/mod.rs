//! Peer system boundary.
//!
//! The peer is the computer on the other end of the IEC bus. It is reached only through the
//! `PeerBus` trait, handed to the scheduler by value so tests can substitute a recording fake:
//! 1. **Trait:** `init`, `tick`, `set_bus`, `bus`, and the two reporting calls.
//! 2. **Native:** The `c64_*` C ABI exported by the peer simulator library.
//! 3. **Loopback:** An in-process wired-AND bus with an idle host, for running without a peer.

/// In-process peer backed by a wired-AND bus.
pub mod loopback;

/// Peer backed by the native `c64_*` library.
pub mod native;

/// The peer bus service trait.
pub mod traits;

pub use loopback::LoopbackPeer;
pub use native::NativePeer;
pub use traits::PeerBus;
