/// In-process loopback peer.
pub mod loopback;
