// Transport module - THE WIRE (abstract)
// Request/response capability keyed by peer identity, plus the
// in-process loopback implementation

mod memory;
mod traits;

pub use memory::MemoryMesh;
pub use traits::{InboundHandler, PeerTransport, TransportError};
