// Rpc module - HOW NODES TALK
// Tagged wire protocol, outbound call gateway, sequential broadcast

mod broadcast;
mod gateway;
mod protocol;

pub use broadcast::{BroadcastCoordinator, BroadcastReport};
pub use gateway::{Respond, RpcEndpoint, RpcError, RpcGateway};
pub use protocol::{ProtocolError, Request, Response};
