// bidmesh - P2P sealed-style auction coordination
//
// One authoritative host owns auction state; registered bidders mirror
// what they need for local validation and hear about everything else
// through sequential peer broadcast. The peer network itself is an
// external collaborator behind the transport traits.

pub mod auction;
pub mod directory;
pub mod identity;
pub mod node;
pub mod rpc;
pub mod storage;
pub mod transport;
