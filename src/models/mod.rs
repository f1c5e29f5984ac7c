/*!
Data structures for BGP-4 messages as exchanged between two speakers.
*/
pub mod bgp;
pub mod network;

pub use bgp::*;
pub use network::*;
