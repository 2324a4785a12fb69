//! Per-transport rule invokers: one for HTTP, one shared between TCP and UDP
//! since the two differ only in the socket type they dial.

pub mod http;
pub mod tcp_udp;
