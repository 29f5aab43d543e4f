//! Outbound ports: capabilities the application requires from the outside
//! world.

pub mod exchange;
