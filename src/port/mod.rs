//! Port definitions (hexagonal boundary traits).

pub mod outbound;
