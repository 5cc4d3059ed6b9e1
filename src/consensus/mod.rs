//! Consensus module - rule eras, block identity, and merge-mining payloads

mod auxpow;
mod block;
mod networks;
mod overrides;
mod params;
mod resolver;

pub use auxpow::*;
pub use block::*;
pub use networks::*;
pub use overrides::*;
pub use params::*;
pub use resolver::*;
