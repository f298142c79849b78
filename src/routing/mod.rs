//! Orthogonal edge routing
//!
//! Peer edges go through [`direct_route`], then [`resolve_collisions`], then
//! the postprocessing passes in [`simplify`]. Hub-and-spoke edges inside a
//! container go through [`build_channels`] and [`branch_route`] instead.
//! Every function here is pure: it reads its arguments and returns a fresh
//! point list. Nothing in this module knows about scenes or rendering.

pub mod branch;
pub mod channels;
pub mod collision;
pub mod config;
pub mod direct;
pub mod peer;
pub mod simplify;
pub mod types;

pub use branch::branch_route;
pub use channels::{build_channels, row_index, ChannelGrid};
pub use collision::{resolve_collisions, DEFAULT_CLEARANCE, MAX_PATH_POINTS, MAX_RESOLVE_PASSES};
pub use config::RoutingConfig;
pub use direct::direct_route;
pub use peer::route_peer;
pub use simplify::{count_bends, merge_short_segments, simplify};
pub use types::*;
