#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(
    clippy::all,
    clippy::dbg_macro,
    clippy::explicit_into_iter_loop,
    clippy::filter_map_next,
    clippy::flat_map_option,
    clippy::implicit_clone,
    clippy::inefficient_to_string,
    clippy::manual_ok_or,
    clippy::map_flatten,
    clippy::map_unwrap_or,
    clippy::match_same_arms,
    clippy::needless_borrow,
    clippy::needless_continue,
    clippy::semicolon_if_nothing_returned,
    clippy::string_add,
    clippy::todo,
    clippy::unimplemented,
    clippy::unnested_or_patterns,
    future_incompatible,
    nonstandard_style,
    rust_2018_idioms,
    unexpected_cfgs
)]

mod error;
mod explorer;
mod explorer_internal;
mod gateway;
mod info;
mod job;
mod keys;
mod query;
mod redis_gateway;
mod types;

pub use crate::error::BullscopeError;
pub use crate::explorer::Explorer;
pub use crate::gateway::{CollectionKind, StoreCommands, StoreOp, StoreReply};
pub use crate::info::ServerInfo;
pub use crate::job::{Job, JobDetail, JobPage, JobState, StateCounts};
pub use crate::redis_gateway::RedisGateway;
pub use crate::types::{JobQuery, QueryGeneration, SortBy};
