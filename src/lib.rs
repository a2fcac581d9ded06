pub mod config;
pub mod fetch;
pub mod infra;
pub mod output;
pub mod parser;
pub mod station;

pub mod gtfs_rt {
    include!(concat!(env!("OUT_DIR"), "/transit_realtime.rs"));
}
