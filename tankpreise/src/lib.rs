//! Fuel price collector.
//!
//! Periodically lists the fuel stations around a set of locations via the
//! Tankerkönig API, fetches their current prices and queues them as
//! `tankstellenPreise` time-series entries.

pub mod cache;
pub mod collector;
pub mod config;
pub mod domain;
pub mod entry;
pub mod job;
pub mod sink;
pub mod tankerkoenig;
