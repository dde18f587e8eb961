pub mod adjacency;
pub mod batch;
pub mod bed;
pub mod block;
pub mod config;
pub mod error;
pub mod io;
pub mod liftover;
pub mod merge;
pub mod psl;
pub mod region;
