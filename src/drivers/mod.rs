//! Hardware drivers.
//!
//! `signal` turns a light state into timed port writes; `parport` owns
//! the parallel-port data register those writes land on.

pub mod parport;
pub mod signal;
