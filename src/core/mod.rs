//! Pure computation: data types, colouring, escape-time iteration and the
//! interruptible pass renderer. Nothing here spawns threads or holds locks.

pub mod actions;
pub mod colour_table;
pub mod data;
pub mod escape_time;
