pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod results;
pub mod solver;
// cmd and reports are binary modules (declared in main.rs); the library
// surface is everything a host UI needs to drive the optimizer.
