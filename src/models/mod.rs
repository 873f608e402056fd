// src/models/mod.rs

pub mod dashboard;
pub mod menu;
pub mod mood;
pub mod review;
pub mod stock;

pub use dashboard::*;
pub use menu::*;
pub use mood::*;
pub use review::*;
pub use stock::*;
