//! Sensor drivers

pub mod pms5003;
pub mod sgp30;

pub use pms5003::Pms5003;
pub use sgp30::Sgp30;
