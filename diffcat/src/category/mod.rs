pub mod arrow;
pub mod cartesian;
pub mod differential;
pub mod traits;
