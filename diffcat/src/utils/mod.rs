pub mod errors;
pub mod num;
pub mod pareval;
