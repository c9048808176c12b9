pub mod agent;
pub mod review;
pub mod saved;

pub use agent::*;
pub use review::*;
pub use saved::*;
