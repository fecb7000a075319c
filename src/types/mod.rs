pub mod canonical;
pub mod location;
pub mod provider;
pub mod rounding;
pub mod sample;
pub mod window;
