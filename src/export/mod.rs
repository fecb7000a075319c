pub mod error;
pub mod locale;
pub mod tabular;
pub mod writer;
