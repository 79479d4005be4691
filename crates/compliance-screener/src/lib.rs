pub mod report;
pub mod rules;
pub mod screens;


pub use report::*;
pub use screens::*;
