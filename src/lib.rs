pub mod filter;
pub mod harness;
pub mod input;
pub mod lines;
pub mod ondemand;
pub mod output;
