pub mod generate;
pub mod journal;
