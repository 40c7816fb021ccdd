pub mod generate;
pub mod quiz;
