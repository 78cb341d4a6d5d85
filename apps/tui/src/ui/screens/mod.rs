pub mod clock;
pub mod help;
