pub mod bank;

pub use bank::WordBank;
