pub mod aarch64;
pub mod abi;
pub mod classification;
pub mod target_lowering;
