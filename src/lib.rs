#![doc = include_str!("../README.md")]

pub use crate::config::*;
pub use crate::error::Error;
pub use crate::payload::{decode_base64, generate_transaction_id, PayloadMap};
pub use crate::types::*;

pub mod config;
pub mod error;
pub mod payload;
pub mod types;
