// webpify/src/processors/mod.rs
mod codec;
mod converter;
mod walker;

pub use codec::{Codec, ImageCodec};
pub use converter::{ConversionOutcome, ConversionTask};
pub use walker::Coordinator;

