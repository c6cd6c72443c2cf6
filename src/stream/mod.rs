//! Wire-stream decoding and tool-call reassembly

pub mod assembler;
pub mod decoder;

pub use assembler::ToolCallAssembler;
pub use decoder::SseDecoder;
