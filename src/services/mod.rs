//! External service integration module
//!
//! This module turns a timer config snapshot into a generation prompt and
//! exchanges it with the external code generation service.

pub mod codegen;
pub mod prompt;

// Re-export main types and functions
pub use codegen::{
    CodeGenerator, GeneratedCode, GenerationError, DEFAULT_ENDPOINT, DEFAULT_MODEL,
    EMPTY_RESPONSE_PLACEHOLDER,
};
pub use prompt::{build_prompt, gl_color};
