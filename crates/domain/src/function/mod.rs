//! Workflow function declarations

mod definition;

pub use definition::{FunctionDefinition, ParameterSchema, ParameterSpec, ParameterType};
