//! Main module for bbtext library functionality

pub mod config;
pub mod detection;
pub mod document;
pub mod editing;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod pipeline;
pub mod serializing;
pub mod styling;
pub mod testing;
pub mod token;
