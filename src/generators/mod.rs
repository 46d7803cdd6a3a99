// src/generators/mod.rs
pub mod password;

pub use password::{
    generate_batch, generate_password, GeneratorError, PasswordGenerator, MAX_BATCH_SIZE,
};
