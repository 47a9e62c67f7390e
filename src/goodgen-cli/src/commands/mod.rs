//! Command handlers for the goodgen CLI

pub mod configure;
pub mod copy_data;
pub mod generate;
