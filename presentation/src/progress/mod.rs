//! Live progress output while a debate runs

pub mod presenter;
