//! Typed, validated access to key/value configuration loaded from env files
//! or JSON documents.

pub mod config;

pub use config::{Config, ConfigError, ConfigSource, Fallback, Schema, Settings};
