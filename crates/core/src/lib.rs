//! modelctl_core - Core library for model settings management
//!
//! This crate provides:
//! - HTTP client for the model settings API
//! - Custom model, model set and plan settings types
//! - Built-in model catalogue
//! - Index-or-name resolution of custom models

pub mod catalog;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod selector;

pub use client::{ApiClient, HttpApiClient};
pub use config::Config;
pub use error::{ApiError, ConfigError};
pub use models::{CustomModel, ModelProvider, ModelSet, PlanSettings};
pub use selector::{select_model, Choice, Selection, SelectionError, SelectionPrompt};
