//! # Quill CLI
//!
//! Database seeding utilities for Quill development and load testing.
//!
//! This library crate provides the seeding functionality used by the CLI binary.
//!
//! ## Usage
//!
//! ```ignore
//! use quill_cli::seeder::{seed_all, SeedConfig};
//!
//! let config = SeedConfig::new(20).with_posts_per_user(3);
//! seed_all(&pool, &config, &password_hash).await?;
//! ```

pub mod seeder;
