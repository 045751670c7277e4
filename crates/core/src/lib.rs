//! Core library for qiita
//!
//! This crate implements the **Functional Core** of the qiita terminal reader,
//! following the Functional Core - Imperative Shell architectural pattern.
//!
//! # Architecture Overview
//!
//! The project uses a two-crate architecture to enforce separation of concerns:
//!
//! - **`qiita_core`** (this crate): Pure transformation functions and state with zero I/O
//! - **`qiita`**: HTTP, terminal and browser I/O plus task orchestration (the Imperative Shell)
//!
//! ## Functional Core Principles
//!
//! All functions in this crate adhere to these principles:
//!
//! - **Pure functions**: Same input always produces the same output
//! - **No side effects**: No I/O operations, no external state mutations
//! - **Deterministic**: Behavior is predictable and reproducible
//! - **Testable**: Can be tested with simple fixture data, no mocking required
//!
//! # Module Organization
//!
//! - [`qiita`]: Article/User models, request and detail URLs, response decoding
//! - [`error`]: Fetch failure taxonomy
//! - [`generation`]: Tokens used to drop results of superseded operations
//! - [`presenter`]: The article list snapshot and its row queries
//! - [`avatar`]: Avatar image decoding into a terminal-sized thumbnail
//! - [`search`]: Search bar text state
//!
//! # Example Usage
//!
//! ```rust,ignore
//! use qiita_core::presenter::{ListPresenter, ReplacePolicy};
//! use qiita_core::qiita::{decode_articles, Endpoints};
//!
//! let mut presenter = ListPresenter::new(Endpoints::default(), ReplacePolicy::LatestIssued);
//! let generation = presenter.begin_fetch();
//!
//! // Fixture body instead of an HTTP response
//! let body = br#"[{"id": "a1", "title": "Hello", "user": {"id": "u1", "profile_image_url": "http://x/y.png"}}]"#;
//! presenter.apply_fetch(generation, decode_articles(body));
//!
//! assert_eq!(presenter.row_count(), 1);
//! assert_eq!(presenter.select_row(0).as_deref(), Some("https://qiita.com/items/a1"));
//! ```

pub mod avatar;
pub mod error;
pub mod generation;
pub mod presenter;
pub mod qiita;
pub mod search;
