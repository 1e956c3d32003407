//! Client for a small social-feed service.
//!
//! The pieces, leaves first: [`session`] keeps the logged-in user,
//! [`client`] talks to the REST backend, [`templates`] and [`view`] turn
//! posts into diffable node trees, [`posts`] and [`users`] render the feed
//! and profile and handle mutations, [`auth`] logs users in and out, and
//! [`pages`] bootstraps a page. [`app::App`] carries all of it explicitly.

pub mod app;
pub mod auth;
pub mod client;
pub mod config;
pub mod core;
pub mod document;
pub mod models;
pub mod pages;
pub mod posts;
pub mod session;
pub mod templates;
pub mod users;
pub mod view;

#[cfg(test)]
mod fake;

pub use app::{App, Outcome, Skip};
pub use client::{FeedApi, HttpClient};
pub use crate::core::errors::ApiError;
pub use document::{Dialogs, Document, RecordingDialogs};
pub use pages::{bootstrap, Page};
pub use session::{FileStorage, MemoryStorage, Session, SessionStorage};
