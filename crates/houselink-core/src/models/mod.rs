//! Data models for marketplace entities.
//!
//! This module contains the data structures exchanged with the backend:
//!
//! - `Property`, `PropertyDraft`: listings and their create/update payloads
//! - `User`, `UserDraft`: accounts and profiles
//! - `Bank`, `BankRequest`: bank partners and financing requests
//! - `News`, `NewsType`: news articles and categories
//! - `Settings`: site-wide settings
//! - `Page`, `Envelope`: pagination and the backend's response envelopes

pub mod bank;
pub mod common;
pub mod news;
pub mod property;
pub mod settings;
pub mod user;

pub use bank::{Bank, BankDraft, BankRequest, BankRequestDraft, BankRequestStatus};
pub use common::{Envelope, ListEnvelope, Page, UploadedImage};
pub use news::{News, NewsDraft, NewsType, NewsTypeDraft};
pub use property::{Property, PropertyDraft, PropertyStatus, PropertyType, TransactionType, UnknownVariant};
pub use settings::Settings;
pub use user::{User, UserDraft, UserRole};
