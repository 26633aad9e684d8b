//! ROI Calculator Library
//!
//! This library provides the core of the dealer ROI calculator and its demo
//! request form, independent of any page or browser: the page is reached only
//! through the `FieldSource`, `DisplaySurface`, `ContactForm`, `SubmitControl`,
//! `Notifier` and `MailClient` traits.
//!
//! # Modules
//!
//! - `calculator`: ROI formula engine and its configuration.
//! - `config`: Configuration management.
//! - `display`: Display renderer and currency/percentage formatting.
//! - `errors`: Error handling types.
//! - `fields`: Field reader with per-field defaults.
//! - `lead_client`: Lead intake relay client.
//! - `mail_fallback`: Mailto draft fallback.
//! - `models`: Core data models.
//! - `notifications`: Toast/alert notifications.
//! - `report`: Plain-text ROI report and demo request message.
//! - `submission`: Lead submission pipeline.
//! - `submission_guard`: Single-slot duplicate-submission guard.
//! - `validation`: Contact form validation.

pub mod calculator;
pub mod config;
pub mod display;
pub mod errors;
pub mod fields;
pub mod lead_client;
pub mod mail_fallback;
pub mod models;
pub mod notifications;
pub mod report;
pub mod submission;
pub mod submission_guard;
pub mod validation;
