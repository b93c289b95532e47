//! Jobline — a LINE chatbot that onboards job seekers and shows job listings.

pub mod bot;
pub mod catalog;
pub mod config;
pub mod conversation;
pub mod error;
pub mod formatter;
pub mod line;
pub mod store;
pub mod webhook;
