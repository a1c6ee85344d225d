//! Request body validation shared by handlers and guards.

pub mod validation;
