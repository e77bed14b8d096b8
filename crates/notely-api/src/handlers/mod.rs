//! Handler modules for notely-api.

pub mod auth;
pub mod categories;
pub mod expand;
pub mod notes;
