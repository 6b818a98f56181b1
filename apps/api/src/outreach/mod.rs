// Company contact lookup and cold-outreach rendering.
// Handlers only translate HTTP to calls into `service`; no notification logic lives in the core.

pub mod directory;
pub mod handlers;
pub mod query;
pub mod render;
pub mod resolver;
pub mod service;
pub mod templates;
