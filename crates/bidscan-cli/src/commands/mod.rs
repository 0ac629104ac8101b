pub mod auth;
pub mod documents;
pub mod extract;
pub mod ingest;
pub mod section;
