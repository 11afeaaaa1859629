// Data models shared between the import engine and whatever consumes its output
// (review screens, the insert step against the hosted backend).
pub mod models;
