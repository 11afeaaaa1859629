// Import engine configuration module
pub mod settings;
