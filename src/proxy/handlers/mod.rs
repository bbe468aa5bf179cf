// Handlers module - API endpoint handlers

pub mod transfer;

pub use transfer::handle_request;
