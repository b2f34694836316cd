pub mod capabilities;
pub mod debounce;
pub mod error;
pub mod favorites;
pub mod language;
pub mod library;
pub mod preprocess;
pub mod search;
pub mod session;
pub mod store;
pub mod suggestion;
