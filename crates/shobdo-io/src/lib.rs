pub mod clipboard;
pub mod storage;

pub use clipboard::ArboardClipboard;
pub use storage::JsonFileStorage;
