pub mod key_io;
pub mod listeners;
