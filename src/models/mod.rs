pub mod entry;
pub mod remote;
