//! Fetch-and-store adapter: writes image bytes into the document tree.

mod file_name;
mod fs_fetch_store;

pub use fs_fetch_store::FsFetchStore;
