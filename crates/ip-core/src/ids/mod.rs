//! ID type wrappers for type safety.

mod id_macro;

pub mod editor_id;
pub mod paste_id;

pub use editor_id::EditorId;
pub use paste_id::{PasteId, PASTE_ID_LEN};
