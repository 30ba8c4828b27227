//! Placeholder marker format and the position-independent scan used to find it again.

mod locate;
mod marker;

pub use locate::{byte_offset, locate_first, LocatedRange, Position};
pub use marker::{embed_image, Marker, FAILURE_TEXT, PROGRESS_LABEL};
