use serde::{Deserialize, Serialize};

use super::id_macro::impl_id;

/// Identity of one editor instance inside the host.
///
/// The host hands out the identifier; it is only compared and logged here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EditorId(String);

impl_id!(EditorId);
