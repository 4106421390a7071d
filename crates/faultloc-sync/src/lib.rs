//! The synchronization engine: given a source-language document and a target
//! variant, produce the merged target with non-text fields copied verbatim
//! and descriptions translated, kept, or corrected.

mod classify;
mod detect;
mod normalize;
mod sync;

pub use classify::is_technical_code;
pub use detect::guess_lang;
pub use normalize::normalize_header;
pub use sync::{synchronize, AlignMode, SyncOptions};
