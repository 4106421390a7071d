//! High-level operations over a fault-catalogue directory tree. This crate
//! wires the engine pieces (filename codec, sync, coherence diff) to the
//! filesystem; the CLI is a thin shell over these functions.

mod coherence_ops;
mod corpus;
mod headers;
mod io;
mod missing;
mod sync_ops;

pub use coherence_ops::check_coherence;
pub use corpus::{scan, Corpus, VariantGroup};
pub use headers::fix_headers;
pub use io::{load_document, save_document, DocumentError};
pub use missing::{find_missing, generate_missing};
pub use sync_ops::{synchronize_all, synchronize_file, BatchOptions};
