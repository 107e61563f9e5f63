pub mod protocol;
pub mod review;
pub mod snapshot;

pub use protocol::{ButtonType, CaptureRecord, Jurisdiction, Rect, Signature, SignatureKind, Variant};
pub use snapshot::NodeSpec;
