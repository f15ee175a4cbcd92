pub mod normalizer;
pub mod relay;
pub mod trigger;

pub use crate::domain::model::{
    ClassifiedRecord, FieldAliases, NormalizedPayload, RawRecord, RecordPatch, RelayResponse,
};
pub use crate::domain::ports::{ObjectStorage, RecordWriter};
pub use crate::utils::error::Result;
