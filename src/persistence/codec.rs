use crate::domain::{Collection, Item};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Current version of the slot layout
pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("slot content is not a valid item list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("unsupported slot format version {found} (this build reads version {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
}

/// Result of decoding a slot
#[derive(Debug)]
pub struct Decoded {
    pub collection: Collection,
    /// Items dropped because they broke the collection invariants
    pub rejected: Vec<Item>,
    /// Slot used the unversioned bare-array layout
    pub legacy: bool,
}

#[derive(Serialize)]
struct EnvelopeRef<'a> {
    version: u32,
    items: &'a [Item],
}

#[derive(Deserialize)]
struct Envelope {
    version: u32,
    items: Vec<Item>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSlot {
    Versioned(Envelope),
    Legacy(Vec<Item>),
}

/// Serialize a collection into the versioned slot layout
pub fn encode(collection: &Collection) -> Result<String, serde_json::Error> {
    serde_json::to_string(&EnvelopeRef {
        version: FORMAT_VERSION,
        items: collection.items(),
    })
}

/// Parse slot content
///
/// Accepts the versioned envelope, a bare item array, and JSON `null`
/// (an empty list).
pub fn decode(content: &str) -> Result<Decoded, DecodeError> {
    let stored: Option<StoredSlot> = serde_json::from_str(content)?;

    let (items, legacy) = match stored {
        None => (Vec::new(), false),
        Some(StoredSlot::Legacy(items)) => (items, true),
        Some(StoredSlot::Versioned(envelope)) => {
            if envelope.version != FORMAT_VERSION {
                return Err(DecodeError::UnsupportedVersion {
                    found: envelope.version,
                    supported: FORMAT_VERSION,
                });
            }
            (envelope.items, false)
        }
    };

    let (collection, rejected) = Collection::from_items(items);
    Ok(Decoded {
        collection,
        rejected,
        legacy,
    })
}
