use serde::Deserialize;

/// One feed entry observed by the pipeline.
///
/// Deserialized from a single inbound Kafka message. Read-only once
/// created: an item is either merged into a batch buffer or dispatched
/// as a single update, then discarded.
///
/// Absent JSON fields fall back to their defaults; the upstream producer
/// does not always populate every payload field.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Item {
    /// Publication time as sent by the producer. Opaque to the pipeline.
    #[serde(rename = "time")]
    pub pub_date: String,

    /// Stable content-hash identity. Addresses the stored row on the
    /// update path; never recomputed here.
    pub md5: String,

    pub source_name: String,
    pub parsed: bool,
    pub title: String,
    pub description: String,
    pub full_text: String,

    /// Natural dedup key; unique per logical feed entry.
    pub link: String,

    pub enclosure: String,
    pub category: String,

    /// Set by the producer when this item is a mutation of an already
    /// stored record identified by `md5`, not a new record to insert.
    pub changed: bool,
}
