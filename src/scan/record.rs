use serde::{Deserialize, Serialize};

/// One geo-tagged entry extracted from the dump.
///
/// Every field keeps the raw matched text: `id` is a fixed-length decimal
/// identifier, `created_at` an ISO-8601 timestamp, `lang` a two-letter or
/// locale code and `p1..p4` the corners of the bounding box of the attached
/// place. A record exists only if all five field matches were found
/// contiguously, in this order, with the bounding box last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: String,
    pub text: String,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    pub lang: String,
    pub p1: String,
    pub p2: String,
    pub p3: String,
    pub p4: String,
}
