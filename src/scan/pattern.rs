//! The combined field pattern and the record assembly step.

use once_cell::sync::Lazy;
use regex::bytes::Regex;

use super::Record;

// The five field markers. They are combined in a single alternation so that
// one pass over the chunk yields every field occurrence in stream order,
// instead of five separate full-buffer passes.
const ID_PATTERN: &str = r#""id":"(\d{19})","key":"#;
const TEXT_PATTERN: &str = r#""value":\{"text":"(.*?)"\},"doc":\{""#;
const TIME_PATTERN: &str = r#""created_at":"(\d{4}-\d{2}-\d{2}T\d{2}:\d{2}:\d{2}\.\d+Z)""#;
const LANG_PATTERN: &str = r#""lang":"(.*?)""#;
const BBOX_PATTERN: &str = r#""bbox":\[(.*?),(.*?),(.*?),(.*?)\]"#;

// `(?-u)` makes `.` match any byte except `\n`: the dump is not guaranteed to
// be valid UTF-8 and decoding happens at assembly time, per candidate.
static COMBINED: Lazy<Regex> = Lazy::new(|| {
    let pattern = format!(
        "(?-u){}",
        [
            ID_PATTERN,
            TEXT_PATTERN,
            TIME_PATTERN,
            LANG_PATTERN,
            BBOX_PATTERN,
        ]
        .join("|")
    );
    Regex::new(&pattern).unwrap()
});

/// One tagged field occurrence inside a chunk.
///
/// Borrows the matched fragments from the chunk: classification is zero-copy
/// and only the records assembled from a complete group are materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldMatch<'a> {
    Id(&'a [u8]),
    Text(&'a [u8]),
    CreatedAt(&'a [u8]),
    Lang(&'a [u8]),
    Bbox([&'a [u8]; 4]),
}

/// Run the combined pattern once over `chunk` and return every field
/// occurrence as a tagged match, in the order they appear in the stream.
pub fn field_matches(chunk: &[u8]) -> Vec<FieldMatch<'_>> {
    COMBINED
        .captures_iter(chunk)
        .filter_map(|caps| {
            if let Some(m) = caps.get(1) {
                Some(FieldMatch::Id(m.as_bytes()))
            } else if let Some(m) = caps.get(2) {
                Some(FieldMatch::Text(m.as_bytes()))
            } else if let Some(m) = caps.get(3) {
                Some(FieldMatch::CreatedAt(m.as_bytes()))
            } else if let Some(m) = caps.get(4) {
                Some(FieldMatch::Lang(m.as_bytes()))
            } else {
                match [caps.get(5), caps.get(6), caps.get(7), caps.get(8)] {
                    [Some(p1), Some(p2), Some(p3), Some(p4)] => Some(FieldMatch::Bbox([
                        p1.as_bytes(),
                        p2.as_bytes(),
                        p3.as_bytes(),
                        p4.as_bytes(),
                    ])),
                    _ => None,
                }
            }
        })
        .collect()
}

/// Walk the tagged sequence and assemble one [`Record`] for every bounding
/// box immediately preceded by an identifier, a text value, a creation time
/// and a language match, in that order.
///
/// A candidate with any of the four predecessors missing, out of order or not
/// decodable as UTF-8 is skipped silently: partial records are never emitted
/// and the walk continues.
pub fn assemble_records(matches: &[FieldMatch<'_>]) -> Vec<Record> {
    let mut records = Vec::new();
    for (i, m) in matches.iter().enumerate() {
        let FieldMatch::Bbox(corners) = m else {
            continue;
        };
        // an empty first corner means the entry carries no geo metadata
        if corners[0].is_empty() || i < 4 {
            continue;
        }
        if let Some(record) = assemble_one(&matches[i - 4..i], *corners) {
            records.push(record);
        }
    }
    records
}

fn assemble_one(window: &[FieldMatch<'_>], corners: [&[u8]; 4]) -> Option<Record> {
    let &[FieldMatch::Id(id), FieldMatch::Text(text), FieldMatch::CreatedAt(created_at), FieldMatch::Lang(lang)] =
        window
    else {
        return None;
    };
    Some(Record {
        id: decode(id)?,
        text: decode(text)?,
        created_at: decode(created_at)?,
        lang: decode(lang)?,
        p1: decode(corners[0])?,
        p2: decode(corners[1])?,
        p3: decode(corners[2])?,
        p4: decode(corners[3])?,
    })
}

fn decode(raw: &[u8]) -> Option<String> {
    std::str::from_utf8(raw).ok().map(str::to_owned)
}
