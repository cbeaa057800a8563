#![allow(dead_code)] // not all tests use all the members

/// Initialize logging for the integration tests.
pub fn setup() {
    let _ = env_logger::Builder::new()
        .filter(None, log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

/// One well-formed dump entry carrying the five field markers in stream
/// order, as the scanner expects to find them.
pub fn entry(id: u64, text: &str, lang: &str, bbox: [&str; 4]) -> String {
    format!(
        r#"{{"id":"{id:019}","key":"k","value":{{"text":"{text}"}},"doc":{{"_id":"{id:019}","created_at":"2023-04-01T10:00:00.000Z","lang":"{lang}","place":{{"bounding_box":{{"bbox":[{},{},{},{}]}}}}}}}}"#,
        bbox[0], bbox[1], bbox[2], bbox[3],
    )
}

/// Overwrite `buffer[at..]` with `content`.
///
/// Panics if the content does not fit: the fixtures are placed at hand-picked
/// offsets and an overflow means the fixture is wrong.
pub fn paste(buffer: &mut [u8], at: usize, content: &str) {
    buffer[at..at + content.len()].copy_from_slice(content.as_bytes());
}
