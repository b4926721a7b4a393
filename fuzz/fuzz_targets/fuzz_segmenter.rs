#![no_main]

use libfuzzer_sys::fuzz_target;
use quern::term::segment::segment;

fuzz_target!(|data: &str| {
    // Spans must cover the term exactly: contiguous offsets, and their
    // concatenation reproduces the input
    let spans = segment(data);
    let mut expected_start = 0;
    let mut reconstructed = String::with_capacity(data.len());
    for span in &spans {
        assert_eq!(span.start, expected_start);
        expected_start = span.end;
        reconstructed.push_str(span.text);
    }
    assert_eq!(reconstructed, data);
});
