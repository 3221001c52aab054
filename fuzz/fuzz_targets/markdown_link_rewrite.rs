#![no_main]

use herald_slack::rewrite_markdown_links;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let input = String::from_utf8_lossy(data);
    let rewritten = rewrite_markdown_links(&input);
    if !input.contains("](") {
        assert_eq!(rewritten, input);
    }
});
