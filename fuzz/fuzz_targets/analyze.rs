#![no_main]

use libfuzzer_sys::fuzz_target;
use sms2::analysis::Analysis;
use sms2::diagnostics;

fuzz_target!(|data: &[u8]| {
    // Convert bytes to UTF-8 string (ignore invalid UTF-8)
    if let Ok(s) = std::str::from_utf8(data) {
        // Analysis is total: lexing, parsing, and diagnostic collection must
        // never panic, and the tree must stay well-formed.
        let analysis = Analysis::new(s.to_string());
        assert!(analysis.tree().is_well_formed());
        let _ = diagnostics::collect(&analysis);
    }
});
