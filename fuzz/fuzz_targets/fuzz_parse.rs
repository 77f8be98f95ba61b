#![no_main]

use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(source) = std::str::from_utf8(data) else {
        return;
    };
    let result = js_parser::parse(source);
    // A fatal diagnostic is always the last one and always leaves no program.
    if result.program.is_none() {
        assert!(result.fatal().is_some());
    }
    for err in &result.errors {
        let span = err.span();
        assert!(span.start <= span.end && span.end as usize <= source.len());
    }
});
