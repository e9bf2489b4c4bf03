#![no_main]

use libfuzzer_sys::fuzz_target;
use pke_emit::{Scheme, translate};
use pke_ir::Module;

fuzz_target!(|data: &[u8]| {
    // Only valid UTF-8 can be JSON
    if let Ok(s) = std::str::from_utf8(data) {
        // Loading verifies; anything that loads must annotate and translate without panicking
        if let Ok(mut module) = Module::from_json(s) {
            pke_ir::attach_implicit_contexts(&mut module);
            let _ = translate(&module, Scheme::Bgv);
            let _ = translate(&module, Scheme::Ckks);
        }
    }
});
