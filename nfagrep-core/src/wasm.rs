//! WebAssembly bindings for JavaScript
//!
//! This module provides WASM bindings using wasm-bindgen for use in browsers
//! and Node.js. Enable with the "wasm" feature flag.

#[cfg(feature = "wasm")]
use wasm_bindgen::prelude::*;

#[cfg(feature = "wasm")]
use crate::engine::Pattern;

/// JavaScript-facing pattern wrapper
#[cfg(feature = "wasm")]
#[wasm_bindgen]
pub struct JsPattern {
    pattern: Pattern,
}

#[cfg(feature = "wasm")]
#[wasm_bindgen]
impl JsPattern {
    /// Compile a pattern
    ///
    /// Returns an error string if compilation fails
    #[wasm_bindgen(constructor)]
    pub fn new(pattern: &str) -> Result<JsPattern, JsValue> {
        console_error_panic_hook::set_once();
        match Pattern::new(pattern) {
            Ok(pattern) => Ok(JsPattern { pattern }),
            Err(e) => Err(JsValue::from_str(&e.to_string())),
        }
    }

    /// Check if the pattern occurs anywhere in a line
    #[wasm_bindgen(js_name = isMatch)]
    pub fn is_match(&self, line: &str) -> bool {
        self.pattern.is_match(line)
    }

    /// Split `text` into lines and return the ones containing a match
    #[wasm_bindgen(js_name = matchingLines)]
    pub fn matching_lines(&self, text: &str) -> js_sys::Array {
        let array = js_sys::Array::new();
        for found in self.pattern.matching_lines(text.lines()) {
            array.push(&JsValue::from_str(found.line));
        }
        array
    }

    /// The pattern text
    #[wasm_bindgen(getter)]
    pub fn source(&self) -> String {
        self.pattern.as_str().to_string()
    }
}
