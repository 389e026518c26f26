// WebAssembly bindings for the calculator widgets
use crate::config::Config;
use crate::fraction;
use crate::sync::{FieldSynchronizer, SyncObserver, SyncUpdate};
use crate::widgets::{self, WidgetKind};
use log::debug;
use serde::Serialize;
use std::num::NonZeroU64;
use wasm_bindgen::prelude::*;

fn to_js_error(e: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&e.to_string())
}

fn to_json<T: Serialize>(value: &T) -> Result<String, JsValue> {
    serde_json::to_string(value)
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize result: {}", e)))
}

/// Forwards each update to a JS callback as a JSON string.
struct JsObserver {
    callback: js_sys::Function,
}

impl SyncObserver for JsObserver {
    fn on_update(&self, update: &SyncUpdate) {
        match serde_json::to_string(update) {
            Ok(json) => {
                if let Err(e) = self.callback.call1(&JsValue::NULL, &JsValue::from_str(&json)) {
                    debug!("subscriber callback failed: {:?}", e);
                }
            }
            Err(e) => debug!("cannot serialize update: {}", e),
        }
    }
}

#[wasm_bindgen]
pub struct CalcWidget {
    sync: FieldSynchronizer,
}

#[wasm_bindgen]
impl CalcWidget {
    /// Create a widget by name ("cooking", "wage", "inches", "percent"),
    /// optionally configured from TOML text.
    #[wasm_bindgen(constructor)]
    pub fn new(kind: &str, config_content: Option<String>) -> Result<CalcWidget, JsValue> {
        let kind: WidgetKind = kind.parse().map_err(to_js_error)?;
        let config = match config_content {
            Some(content) => Config::load_from_str(&content).map_err(to_js_error)?,
            None => Config::empty(),
        };
        let sync = widgets::build(kind, &config).map_err(to_js_error)?;
        Ok(Self { sync })
    }

    /// Apply typed text; returns the update as JSON
    #[wasm_bindgen]
    pub fn edit(&mut self, field_id: &str, raw: &str) -> Result<String, JsValue> {
        let update = self.sync.on_field_edit(field_id, raw).map_err(to_js_error)?;
        to_json(&update)
    }

    #[wasm_bindgen]
    pub fn blur(&mut self, field_id: &str) -> Result<String, JsValue> {
        let update = self.sync.on_field_blur(field_id).map_err(to_js_error)?;
        to_json(&update)
    }

    /// Set an auxiliary parameter from control text; blank text unsets it
    #[wasm_bindgen(js_name = setAux)]
    pub fn set_aux(&mut self, key: &str, raw: &str) -> Result<String, JsValue> {
        to_json(&self.sync.on_aux_text(key, raw))
    }

    #[wasm_bindgen]
    pub fn clear(&mut self) -> Result<String, JsValue> {
        to_json(&self.sync.clear())
    }

    /// Current display map as a JSON object
    #[wasm_bindgen]
    pub fn display(&self) -> Result<String, JsValue> {
        to_json(self.sync.display())
    }

    /// Field descriptions as a JSON array
    #[wasm_bindgen]
    pub fn fields(&self) -> Result<String, JsValue> {
        to_json(&self.sync.field_info())
    }

    /// Call `callback(json)` after every event
    #[wasm_bindgen]
    pub fn subscribe(&mut self, callback: js_sys::Function) {
        self.sync.subscribe(Box::new(JsObserver { callback }));
    }
}

#[wasm_bindgen(js_name = fractionAt)]
pub fn fraction_at(value: f64, denominator: u32) -> Result<String, JsValue> {
    let denominator = NonZeroU64::new(u64::from(denominator))
        .ok_or_else(|| JsValue::from_str("Denominator must be positive"))?;
    fraction::to_fixed_denominator_fraction(value, denominator)
        .map(|f| f.to_string())
        .map_err(to_js_error)
}

#[wasm_bindgen(js_name = reduceDecimal)]
pub fn reduce_decimal(text: &str) -> Result<String, JsValue> {
    fraction::to_reduced_fraction(text)
        .map(|f| f.to_string())
        .map_err(to_js_error)
}

#[wasm_bindgen(js_name = percentToFraction)]
pub fn percent_to_fraction(text: &str) -> Result<String, JsValue> {
    fraction::percent_to_fraction(text)
        .map(|f| f.to_string())
        .map_err(to_js_error)
}
