//! JS interop helpers shared by the provider and host bindings.

use js_sys::{Object, Reflect, Uint8Array};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

/// Best-effort human readable message for a thrown or rejected JS value.
///
/// Prefers `Error.message` (what the extension sets on a user rejection), then
/// plain strings, then any `message` property on a non-Error object.
pub fn js_error_message(value: &JsValue) -> String {
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    if let Some(message) = value.as_string() {
        return message;
    }
    if let Ok(message) = Reflect::get(value, &JsValue::from_str("message")) {
        if let Some(message) = message.as_string() {
            return message;
        }
    }
    format!("{value:?}")
}

/// Reads `target[key]`, treating a throwing getter like a missing property.
pub fn get_property(target: &JsValue, key: &str) -> Option<JsValue> {
    Reflect::get(target, &JsValue::from_str(key))
        .ok()
        .filter(|value| !value.is_undefined() && !value.is_null())
}

pub fn get_flag(target: &JsValue, key: &str) -> bool {
    get_property(target, key)
        .and_then(|value| value.as_bool())
        .unwrap_or(false)
}

/// Stringifies a provider public key.
///
/// Phantom hands out `PublicKey` objects whose `toString()` yields the base58
/// address; some providers pass the address as a plain string instead.
pub fn public_key_to_string(value: &JsValue) -> Option<String> {
    if value.is_undefined() || value.is_null() {
        return None;
    }
    let key = match value.as_string() {
        Some(key) => key,
        None => String::from(value.dyn_ref::<Object>()?.to_string()),
    };
    Some(key).filter(|key| !key.is_empty())
}

pub fn uint8_array_to_vec(array: &Uint8Array) -> Vec<u8> {
    let mut vec = vec![0u8; array.length() as usize];
    array.copy_to(&mut vec);
    vec
}

pub fn vec_to_uint8_array(bytes: &[u8]) -> Uint8Array {
    let array = Uint8Array::new_with_length(bytes.len() as u32);
    array.copy_from(bytes);
    array
}
