use js_sys::{ArrayBuffer, Uint8Array};
use wasm_bindgen::{JsCast, JsValue};

use crate::error::DownloadError;

// Strings are taken as UTF-8, buffers and byte arrays are copied out of the
// JS heap. Other typed views are rejected, callers pass the underlying
// buffer instead.
pub(crate) fn bytes_from_js(content: &JsValue) -> Result<Vec<u8>, DownloadError> {
    if let Some(text) = content.as_string() {
        return Ok(text.into_bytes());
    }
    if let Some(array) = content.dyn_ref::<Uint8Array>() {
        return Ok(array.to_vec());
    }
    if let Some(buffer) = content.dyn_ref::<ArrayBuffer>() {
        return Ok(Uint8Array::new(buffer).to_vec());
    }
    Err(DownloadError::InvalidPayload(
        "expected a string, an ArrayBuffer or a Uint8Array".to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn accepts_strings() {
        assert_eq!(
            b"hello".to_vec(),
            bytes_from_js(&JsValue::from_str("hello")).unwrap()
        );
    }

    #[wasm_bindgen_test]
    fn accepts_byte_arrays() {
        let array = Uint8Array::from(&[1u8, 2, 3][..]);
        assert_eq!(vec![1, 2, 3], bytes_from_js(&array.into()).unwrap());
    }

    #[wasm_bindgen_test]
    fn accepts_array_buffers() {
        let buffer = Uint8Array::from(&[4u8, 5][..]).buffer();
        assert_eq!(vec![4, 5], bytes_from_js(&buffer.into()).unwrap());
    }

    #[wasm_bindgen_test]
    fn rejects_other_values() {
        assert!(matches!(
            bytes_from_js(&JsValue::from_f64(42.0)),
            Err(DownloadError::InvalidPayload(_))
        ));
        assert!(matches!(
            bytes_from_js(&JsValue::NULL),
            Err(DownloadError::InvalidPayload(_))
        ));
    }
}
