use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DownloadError {
    #[error("file name must not be empty")]
    MissingFileName,
    #[error("payload is not convertible to bytes: {0}")]
    InvalidPayload(String),
    #[error("{0} not available")]
    UnsupportedEnvironment(&'static str),
}

impl From<DownloadError> for JsValue {
    fn from(error: DownloadError) -> JsValue {
        js_sys::Error::new(&error.to_string()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn messages_name_the_failure() {
        assert_eq!(
            "file name must not be empty",
            DownloadError::MissingFileName.to_string()
        );
        assert_eq!(
            "payload is not convertible to bytes: got a number",
            DownloadError::InvalidPayload("got a number".to_string()).to_string()
        );
        assert_eq!(
            "object URLs not available",
            DownloadError::UnsupportedEnvironment("object URLs").to_string()
        );
    }
}
