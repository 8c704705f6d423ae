//! Wraps a JSON payload in a callback invocation.

use axum::body::Bytes;

use super::callback::Callback;

/// Comment token that stops content sniffers (Rosetta Flash) from reading
/// the response as anything but JavaScript.
pub const SECURITY_PREFIX: &str = "/**/";

/// Build `[/**/]callback(json);` as a single buffer.
pub fn wrap(callback: &Callback, json: &[u8], extra_security: bool) -> Bytes {
    let prefix = if extra_security { SECURITY_PREFIX } else { "" };
    let name = callback.as_str();

    let mut out = Vec::with_capacity(prefix.len() + name.len() + json.len() + 3);
    out.extend_from_slice(prefix.as_bytes());
    out.extend_from_slice(name.as_bytes());
    out.push(b'(');
    out.extend_from_slice(json);
    out.extend_from_slice(b");");
    Bytes::from(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cb() -> Callback {
        Callback::parse(Some("J50Npi.success")).unwrap()
    }

    #[test]
    fn test_wrap_plain() {
        let out = wrap(&cb(), br#"{"key":"value"}"#, false);
        assert_eq!(&out[..], br#"J50Npi.success({"key":"value"});"#);
        assert_eq!(out.len(), 32);
    }

    #[test]
    fn test_wrap_with_security_prefix() {
        let out = wrap(&cb(), br#"{"key":"value"}"#, true);
        assert_eq!(&out[..], br#"/**/J50Npi.success({"key":"value"});"#);
    }

    #[test]
    fn test_length_counts_bytes() {
        let out = wrap(&cb(), "{\"key\":\"\u{221a}alue\"}".as_bytes(), false);
        assert_eq!(out.len(), 34);
    }
}
