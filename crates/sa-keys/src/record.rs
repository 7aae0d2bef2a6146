//! Authorized-key records.

use bytes::{BufMut, Bytes, BytesMut};

/// One authorized-key entry ready to be written out.
///
/// A record is either empty (failed fetch, marker object) or ends with
/// exactly the newline the object already had, or one appended to it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyRecord {
    bytes: Bytes,
}

impl KeyRecord {
    /// A record that contributes nothing to the output.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a record from a fetched object body.
    ///
    /// Appends a newline unless the body already ends with one. An empty
    /// body becomes a single newline, like any other body lacking one.
    pub fn from_body(body: impl Into<Bytes>) -> Self {
        let body = body.into();
        if body.ends_with(b"\n") {
            return Self { bytes: body };
        }

        let mut buf = BytesMut::with_capacity(body.len() + 1);
        buf.put_slice(&body);
        buf.put_u8(b'\n');
        Self {
            bytes: buf.freeze(),
        }
    }

    /// Prefix the record with a `command="..."` option.
    ///
    /// sshd then runs `wrapper` with the key's base name, the bucket and the
    /// full key as arguments instead of the command the client asked for.
    /// The wrapper finds the requested command in `SSH_ORIGINAL_COMMAND`.
    pub fn with_command_header(self, wrapper: &str, bucket: &str, key: &str) -> Self {
        if self.is_empty() {
            return self;
        }

        let header = command_header(wrapper, bucket, key);
        let mut buf = BytesMut::with_capacity(header.len() + self.bytes.len());
        buf.put_slice(header.as_bytes());
        buf.put_slice(&self.bytes);
        Self {
            bytes: buf.freeze(),
        }
    }

    /// The bytes to write.
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Length in bytes.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Whether the record is empty.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Consume the record, returning its bytes.
    pub fn into_bytes(self) -> Bytes {
        self.bytes
    }
}

/// Render the `command="<wrapper> <basename> <bucket> <key>" ` header.
pub fn command_header(wrapper: &str, bucket: &str, key: &str) -> String {
    format!(
        "command=\"{} {} {} {}\" ",
        wrapper,
        key_basename(key),
        bucket,
        key
    )
}

/// Last path element of an object key.
///
/// Trailing slashes are ignored. An empty key yields `"."` and a key made
/// only of slashes yields `"/"`.
pub fn key_basename(key: &str) -> &str {
    if key.is_empty() {
        return ".";
    }

    let trimmed = key.trim_end_matches('/');
    if trimmed.is_empty() {
        return "/";
    }

    match trimmed.rfind('/') {
        Some(idx) => &trimmed[idx + 1..],
        None => trimmed,
    }
}
