/// Incremental UTF-8 decoder for a byte stream that arrives in arbitrary reads.
///
/// An incomplete sequence at the end of a read is held back until the next
/// call. Invalid bytes are replaced with U+FFFD.
#[derive(Debug, Default)]
pub struct Utf8Decoder {
    partial: Vec<u8>,
}

impl Utf8Decoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bytes held back from the previous call.
    pub fn pending(&self) -> &[u8] {
        &self.partial
    }

    pub fn decode(&mut self, bytes: &[u8]) -> String {
        let mut data = std::mem::take(&mut self.partial);
        data.extend_from_slice(bytes);

        let mut result = String::with_capacity(data.len());
        let mut rest = data.as_slice();
        loop {
            match std::str::from_utf8(rest) {
                Ok(text) => {
                    result.push_str(text);
                    break;
                }
                Err(err) => {
                    let (valid, after) = rest.split_at(err.valid_up_to());
                    result.push_str(std::str::from_utf8(valid).unwrap_or_default());
                    match err.error_len() {
                        Some(len) => {
                            result.push(char::REPLACEMENT_CHARACTER);
                            rest = &after[len..];
                        }
                        None => {
                            self.partial.extend_from_slice(after);
                            break;
                        }
                    }
                }
            }
        }
        result
    }

    /// Flushes a held back incomplete sequence as U+FFFD, used at end of stream.
    pub fn finish(&mut self) -> Option<char> {
        if self.partial.is_empty() {
            return None;
        }
        self.partial.clear();
        Some(char::REPLACEMENT_CHARACTER)
    }
}
