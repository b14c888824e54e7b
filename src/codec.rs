use bytes::{Buf, BytesMut};
use std::io;
use tokio_util::codec::Decoder;
use tracing::warn;

/// Frames a byte stream in some legacy charset into UTF-8 chunks.
///
/// Malformed input is replaced with U+FFFD rather than failing the run; the
/// first replacement is logged.
pub struct CharsetDecoder {
    inner: encoding_rs::Decoder,
    label: &'static str,
    lossy: bool,
    finished: bool,
}

impl CharsetDecoder {
    pub fn new(encoding: &'static encoding_rs::Encoding) -> Self {
        Self {
            inner: encoding.new_decoder(),
            label: encoding.name(),
            lossy: false,
            finished: false,
        }
    }

    fn convert(&mut self, src: &[u8], last: bool) -> (usize, BytesMut) {
        let capacity = self
            .inner
            .max_utf8_buffer_length(src.len())
            .unwrap_or(src.len() * 3 + 16);
        let mut out = vec![0u8; capacity];
        let (_, read, written, replaced) = self.inner.decode_to_utf8(src, &mut out, last);
        if replaced && !self.lossy {
            self.lossy = true;
            warn!(charset = self.label, "replaced malformed input while decoding");
        }
        out.truncate(written);
        (read, BytesMut::from(&out[..]))
    }
}

impl Decoder for CharsetDecoder {
    type Item = BytesMut;
    type Error = io::Error;

    fn decode(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        if src.is_empty() {
            return Ok(None);
        }
        let (read, chunk) = self.convert(src, false);
        src.advance(read);
        if chunk.is_empty() {
            // Only a partial sequence so far; wait for more bytes.
            return Ok(None);
        }
        Ok(Some(chunk))
    }

    fn decode_eof(&mut self, src: &mut BytesMut) -> Result<Option<Self::Item>, Self::Error> {
        // encoding_rs decoders must not be fed again after the final call.
        if self.finished {
            return Ok(None);
        }
        self.finished = true;
        let (_, chunk) = self.convert(src, true);
        src.clear();
        if chunk.is_empty() {
            Ok(None)
        } else {
            Ok(Some(chunk))
        }
    }
}
