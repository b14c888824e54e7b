use crate::WorkdayResult;
use async_compression::tokio::bufread::{GzipDecoder, ZstdDecoder};
use std::path::Path;
use tokio::fs::File;
use tokio::io::{AsyncRead, BufReader};
use tokio_util::codec::FramedRead;
use tokio_util::io::StreamReader;

use crate::codec::CharsetDecoder;

/// What we know about a sheet payload before reading it.
#[derive(Debug, Clone)]
pub struct SourceMeta {
    /// e.g. "text/csv; charset=utf-8" or "application/gzip"
    pub content_type: String,
    /// e.g. "gzip", "zstd", or empty
    pub content_encoding: String,
    /// URL path or file name, used for the extension fallback
    pub name_hint: String,
    /// Text encoding of the decompressed bytes
    pub charset: &'static encoding_rs::Encoding,
}

impl Default for SourceMeta {
    fn default() -> Self {
        Self {
            content_type: String::new(),
            content_encoding: String::new(),
            name_hint: String::new(),
            charset: encoding_rs::UTF_8,
        }
    }
}

impl SourceMeta {
    /// Meta from HTTP response headers. The charset comes from the
    /// `charset=` parameter of the content type, UTF-8 when absent or unknown.
    pub fn from_headers(content_type: &str, content_encoding: &str, name_hint: &str) -> Self {
        Self {
            content_type: content_type.to_string(),
            content_encoding: content_encoding.to_string(),
            name_hint: name_hint.to_string(),
            charset: charset_of(content_type).unwrap_or(encoding_rs::UTF_8),
        }
    }

    /// Meta guessed from a file name.
    pub fn from_name(name: &str) -> Self {
        let (content_type, content_encoding) = match name.rsplit('.').next() {
            Some("gz") => ("application/gzip", "gzip"),
            Some("zst") => ("application/zstd", "zstd"),
            _ => ("text/csv", ""),
        };
        Self::from_headers(content_type, content_encoding, name)
    }

    fn is_gzip(&self) -> bool {
        let ce = self.content_encoding.to_ascii_lowercase();
        let ct = media_type(&self.content_type);
        ce.split(',').any(|s| s.trim() == "gzip")
            || matches!(ct.as_str(), "application/gzip" | "application/x-gzip")
            || self.name_hint.ends_with(".gz")
    }

    fn is_zstd(&self) -> bool {
        let ce = self.content_encoding.to_ascii_lowercase();
        ce.split(',').any(|s| s.trim() == "zstd")
            || media_type(&self.content_type) == "application/zstd"
            || self.name_hint.ends_with(".zst")
    }
}

fn media_type(content_type: &str) -> String {
    content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase()
}

fn charset_of(content_type: &str) -> Option<&'static encoding_rs::Encoding> {
    content_type
        .split(';')
        .skip(1)
        .filter_map(|param| param.split_once('='))
        .find(|(key, _)| key.trim().eq_ignore_ascii_case("charset"))
        .and_then(|(_, value)| {
            encoding_rs::Encoding::for_label(value.trim().trim_matches('"').as_bytes())
        })
}

/// Wrap a raw payload with decompression and UTF-8 transcoding as `meta`
/// dictates. The result is ready for [`crate::parse_rows`].
pub fn build_source_reader<R>(raw: R, meta: &SourceMeta) -> impl AsyncRead + Unpin + Send
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let buf = BufReader::with_capacity(1 << 16, raw);
    let decompressed: Box<dyn AsyncRead + Unpin + Send> = if meta.is_gzip() {
        Box::new(GzipDecoder::new(buf))
    } else if meta.is_zstd() {
        Box::new(ZstdDecoder::new(buf))
    } else {
        Box::new(buf)
    };

    let text: Box<dyn AsyncRead + Unpin + Send> = if meta.charset == encoding_rs::UTF_8 {
        decompressed
    } else {
        let framed = FramedRead::new(decompressed, CharsetDecoder::new(meta.charset));
        Box::new(StreamReader::new(framed))
    };
    text
}

/// Open a sheet saved on disk; compression is inferred from the extension.
pub async fn reader_from_path(
    path: &Path,
) -> WorkdayResult<(impl AsyncRead + Unpin + Send, SourceMeta)> {
    let file = File::open(path).await?;
    let name = path
        .file_name()
        .and_then(|s| s.to_str())
        .unwrap_or_default();
    let meta = SourceMeta::from_name(name);
    Ok((build_source_reader(file, &meta), meta))
}
