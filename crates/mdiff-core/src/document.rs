//! Loading files into canonical line sequences
//!
//! A [`Document`] keeps the bytes it was loaded from together with the
//! detected encoding and line terminator, so that joining [`Document::lines`]
//! with the terminator and encoding the result reproduces the original bytes.

use encoding_rs::Encoding;
use std::borrow::Cow;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Line terminator convention of a file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineEnding {
    /// `\r\n`
    CrLf,
    /// `\n\r`
    LfCr,
    /// `\n`
    #[default]
    Lf,
    /// `\r`
    Cr,
}

impl LineEnding {
    /// Detect the convention used by `text`.
    ///
    /// Checked in priority order `\r\n`, `\n\r`, `\n`; anything else
    /// (including text without any terminator) is treated as `\r`.
    pub fn detect(text: &str) -> Self {
        if text.contains("\r\n") {
            LineEnding::CrLf
        } else if text.contains("\n\r") {
            LineEnding::LfCr
        } else if text.contains('\n') {
            LineEnding::Lf
        } else {
            LineEnding::Cr
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LineEnding::CrLf => "\r\n",
            LineEnding::LfCr => "\n\r",
            LineEnding::Lf => "\n",
            LineEnding::Cr => "\r",
        }
    }

    /// Short label for titles
    pub fn label(self) -> &'static str {
        match self {
            LineEnding::CrLf => "CRLF",
            LineEnding::LfCr => "LFCR",
            LineEnding::Lf => "LF",
            LineEnding::Cr => "CR",
        }
    }

    /// Split on this terminator as a literal delimiter.
    ///
    /// Text ending with the terminator yields a trailing empty line.
    pub fn split(self, text: &str) -> Vec<String> {
        text.split(self.as_str()).map(str::to_string).collect()
    }

    pub fn join(self, lines: &[String]) -> String {
        lines.join(self.as_str())
    }
}

/// Character encoding a document was decoded from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextEncoding {
    /// Valid UTF-8, passed through unmodified
    Utf8,
    /// A detected legacy charset such as Shift_JIS
    Legacy(&'static Encoding),
    /// Detection was inconclusive: every byte maps to the code point of the
    /// same value, which is lossless in both directions
    Passthrough,
}

impl TextEncoding {
    pub fn name(&self) -> &'static str {
        match self {
            TextEncoding::Utf8 => "UTF-8",
            TextEncoding::Legacy(encoding) => encoding.name(),
            TextEncoding::Passthrough => "binary",
        }
    }

    /// Detect the encoding of `raw` and decode it.
    pub fn detect_and_decode(raw: &[u8]) -> (Self, String) {
        if let Ok(text) = std::str::from_utf8(raw) {
            return (TextEncoding::Utf8, text.to_string());
        }

        let mut detector = chardetng::EncodingDetector::new();
        detector.feed(raw, true);
        let guess = detector.guess(None, false);
        let encoding = TextEncoding::Legacy(guess);

        if let Some(text) = encoding.decode(raw) {
            // Only trust the guess if it survives a round trip
            if encoding.encode(&text).as_deref() == Some(raw) {
                tracing::debug!(charset = guess.name(), "detected legacy charset");
                return (encoding, text);
            }
        }

        tracing::warn!(
            guess = guess.name(),
            "charset detection inconclusive, passing bytes through"
        );
        let text = raw.iter().map(|&b| char::from(b)).collect();
        (TextEncoding::Passthrough, text)
    }

    /// Decode `raw`, returning `None` if it is malformed for this encoding.
    pub fn decode(&self, raw: &[u8]) -> Option<String> {
        match self {
            TextEncoding::Utf8 => std::str::from_utf8(raw).ok().map(str::to_string),
            TextEncoding::Legacy(encoding) => {
                let (text, had_errors) = encoding.decode_without_bom_handling(raw);
                (!had_errors).then(|| text.into_owned())
            }
            TextEncoding::Passthrough => Some(raw.iter().map(|&b| char::from(b)).collect()),
        }
    }

    /// Encode `text`, returning `None` if a character cannot be represented.
    pub fn encode<'a>(&self, text: &'a str) -> Option<Cow<'a, [u8]>> {
        match self {
            TextEncoding::Utf8 => Some(Cow::Borrowed(text.as_bytes())),
            TextEncoding::Legacy(encoding) => {
                let (bytes, used, had_errors) = encoding.encode(text);
                (!had_errors && used == *encoding).then_some(bytes)
            }
            TextEncoding::Passthrough => text
                .chars()
                .map(|c| u8::try_from(u32::from(c)).ok())
                .collect::<Option<Vec<u8>>>()
                .map(Cow::Owned),
        }
    }
}

/// Result of normalizing raw file bytes
#[derive(Debug, Clone)]
pub struct Normalized {
    pub lines: Vec<String>,
    pub encoding: TextEncoding,
    pub line_ending: LineEnding,
}

/// Decode `raw` and split it into canonical lines.
pub fn normalize(raw: &[u8]) -> Normalized {
    let (encoding, text) = TextEncoding::detect_and_decode(raw);
    let line_ending = LineEnding::detect(&text);
    Normalized {
        lines: line_ending.split(&text),
        encoding,
        line_ending,
    }
}

/// One file's state
#[derive(Debug, Clone)]
pub struct Document {
    path: PathBuf,
    raw: Vec<u8>,
    lines: Vec<String>,
    encoding: TextEncoding,
    line_ending: LineEnding,
}

impl Document {
    /// Read and normalize a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let raw = std::fs::read(path).map_err(|source| DocumentError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let doc = Self::from_bytes(path, raw);
        tracing::info!(
            path = %path.display(),
            encoding = doc.encoding.name(),
            line_ending = doc.line_ending.label(),
            lines = doc.lines.len(),
            "loaded document"
        );
        Ok(doc)
    }

    /// Build a document from bytes already in memory
    pub fn from_bytes(path: impl Into<PathBuf>, raw: Vec<u8>) -> Self {
        let Normalized {
            lines,
            encoding,
            line_ending,
        } = normalize(&raw);
        Self {
            path: path.into(),
            raw,
            lines,
            encoding,
            line_ending,
        }
    }

    /// Re-read the file from disk, replacing the cached split
    pub fn reload(&mut self) -> Result<(), DocumentError> {
        *self = Self::load(&self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name for titles, falling back to the full path
    pub fn display_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    pub fn raw(&self) -> &[u8] {
        &self.raw
    }

    /// Canonical lines, including the trailing empty sentinel when the file
    /// ends with a terminator
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Canonical lines without the trailing empty sentinel
    pub fn content_lines(&self) -> &[String] {
        match self.lines.split_last() {
            Some((last, rest)) if last.is_empty() => rest,
            _ => &self.lines,
        }
    }

    pub fn encoding(&self) -> TextEncoding {
        self.encoding
    }

    pub fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn round_trip(raw: &[u8]) -> Vec<u8> {
        let normalized = normalize(raw);
        let text = normalized.line_ending.join(&normalized.lines);
        normalized
            .encoding
            .encode(&text)
            .expect("decoded text should re-encode")
            .into_owned()
    }

    #[test]
    fn test_detect_line_ending_priority() {
        assert_eq!(LineEnding::detect("a\r\nb\nc"), LineEnding::CrLf);
        assert_eq!(LineEnding::detect("a\n\rb"), LineEnding::LfCr);
        assert_eq!(LineEnding::detect("a\nb"), LineEnding::Lf);
        assert_eq!(LineEnding::detect("a\rb"), LineEnding::Cr);
        assert_eq!(LineEnding::detect("no terminator"), LineEnding::Cr);
        assert_eq!(LineEnding::detect(""), LineEnding::Cr);
    }

    #[test]
    fn test_split_is_literal() {
        let lines = LineEnding::CrLf.split("a\r\nb\nc\r\n");
        assert_eq!(lines, vec!["a", "b\nc", ""]);
    }

    #[test]
    fn test_round_trip_utf8_variants() {
        let samples: [&[u8]; 7] = [
            b"a\nb\nc\n",
            b"a\nb\nc",
            b"a\r\nb\r\n",
            b"a\n\rb\n\r",
            b"a\rb\r",
            b"",
            "caf\u{e9}\r\n\u{65e5}\u{672c}\r\n".as_bytes(),
        ];
        for raw in samples {
            assert_eq!(round_trip(raw), raw, "round trip of {:?}", raw);
        }
    }

    #[test]
    fn test_shift_jis_detected_and_round_trips() {
        let text = "日本語のテキストです。\nこんにちは、世界。\n設定ファイルを読み込みました。\n";
        let (raw, _, _) = encoding_rs::SHIFT_JIS.encode(text);
        let raw = raw.into_owned();

        let normalized = normalize(&raw);
        assert_eq!(
            normalized.encoding,
            TextEncoding::Legacy(encoding_rs::SHIFT_JIS)
        );
        assert_eq!(normalized.line_ending, LineEnding::Lf);
        assert_eq!(normalized.lines[1], "こんにちは、世界。");
        assert_eq!(round_trip(&raw), raw);
    }

    #[test]
    fn test_undecodable_bytes_round_trip() {
        let raw = vec![0x41, 0x81, 0xff, 0x0a, 0x00, 0x9d, 0x0a];
        let normalized = normalize(&raw);
        assert_ne!(normalized.encoding, TextEncoding::Utf8);
        assert_eq!(round_trip(&raw), raw);
    }

    #[test]
    fn test_passthrough_encoding() {
        let raw = [0x00u8, 0x7f, 0x80, 0xff];
        let text = TextEncoding::Passthrough.decode(&raw).unwrap();
        assert_eq!(text.chars().count(), 4);
        assert_eq!(
            TextEncoding::Passthrough.encode(&text).unwrap().as_ref(),
            &raw
        );
        // Code points above U+00FF have no byte
        assert!(TextEncoding::Passthrough.encode("\u{3042}").is_none());
    }

    #[test]
    fn test_utf8_passes_through_unmodified() {
        let encoded = TextEncoding::Utf8.encode("\u{3042}").unwrap();
        assert!(matches!(encoded, Cow::Borrowed(_)));
    }

    #[test]
    fn test_content_lines_drop_sentinel() {
        let doc = Document::from_bytes("a.txt", b"a\nb\n".to_vec());
        assert_eq!(doc.lines(), ["a", "b", ""]);
        assert_eq!(doc.content_lines(), ["a", "b"]);

        let doc = Document::from_bytes("b.txt", b"a\nb".to_vec());
        assert_eq!(doc.content_lines(), ["a", "b"]);

        let doc = Document::from_bytes("c.txt", Vec::new());
        assert!(doc.content_lines().is_empty());
    }

    #[test]
    fn test_load_missing_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Document::load(dir.path().join("missing.txt")).unwrap_err();
        assert!(matches!(err, DocumentError::Read { .. }));
    }

    #[test]
    fn test_reload_picks_up_disk_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.txt");
        std::fs::write(&path, "one\n").unwrap();
        let mut doc = Document::load(&path).unwrap();
        assert_eq!(doc.content_lines(), ["one"]);

        std::fs::write(&path, "one\r\ntwo\r\n").unwrap();
        doc.reload().unwrap();
        assert_eq!(doc.content_lines(), ["one", "two"]);
        assert_eq!(doc.line_ending(), LineEnding::CrLf);
        assert_eq!(doc.display_name(), "t.txt");
    }
}
