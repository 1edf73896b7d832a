//! Content rewriting for file pipelines
//!
//! [`modify`] turns a "text in, text out" function into a pipeline stage.
//! Each [`FileItem`] is decoded with its own encoding, handed to the
//! function, and re-encoded with the result. The function may answer right
//! away or with a future; in the latter case the item is held back until
//! the future settles.
//!
//! # Example
//! ```ignore
//! let stage = modify(|text, _enc| text.replace("@VERSION@", "1.2.0").into());
//! let out: Vec<FileItem> = stage.apply(stream::iter(items)).try_collect().await?;
//! ```

use crate::error::{Error, Result};
use futures::future::{self, BoxFuture, Either, FutureExt, Ready};
use futures::stream::{Stream, StreamExt};
use std::fmt;
use std::future::Future;
use std::path::PathBuf;
use std::str::FromStr;

/// Text encoding of a file item's payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Encoding {
    #[default]
    Utf8,
    Utf16Le,
    Latin1,
    Ascii,
    Hex,
}

impl Encoding {
    pub fn name(self) -> &'static str {
        match self {
            Encoding::Utf8 => "utf8",
            Encoding::Utf16Le => "utf16le",
            Encoding::Latin1 => "latin1",
            Encoding::Ascii => "ascii",
            Encoding::Hex => "hex",
        }
    }

    /// Decode bytes to text. Invalid sequences become U+FFFD.
    pub fn decode(self, bytes: &[u8]) -> String {
        match self {
            Encoding::Utf8 => encoding_rs::UTF_8
                .decode_without_bom_handling(bytes)
                .0
                .into_owned(),
            Encoding::Utf16Le => encoding_rs::UTF_16LE
                .decode_without_bom_handling(bytes)
                .0
                .into_owned(),
            Encoding::Latin1 => bytes.iter().map(|&b| b as char).collect(),
            Encoding::Ascii => bytes.iter().map(|&b| (b & 0x7f) as char).collect(),
            Encoding::Hex => hex::encode(bytes),
        }
    }

    /// Encode text to bytes.
    ///
    /// Fails for characters outside the single-byte range of latin1/ascii
    /// and for text that is not valid hex.
    pub fn encode(self, text: &str) -> Result<Vec<u8>> {
        match self {
            Encoding::Utf8 => Ok(text.as_bytes().to_vec()),
            Encoding::Utf16Le => Ok(text.encode_utf16().flat_map(u16::to_le_bytes).collect()),
            Encoding::Latin1 => single_byte(self, text, 0xff),
            Encoding::Ascii => single_byte(self, text, 0x7f),
            Encoding::Hex => hex::decode(text).map_err(|e| Error::Encoding {
                encoding: self.name(),
                reason: e.to_string(),
            }),
        }
    }
}

fn single_byte(encoding: Encoding, text: &str, max: u32) -> Result<Vec<u8>> {
    text.chars()
        .map(|c| {
            u8::try_from(c as u32)
                .ok()
                .filter(|&b| b as u32 <= max)
                .ok_or_else(|| Error::Encoding {
                    encoding: encoding.name(),
                    reason: format!("character {:?} out of range", c),
                })
        })
        .collect()
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Encoding::Utf8),
            "utf16le" | "utf-16le" | "ucs2" | "ucs-2" => Ok(Encoding::Utf16Le),
            "latin1" | "binary" => Ok(Encoding::Latin1),
            "ascii" => Ok(Encoding::Ascii),
            "hex" => Ok(Encoding::Hex),
            _ => Err(Error::UnknownEncoding(s.to_string())),
        }
    }
}

/// A file travelling through a pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileItem {
    pub path: PathBuf,
    pub contents: Vec<u8>,
    pub encoding: Encoding,
}

impl FileItem {
    /// A UTF-8 file item.
    pub fn new(path: impl Into<PathBuf>, contents: impl Into<Vec<u8>>) -> Self {
        Self {
            path: path.into(),
            contents: contents.into(),
            encoding: Encoding::Utf8,
        }
    }

    pub fn with_encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = encoding;
        self
    }

    /// Contents decoded with the item's encoding.
    pub fn text(&self) -> String {
        self.encoding.decode(&self.contents)
    }
}

/// Result of a rewrite function: new content now, or later.
pub enum Rewritten {
    Ready(String),
    Pending(BoxFuture<'static, anyhow::Result<String>>),
}

impl Rewritten {
    pub fn pending<F>(fut: F) -> Self
    where
        F: Future<Output = anyhow::Result<String>> + Send + 'static,
    {
        Rewritten::Pending(fut.boxed())
    }
}

impl fmt::Debug for Rewritten {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rewritten::Ready(s) => f.debug_tuple("Ready").field(s).finish(),
            Rewritten::Pending(_) => f.write_str("Pending(..)"),
        }
    }
}

impl From<String> for Rewritten {
    fn from(s: String) -> Self {
        Rewritten::Ready(s)
    }
}

impl From<&str> for Rewritten {
    fn from(s: &str) -> Self {
        Rewritten::Ready(s.to_string())
    }
}

/// Future returned by [`Modify::transform`].
pub type ItemFuture = Either<Ready<Result<FileItem>>, BoxFuture<'static, Result<FileItem>>>;

/// Pipeline stage that rewrites file contents. See [`modify`].
pub struct Modify<F> {
    rewrite: F,
}

/// Build a stage from a rewrite function.
pub fn modify<F>(rewrite: F) -> Modify<F>
where
    F: FnMut(String, Encoding) -> Rewritten,
{
    Modify { rewrite }
}

impl<F> Modify<F>
where
    F: FnMut(String, Encoding) -> Rewritten,
{
    /// Rewrite one item.
    ///
    /// The rewrite function runs before this returns. A ready result gives a
    /// future that completes on its first poll.
    pub fn transform(&mut self, item: FileItem) -> ItemFuture {
        let text = item.text();
        match (self.rewrite)(text, item.encoding) {
            Rewritten::Ready(text) => Either::Left(future::ready(replace_contents(item, text))),
            Rewritten::Pending(fut) => Either::Right(
                async move {
                    match fut.await {
                        Ok(text) => replace_contents(item, text),
                        Err(source) => Err(Error::Rewrite {
                            path: item.path,
                            source,
                        }),
                    }
                }
                .boxed(),
            ),
        }
    }

    /// Run the stage over a stream, one output per input, in input order.
    pub fn apply<S>(mut self, input: S) -> impl Stream<Item = Result<FileItem>>
    where
        S: Stream<Item = FileItem>,
    {
        input.then(move |item| self.transform(item))
    }
}

fn replace_contents(mut item: FileItem, text: String) -> Result<FileItem> {
    item.contents = item.encoding.encode(&text)?;
    Ok(item)
}
