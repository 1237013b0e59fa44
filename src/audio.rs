#![allow(missing_docs)]

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use base64::Engine;
use bytes::Bytes;

use crate::error::{GeminiError, Result};

const DATA_URL_SCHEME: &str = "data:";
const BASE64_MARKER: &str = ";base64";

/// Recorded audio that can be read once per request.
#[async_trait]
pub trait AudioSource: Send + Sync {
    /// Declared MIME type, if the producer knows it.
    fn mime_type(&self) -> Option<&str>;

    async fn read_bytes(&self) -> Result<Bytes>;
}

/// Audio already held in memory, e.g. a recorded voice clip.
#[derive(Debug, Clone)]
pub struct AudioBlob {
    data: Bytes,
    mime_type: Option<String>,
}

impl AudioBlob {
    pub fn new<B: Into<Bytes>>(data: B) -> Self {
        Self {
            data: data.into(),
            mime_type: None,
        }
    }

    pub fn with_mime_type<S: Into<String>>(mut self, mime_type: S) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    /// Parses a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(url: &str) -> Result<Self> {
        let rest = url
            .strip_prefix(DATA_URL_SCHEME)
            .ok_or_else(|| GeminiError::audio_read("not a data URL"))?;
        let (header, _) = rest
            .split_once(',')
            .ok_or_else(|| GeminiError::audio_read("data URL has no payload separator"))?;
        let mime = header
            .strip_suffix(BASE64_MARKER)
            .ok_or_else(|| GeminiError::audio_read("data URL payload is not base64"))?;

        let data = base64::engine::general_purpose::STANDARD
            .decode(strip_data_url_prefix(url).trim())
            .map_err(|e| GeminiError::audio_read(format!("invalid base64 payload: {}", e)))?;

        let blob = Self::new(data);
        Ok(if mime.is_empty() {
            blob
        } else {
            blob.with_mime_type(mime)
        })
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

#[async_trait]
impl AudioSource for AudioBlob {
    fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    async fn read_bytes(&self) -> Result<Bytes> {
        Ok(self.data.clone())
    }
}

/// Audio stored on disk. The MIME type is guessed from the extension unless
/// set explicitly.
#[derive(Debug, Clone)]
pub struct AudioFile {
    path: PathBuf,
    mime_type: Option<String>,
}

impl AudioFile {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        let path = path.into();
        let mime_type = mime_type_for_path(&path).map(str::to_string);
        Self { path, mime_type }
    }

    pub fn with_mime_type<S: Into<String>>(mut self, mime_type: S) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl AudioSource for AudioFile {
    fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    async fn read_bytes(&self) -> Result<Bytes> {
        tokio::fs::read(&self.path)
            .await
            .map(Bytes::from)
            .map_err(|e| {
                GeminiError::audio_read(format!("{}: {}", self.path.display(), e))
            })
    }
}

pub fn mime_type_for_path(path: &Path) -> Option<&'static str> {
    let extension = path.extension()?.to_str()?.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "wav" => "audio/wav",
        "mp3" => "audio/mpeg",
        "ogg" | "oga" => "audio/ogg",
        "flac" => "audio/flac",
        "m4a" | "mp4" => "audio/mp4",
        "aac" => "audio/aac",
        "webm" => "audio/webm",
        _ => return None,
    };
    Some(mime)
}

/// Audio in the form the provider accepts as inline data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedAudio {
    pub mime_type: String,
    pub data: String,
}

/// Returns the payload of a data URL, or the input when it has no prefix.
pub fn strip_data_url_prefix(value: &str) -> &str {
    if value.starts_with(DATA_URL_SCHEME) {
        if let Some((_, payload)) = value.split_once(',') {
            return payload;
        }
    }
    value
}

/// Reads `source` and base64-encodes it. `default_mime_type` applies when the
/// source declares no type.
pub async fn encode_audio(
    source: &dyn AudioSource,
    default_mime_type: &str,
) -> Result<EncodedAudio> {
    let bytes = source.read_bytes().await?;
    let mime_type = source
        .mime_type()
        .filter(|m| !m.trim().is_empty())
        .unwrap_or(default_mime_type)
        .to_string();

    Ok(EncodedAudio {
        mime_type,
        data: base64::engine::general_purpose::STANDARD.encode(&bytes),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_encode_blob_with_declared_type() {
        let blob = AudioBlob::new(vec![1u8, 2, 3]).with_mime_type("audio/wav");
        let encoded = encode_audio(&blob, "audio/webm").await.unwrap();
        assert_eq!(encoded.mime_type, "audio/wav");
        assert_eq!(encoded.data, "AQID");
    }

    #[tokio::test]
    async fn test_encode_blob_defaults_mime_type() {
        let blob = AudioBlob::new(Bytes::from_static(b"abc"));
        let encoded = encode_audio(&blob, "audio/webm").await.unwrap();
        assert_eq!(encoded.mime_type, "audio/webm");

        let blob = AudioBlob::new(Bytes::from_static(b"abc")).with_mime_type("");
        let encoded = encode_audio(&blob, "audio/webm").await.unwrap();
        assert_eq!(encoded.mime_type, "audio/webm");
    }

    #[test]
    fn test_from_data_url() {
        let url = "data:audio/ogg;base64,AQID";
        assert_eq!(strip_data_url_prefix(url), "AQID");

        let blob = AudioBlob::from_data_url(url).unwrap();
        assert_eq!(blob.mime_type(), Some("audio/ogg"));
        assert_eq!(blob.len(), 3);

        let untyped = AudioBlob::from_data_url("data:;base64,AQID").unwrap();
        assert_eq!(untyped.mime_type(), None);
    }

    #[test]
    fn test_strip_leaves_plain_payload() {
        assert_eq!(strip_data_url_prefix("AQID"), "AQID");
    }

    #[test]
    fn test_from_data_url_rejects_non_base64() {
        assert!(AudioBlob::from_data_url("data:audio/wav,raw").is_err());
        assert!(AudioBlob::from_data_url("https://example.com/a.wav").is_err());
    }

    #[test]
    fn test_mime_type_for_path() {
        assert_eq!(mime_type_for_path(Path::new("clip.WAV")), Some("audio/wav"));
        assert_eq!(mime_type_for_path(Path::new("song.mp3")), Some("audio/mpeg"));
        assert_eq!(mime_type_for_path(Path::new("notes.txt")), None);
        assert_eq!(mime_type_for_path(Path::new("noext")), None);
    }

    #[tokio::test]
    async fn test_missing_file_is_read_error() {
        let file = AudioFile::new("/definitely/not/here.webm");
        assert_eq!(file.mime_type(), Some("audio/webm"));
        let result = encode_audio(&file, "audio/webm").await;
        assert!(matches!(result, Err(GeminiError::AudioReadError { .. })));
    }
}
