use bytes::Bytes;

/// A file part received from a multipart form.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<String>, bytes: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type,
            bytes,
        }
    }

    /// Lowercased extension of the original file name, without the dot.
    pub fn extension(&self) -> Option<String> {
        let (stem, ext) = self.file_name.rsplit_once('.')?;
        if stem.is_empty() || ext.is_empty() {
            return None;
        }
        Some(ext.to_ascii_lowercase())
    }

    pub fn mime(&self) -> &str {
        self.content_type.as_deref().unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_is_lowercased() {
        let f = UploadedFile::new("Jane_Doe.PDF", None, Bytes::new());
        assert_eq!(f.extension().as_deref(), Some("pdf"));
    }

    #[test]
    fn test_extension_missing() {
        assert_eq!(UploadedFile::new("resume", None, Bytes::new()).extension(), None);
        assert_eq!(UploadedFile::new(".bashrc", None, Bytes::new()).extension(), None);
    }
}
