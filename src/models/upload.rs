use serde::Serialize;
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

/// The only two MIME types the backend accepts.
pub const ALLOWED_MIME_TYPES: [&str; 2] = ["text/plain", "application/pdf"];

const PDF_MAGIC: &[u8] = b"%PDF-";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateValidity {
    Success,
    Error,
}

/// A file picked for upload. Exists only while the upload modal is open.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadCandidate {
    pub path: PathBuf,
    pub filename: String,
    pub mime_type: Option<String>,
    pub validity: CandidateValidity,
}

impl UploadCandidate {
    /// Classify a picked file against the allow-list. The MIME type comes
    /// from the extension; PDFs are additionally checked for the `%PDF-`
    /// magic bytes rather than trusting the extension alone.
    pub fn inspect(path: &Path) -> Self {
        let filename = path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_default();

        let mime_type = mime_for_extension(path);
        let validity = match mime_type.as_deref() {
            Some("application/pdf") => {
                if has_pdf_magic(path) {
                    CandidateValidity::Success
                } else {
                    CandidateValidity::Error
                }
            }
            Some(_) => CandidateValidity::Success,
            None => CandidateValidity::Error,
        };

        Self {
            path: path.to_path_buf(),
            filename,
            mime_type,
            validity,
        }
    }

    pub fn is_valid(&self) -> bool {
        self.validity == CandidateValidity::Success
    }
}

pub fn mime_for_extension(path: &Path) -> Option<String> {
    let ext = path.extension()?.to_string_lossy().to_lowercase();
    let mime = match ext.as_str() {
        "txt" => "text/plain",
        "pdf" => "application/pdf",
        _ => return None,
    };
    Some(mime.to_string())
}

fn has_pdf_magic(path: &Path) -> bool {
    let mut header = [0u8; 5];
    match File::open(path).and_then(|mut f| f.read_exact(&mut header)) {
        Ok(()) => header == *PDF_MAGIC,
        Err(_) => false,
    }
}

/// Upload modal state machine: `Closed -> Open -> Submitting -> Closed`.
/// Closing at any point discards the candidate.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Default)]
#[serde(tag = "phase", rename_all = "lowercase")]
pub enum UploadModal {
    #[default]
    Closed,
    Open {
        candidate: Option<UploadCandidate>,
    },
    Submitting {
        candidate: UploadCandidate,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn txt_and_pdf_are_the_only_allowed_types() {
        assert_eq!(
            mime_for_extension(Path::new("notes.txt")).as_deref(),
            Some("text/plain")
        );
        assert_eq!(
            mime_for_extension(Path::new("paper.PDF")).as_deref(),
            Some("application/pdf")
        );
        assert_eq!(mime_for_extension(Path::new("photo.png")), None);
        assert_eq!(mime_for_extension(Path::new("no_extension")), None);
    }

    #[test]
    fn png_candidate_is_marked_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        std::fs::write(&path, b"\x89PNG\r\n").unwrap();

        let candidate = UploadCandidate::inspect(&path);
        assert_eq!(candidate.validity, CandidateValidity::Error);
        assert_eq!(candidate.filename, "photo.png");
    }

    #[test]
    fn pdf_extension_without_magic_bytes_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("fake.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();

        assert_eq!(
            UploadCandidate::inspect(&path).validity,
            CandidateValidity::Error
        );
    }

    #[test]
    fn real_pdf_and_plain_text_are_valid() {
        let dir = tempfile::tempdir().unwrap();

        let pdf = dir.path().join("paper.pdf");
        let mut f = File::create(&pdf).unwrap();
        f.write_all(b"%PDF-1.7 rest of file").unwrap();
        assert!(UploadCandidate::inspect(&pdf).is_valid());

        let txt = dir.path().join("notes.txt");
        std::fs::write(&txt, "hello").unwrap();
        let candidate = UploadCandidate::inspect(&txt);
        assert!(candidate.is_valid());
        assert_eq!(candidate.mime_type.as_deref(), Some("text/plain"));
    }
}
