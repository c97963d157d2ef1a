//! The uploaded file as held by the wizard.

/// An uploaded delimited file, kept in memory for the duration of one
/// import cycle and never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportFile {
    /// Original file name as chosen by the operator.
    pub name: String,
    /// Raw file contents.
    pub bytes: Vec<u8>,
}

impl ImportFile {
    /// Wraps a file name and its contents.
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// The lowercased extension, without the dot.
    pub fn extension(&self) -> Option<String> {
        let (_, ext) = self.name.rsplit_once('.')?;
        if ext.is_empty() {
            None
        } else {
            Some(ext.to_ascii_lowercase())
        }
    }
}
