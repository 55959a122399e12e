//! The catalogue of supported storage operations.

use std::fmt;

/// A storage operation exposed by BucketGate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageOperation {
    /// Create a storage container.
    CreateBucket,
    /// Create a directory marker object inside a container.
    CreateDirectory,
    /// Upload a Base64-encoded file into a container.
    UploadFile,
}

impl StorageOperation {
    /// All supported operations.
    pub const ALL: [Self; 3] = [Self::CreateBucket, Self::CreateDirectory, Self::UploadFile];

    /// Canonical operation name, used in routes and logs.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CreateBucket => "create-bucket",
            Self::CreateDirectory => "create-directory",
            Self::UploadFile => "upload-file",
        }
    }

    /// Legacy route name kept for existing clients.
    #[must_use]
    pub fn legacy_name(&self) -> &'static str {
        match self {
            Self::CreateBucket => "crear-bucket",
            Self::CreateDirectory => "crear-directorio",
            Self::UploadFile => "subir-archivo",
        }
    }

    /// Resolve an operation from its canonical or legacy name.
    ///
    /// # Examples
    ///
    /// ```
    /// use bucketgate_core::operations::StorageOperation;
    ///
    /// assert_eq!(StorageOperation::from_name("upload-file"), Some(StorageOperation::UploadFile));
    /// assert_eq!(StorageOperation::from_name("subir-archivo"), Some(StorageOperation::UploadFile));
    /// assert_eq!(StorageOperation::from_name("delete-bucket"), None);
    /// ```
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|op| op.as_str() == name || op.legacy_name() == name)
    }

    /// Fields that must be present and non-empty in the request body.
    #[must_use]
    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            Self::CreateBucket => &["bucket"],
            Self::CreateDirectory => &["bucket", "directorio"],
            Self::UploadFile => &["bucket", "nombreArchivo", "archivoBase64"],
        }
    }
}

impl fmt::Display for StorageOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
