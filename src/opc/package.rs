//! A packaged document unpacked into a scratch directory.
//!
//! The container is extracted once into a unique temporary directory and its
//! members are then read from disk by [`PackURI`]. The scratch directory is
//! owned by [`UnpackedPackage`] and removed when the value is dropped, so every
//! exit path of a caller (success, early return, or `?` propagation) cleans up.

use crate::opc::error::{OpcError, Result};
use crate::opc::packuri::PackURI;
use crate::opc::rel::Relationships;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Physical package extracted to a scratch location.
pub struct UnpackedPackage {
    /// Path of the container this package was unpacked from
    source: PathBuf,
    /// Scratch directory holding the extracted members
    scratch: TempDir,
}

impl UnpackedPackage {
    /// Unpack the container at `path`.
    ///
    /// The scratch directory is created under `scratch_root` when given, else
    /// under the system temporary directory. Its name carries the process id.
    ///
    /// # Errors
    /// Returns an error if the file doesn't exist, isn't a valid ZIP file,
    /// or cannot be extracted.
    pub fn unpack<P: AsRef<Path>>(path: P, scratch_root: Option<&Path>) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(OpcError::PackageNotFound(path.display().to_string()));
        }

        let mut archive = zip::ZipArchive::new(BufReader::new(File::open(path)?))?;
        let scratch = scratch_dir(scratch_root)?;
        archive.extract(scratch.path())?;

        tracing::debug!(
            source = %path.display(),
            scratch = %scratch.path().display(),
            members = archive.len(),
            "unpacked container"
        );

        Ok(Self {
            source: path.to_path_buf(),
            scratch,
        })
    }

    /// Path of the container this package was unpacked from.
    #[inline]
    pub fn source(&self) -> &Path {
        &self.source
    }

    /// Location of a member on disk (whether or not it exists).
    #[inline]
    pub fn member_path(&self, pack_uri: &PackURI) -> PathBuf {
        self.scratch.path().join(pack_uri.membername())
    }

    /// Check if a specific member exists in the package.
    #[inline]
    pub fn contains(&self, pack_uri: &PackURI) -> bool {
        self.member_path(pack_uri).is_file()
    }

    /// Get the binary content of a member.
    pub fn blob_for(&self, pack_uri: &PackURI) -> Result<Vec<u8>> {
        let path = self.member_path(pack_uri);
        if !path.is_file() {
            return Err(OpcError::PartNotFound(pack_uri.to_string()));
        }
        Ok(std::fs::read(path)?)
    }

    /// Get the binary content of a member, or `None` when it is absent.
    pub fn optional_blob_for(&self, pack_uri: &PackURI) -> Result<Option<Vec<u8>>> {
        match self.blob_for(pack_uri) {
            Ok(blob) => Ok(Some(blob)),
            Err(OpcError::PartNotFound(_)) => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Get the parsed relationships of a source part.
    ///
    /// Returns `None` if the source has no relationship file.
    pub fn rels_for(&self, source_uri: &PackURI) -> Result<Option<Relationships>> {
        let rels_uri = source_uri.rels_uri().map_err(OpcError::InvalidPackUri)?;
        self.optional_blob_for(&rels_uri)?
            .map(|xml| Relationships::from_xml(&xml, source_uri.base_uri()))
            .transpose()
    }

    /// List the files of a directory member, sorted by name.
    ///
    /// Returns `None` if the directory does not exist in the package.
    pub fn files_in(&self, dir_uri: &PackURI) -> Result<Option<Vec<String>>> {
        let dir = self.member_path(dir_uri);
        if !dir.is_dir() {
            return Ok(None);
        }

        let mut names = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(Some(names))
    }

    /// Copy a member to `dest`, returning the number of bytes copied.
    pub fn copy_member(&self, pack_uri: &PackURI, dest: &Path) -> Result<u64> {
        let path = self.member_path(pack_uri);
        if !path.is_file() {
            return Err(OpcError::PartNotFound(pack_uri.to_string()));
        }
        Ok(std::fs::copy(path, dest)?)
    }
}

impl std::fmt::Debug for UnpackedPackage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnpackedPackage")
            .field("source", &self.source)
            .field("scratch", &self.scratch.path())
            .finish()
    }
}

fn scratch_dir(scratch_root: Option<&Path>) -> std::io::Result<TempDir> {
    let prefix = format!("pkg-extract-{}-", std::process::id());
    match scratch_root {
        Some(root) => {
            std::fs::create_dir_all(root)?;
            tempfile::Builder::new().prefix(&prefix).tempdir_in(root)
        },
        None => tempfile::Builder::new().prefix(&prefix).tempdir(),
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use std::io::{Cursor, Write};
    use std::path::{Path, PathBuf};
    use zip::ZipWriter;
    use zip::write::SimpleFileOptions;

    /// Build a ZIP container from `(member name, content)` pairs.
    pub fn zip_bytes(members: &[(&str, &[u8])]) -> Vec<u8> {
        let mut zip_data = Vec::new();
        {
            let cursor = Cursor::new(&mut zip_data);
            let mut writer = ZipWriter::new(cursor);
            let options = SimpleFileOptions::default();

            for (name, content) in members {
                writer.start_file(*name, options).unwrap();
                writer.write_all(content).unwrap();
            }

            writer.finish().unwrap();
        }
        zip_data
    }

    /// Write a ZIP container to `dir/name` and return its path.
    pub fn write_zip(dir: &Path, name: &str, members: &[(&str, &[u8])]) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, zip_bytes(members)).unwrap();
        path
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::write_zip;
    use super::*;

    #[test]
    fn test_unpack_and_read_members() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_zip(
            dir.path(),
            "deck.pptx",
            &[
                ("ppt/slides/slide1.xml", b"<p:sld/>"),
                ("ppt/media/image2.png", b"png"),
                ("ppt/media/image1.jpeg", b"jpeg"),
            ],
        );

        let pkg = UnpackedPackage::unpack(&path, None).unwrap();
        let slide = PackURI::new("/ppt/slides/slide1.xml").unwrap();
        assert!(pkg.contains(&slide));
        assert_eq!(pkg.blob_for(&slide).unwrap(), b"<p:sld/>");
        assert!(pkg.rels_for(&slide).unwrap().is_none());

        let media = PackURI::new("/ppt/media").unwrap();
        assert_eq!(
            pkg.files_in(&media).unwrap().unwrap(),
            vec!["image1.jpeg".to_string(), "image2.png".to_string()]
        );

        let missing = PackURI::new("/ppt/notes").unwrap();
        assert!(pkg.files_in(&missing).unwrap().is_none());
    }

    #[test]
    fn test_scratch_removed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let scratch_root = dir.path().join("scratch");
        let path = write_zip(dir.path(), "deck.pptx", &[("a.xml", b"<a/>")]);

        let pkg = UnpackedPackage::unpack(&path, Some(&scratch_root)).unwrap();
        assert_eq!(std::fs::read_dir(&scratch_root).unwrap().count(), 1);
        drop(pkg);
        assert_eq!(std::fs::read_dir(&scratch_root).unwrap().count(), 0);
    }

    #[test]
    fn test_missing_container() {
        let dir = tempfile::tempdir().unwrap();
        let err = UnpackedPackage::unpack(dir.path().join("absent.pptx"), None).unwrap_err();
        assert!(matches!(err, OpcError::PackageNotFound(_)));
    }

    #[test]
    fn test_not_a_zip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pptx");
        std::fs::write(&path, b"definitely not a zip").unwrap();
        let err = UnpackedPackage::unpack(&path, None).unwrap_err();
        assert!(matches!(err, OpcError::ZipError(_)));
    }
}
