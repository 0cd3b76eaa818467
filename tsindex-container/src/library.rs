//! The managed directory of resource containers.
//!
//! A container is either open (a directory named after its slug) or closed
//! (a `<slug>.tsrc` zip archive holding the same tree). Both hold
//! `properties.json` at their root.

use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

use crate::error::ContainerError;
use crate::properties::{ContainerProperties, PROPERTIES_FILE, check_path_component};

/// File extension of a closed container.
pub const ARCHIVE_EXTENSION: &str = "tsrc";

/// Directory holding chapter content inside a container.
pub const CONTENT_DIR: &str = "content";

/// An open resource container on disk.
#[derive(Debug, Clone)]
pub struct ResourceContainer {
    pub path: PathBuf,
    pub properties: ContainerProperties,
}

impl ResourceContainer {
    /// Load an open container from `dir`.
    pub fn load(dir: &Path) -> Result<Self, ContainerError> {
        Ok(Self {
            path: dir.to_path_buf(),
            properties: ContainerProperties::read(dir)?,
        })
    }

    pub fn slug(&self) -> String {
        self.properties.slug()
    }

    pub fn content_dir(&self) -> PathBuf {
        self.path.join(CONTENT_DIR)
    }

    /// Chapter slugs in sorted order.
    pub fn chapters(&self) -> Result<Vec<String>, ContainerError> {
        sorted_entries(&self.content_dir(), |p| p.is_dir())
    }

    /// Chunk slugs of one chapter (file stems, sorted).
    pub fn chunks(&self, chapter: &str) -> Result<Vec<String>, ContainerError> {
        let files = sorted_entries(&self.content_dir().join(chapter), |p| p.is_file())?;
        Ok(files
            .into_iter()
            .map(|name| match name.rsplit_once('.') {
                Some((stem, _)) => stem.to_string(),
                None => name,
            })
            .collect())
    }

    /// Text of one chunk, whatever its file extension.
    pub fn read_chunk(&self, chapter: &str, chunk: &str) -> Result<Option<String>, ContainerError> {
        let dir = self.content_dir().join(chapter);
        if !dir.is_dir() {
            return Ok(None);
        }
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.is_file() && path.file_stem().and_then(|s| s.to_str()) == Some(chunk) {
                return Ok(Some(fs::read_to_string(path)?));
            }
        }
        Ok(None)
    }
}

fn sorted_entries(dir: &Path, keep: impl Fn(&Path) -> bool) -> Result<Vec<String>, ContainerError> {
    if !dir.is_dir() {
        return Ok(Vec::new());
    }
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if keep(&path) {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// A root directory of open and closed containers.
#[derive(Debug, Clone)]
pub struct ContainerLibrary {
    root: PathBuf,
}

impl ContainerLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn open_path(&self, slug: &str) -> PathBuf {
        self.root.join(slug)
    }

    pub fn closed_path(&self, slug: &str) -> PathBuf {
        self.root.join(format!("{slug}.{ARCHIVE_EXTENSION}"))
    }

    pub fn is_open(&self, slug: &str) -> bool {
        self.open_path(slug).join(PROPERTIES_FILE).is_file()
    }

    pub fn is_closed(&self, slug: &str) -> bool {
        self.closed_path(slug).is_file()
    }

    /// Whether the container is present in either form.
    pub fn exists(&self, slug: &str) -> bool {
        self.is_open(slug) || self.is_closed(slug)
    }

    /// Slugs of every container in the library.
    pub fn list(&self) -> Result<Vec<String>, ContainerError> {
        let mut slugs = Vec::new();
        if !self.root.is_dir() {
            return Ok(slugs);
        }
        for entry in fs::read_dir(&self.root)? {
            let path = entry?.path();
            let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
                continue;
            };
            if path.is_dir() && path.join(PROPERTIES_FILE).is_file() {
                slugs.push(name.to_string());
            } else if let Some(slug) = name.strip_suffix(&format!(".{ARCHIVE_EXTENSION}")) {
                slugs.push(slug.to_string());
            }
        }
        slugs.sort();
        slugs.dedup();
        Ok(slugs)
    }

    /// Open a container, extracting its archive if it is closed.
    ///
    /// Every slug-taking operation rejects slugs that are not a single
    /// file name, so nothing outside the root is touched.
    pub fn open(&self, slug: &str) -> Result<ResourceContainer, ContainerError> {
        check_path_component("container slug", slug)?;
        let dir = self.open_path(slug);
        if self.is_open(slug) {
            return ResourceContainer::load(&dir);
        }
        let archive_path = self.closed_path(slug);
        if !archive_path.is_file() {
            return Err(ContainerError::not_found(slug));
        }

        if dir.exists() {
            fs::remove_dir_all(&dir)?;
        }
        let mut archive = ZipArchive::new(File::open(&archive_path)?)?;
        archive.extract(&dir)?;
        let container = ResourceContainer::load(&dir)?;
        fs::remove_file(&archive_path)?;
        log::debug!("Opened container {slug}");
        Ok(container)
    }

    /// Close a container into its archive, removing the open directory.
    pub fn close(&self, slug: &str) -> Result<PathBuf, ContainerError> {
        check_path_component("container slug", slug)?;
        let archive_path = self.closed_path(slug);
        if !self.is_open(slug) {
            if archive_path.is_file() {
                return Ok(archive_path);
            }
            return Err(ContainerError::not_found(slug));
        }
        let dir = self.open_path(slug);
        write_archive(&dir, &archive_path)?;
        fs::remove_dir_all(&dir)?;
        log::debug!("Closed container {slug}");
        Ok(archive_path)
    }

    /// Remove both forms of a container. Returns false if neither existed.
    pub fn delete(&self, slug: &str) -> Result<bool, ContainerError> {
        check_path_component("container slug", slug)?;
        let mut removed = false;
        let dir = self.open_path(slug);
        if dir.is_dir() {
            fs::remove_dir_all(&dir)?;
            removed = true;
        }
        let archive = self.closed_path(slug);
        if archive.is_file() {
            fs::remove_file(&archive)?;
            removed = true;
        }
        Ok(removed)
    }

    /// Write a closed copy of a container into `dest_dir`.
    pub fn export_to(&self, slug: &str, dest_dir: &Path) -> Result<PathBuf, ContainerError> {
        check_path_component("container slug", slug)?;
        fs::create_dir_all(dest_dir)?;
        let dest = dest_dir.join(format!("{slug}.{ARCHIVE_EXTENSION}"));
        if self.is_open(slug) {
            write_archive(&self.open_path(slug), &dest)?;
        } else if self.is_closed(slug) {
            fs::copy(self.closed_path(slug), &dest)?;
        } else {
            return Err(ContainerError::not_found(slug));
        }
        Ok(dest)
    }

    /// Read a container's manifest without opening it.
    pub fn load_properties(&self, slug: &str) -> Result<ContainerProperties, ContainerError> {
        check_path_component("container slug", slug)?;
        if self.is_open(slug) {
            return ContainerProperties::read(&self.open_path(slug));
        }
        let archive_path = self.closed_path(slug);
        if !archive_path.is_file() {
            return Err(ContainerError::not_found(slug));
        }
        let mut archive = ZipArchive::new(File::open(&archive_path)?)?;
        let mut entry = archive.by_name(PROPERTIES_FILE)?;
        let mut contents = String::new();
        entry.read_to_string(&mut contents)?;
        ContainerProperties::parse(&contents)
    }

    /// Move a freshly built container directory into the library,
    /// replacing any previous copy.
    pub fn install(&self, staged: &Path) -> Result<ResourceContainer, ContainerError> {
        let slug = ContainerProperties::read(staged)?.slug();
        fs::create_dir_all(&self.root)?;
        self.delete(&slug)?;
        let dir = self.open_path(&slug);
        if fs::rename(staged, &dir).is_err() {
            copy_dir_all(staged, &dir)?;
            fs::remove_dir_all(staged)?;
        }
        ResourceContainer::load(&dir)
    }

    /// Copy an external container directory into the library, replacing any
    /// previous copy. The source is left untouched.
    pub fn import_dir(&self, source: &Path) -> Result<ResourceContainer, ContainerError> {
        let slug = ContainerProperties::read(source)?.slug();
        fs::create_dir_all(&self.root)?;
        self.delete(&slug)?;
        let dir = self.open_path(&slug);
        copy_dir_all(source, &dir)?;
        ResourceContainer::load(&dir)
    }
}

fn copy_dir_all(source: &Path, dest: &Path) -> Result<(), ContainerError> {
    fs::create_dir_all(dest)?;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let target = dest.join(entry.file_name());
        if entry.file_type()?.is_dir() {
            copy_dir_all(&entry.path(), &target)?;
        } else {
            fs::copy(entry.path(), &target)?;
        }
    }
    Ok(())
}

fn write_archive(dir: &Path, archive_path: &Path) -> Result<(), ContainerError> {
    let mut writer = ZipWriter::new(File::create(archive_path)?);
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    add_dir_to_archive(&mut writer, dir, "", options)?;
    writer.finish()?;
    Ok(())
}

fn add_dir_to_archive(
    writer: &mut ZipWriter<File>,
    dir: &Path,
    prefix: &str,
    options: SimpleFileOptions,
) -> Result<(), ContainerError> {
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|e| e.file_name());
    for entry in entries {
        let name = entry.file_name();
        let name = name
            .to_str()
            .ok_or_else(|| ContainerError::invalid(format!("non UTF-8 file name in {}", dir.display())))?;
        let entry_name = format!("{prefix}{name}");
        if entry.file_type()?.is_dir() {
            writer.add_directory(format!("{entry_name}/"), options)?;
            add_dir_to_archive(writer, &entry.path(), &format!("{entry_name}/"), options)?;
        } else {
            writer.start_file(entry_name, options)?;
            writer.write_all(&fs::read(entry.path())?)?;
        }
    }
    Ok(())
}
