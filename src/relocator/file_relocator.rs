use crate::config::RelocateConfig;
use crate::error::{AutoTasksError, Result};
use crate::relocator::image_filter::ImageFilter;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, warn};
use walkdir::WalkDir;

/// A direct child of the source directory selected for moving.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileEntry {
    pub path: PathBuf,
    pub name: String,
}

impl FileEntry {
    pub fn new(path: PathBuf) -> Self {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();

        Self { path, name }
    }
}

#[derive(Debug, Clone)]
pub struct MoveFailure {
    pub name: String,
    pub message: String,
}

#[derive(Debug, Clone)]
pub struct RelocationReport {
    pub destination: PathBuf,
    pub created_destination: bool,
    pub total_candidates: usize,
    pub moved: Vec<FileEntry>,
    pub failures: Vec<MoveFailure>,
    pub current_file: Option<String>,
    pub start_time: Instant,
}

impl RelocationReport {
    fn new(destination: &Path, created_destination: bool, total_candidates: usize) -> Self {
        Self {
            destination: destination.to_path_buf(),
            created_destination,
            total_candidates,
            moved: Vec::new(),
            failures: Vec::new(),
            current_file: None,
            start_time: Instant::now(),
        }
    }

    pub fn moved_count(&self) -> usize {
        self.moved.len()
    }

    pub fn processed(&self) -> usize {
        self.moved.len() + self.failures.len()
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }

    fn record_move(&mut self, entry: FileEntry) {
        self.current_file = Some(entry.name.clone());
        self.moved.push(entry);
    }

    fn record_failure(&mut self, name: String, message: String) {
        self.current_file = Some(name.clone());
        self.failures.push(MoveFailure { name, message });
    }
}

pub struct FileRelocator {
    filter: ImageFilter,
    overwrite: bool,
}

impl FileRelocator {
    pub fn new(config: &RelocateConfig) -> Self {
        Self {
            filter: ImageFilter::new(config),
            overwrite: config.overwrite,
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    /// Move every matching direct child of `source` into `destination`.
    ///
    /// The source directory is checked before anything is created, so a
    /// missing source leaves the filesystem untouched. Individual move
    /// failures are collected in the report and do not stop the batch.
    pub fn relocate(
        &self,
        source: &Path,
        destination: &Path,
        progress_callback: Option<&dyn Fn(&RelocationReport)>,
    ) -> Result<RelocationReport> {
        // An empty path joins onto the working directory
        if source.as_os_str().is_empty() {
            return Err(AutoTasksError::InvalidPath {
                path: "source folder path is empty".to_string(),
            });
        }
        if destination.as_os_str().is_empty() {
            return Err(AutoTasksError::InvalidPath {
                path: "destination folder path is empty".to_string(),
            });
        }

        if !source.exists() {
            return Err(AutoTasksError::missing_path("Source folder", source));
        }

        if !source.is_dir() {
            return Err(AutoTasksError::InvalidPath {
                path: format!("{} is not a directory", source.display()),
            });
        }

        if destination.exists() && !destination.is_dir() {
            return Err(AutoTasksError::InvalidPath {
                path: format!("{} is not a directory", destination.display()),
            });
        }

        let (candidates, scan_failures) = self.scan(source)?;

        let created_destination = !destination.exists();
        if created_destination {
            fs::create_dir_all(destination)?;
            debug!("Created destination folder {}", destination.display());
        }

        let mut report = RelocationReport::new(destination, created_destination, candidates.len());
        report.failures.extend(scan_failures);

        for entry in candidates {
            if let Some(callback) = progress_callback {
                callback(&report);
            }

            match self.move_entry(&entry, destination) {
                Ok(()) => {
                    debug!("Moved {} to {}", entry.path.display(), destination.display());
                    report.record_move(entry);
                }
                Err(e) => {
                    warn!("Failed to move {}: {}", entry.path.display(), e);
                    report.record_failure(entry.name, e.to_string());
                }
            }
        }

        if let Some(callback) = progress_callback {
            callback(&report);
        }

        Ok(report)
    }

    /// List the matching direct children of `source`, sorted by name.
    ///
    /// Unreadable entries come back as failures rather than aborting the scan;
    /// an unreadable source directory is an error.
    pub fn scan(&self, source: &Path) -> Result<(Vec<FileEntry>, Vec<MoveFailure>)> {
        let mut entries = Vec::new();
        let mut failures = Vec::new();

        let walker = WalkDir::new(source)
            .min_depth(1)
            .max_depth(1)
            .follow_links(false)
            .sort_by_file_name();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    if err.depth() == 0 {
                        return Err(AutoTasksError::Io(io::Error::from(err)));
                    }
                    let name = err
                        .path()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "<unknown>".to_string());
                    failures.push(MoveFailure {
                        name,
                        message: err.to_string(),
                    });
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            if self.filter.matches_path(entry.path()) {
                entries.push(FileEntry::new(entry.into_path()));
            }
        }

        debug!(
            "Found {} matching file(s) in {}",
            entries.len(),
            source.display()
        );

        Ok((entries, failures))
    }

    fn move_entry(&self, entry: &FileEntry, destination: &Path) -> io::Result<()> {
        let file_name = entry.path.file_name().ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, "entry has no file name")
        })?;
        let target = destination.join(file_name);

        if !self.overwrite && target.exists() {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", target.display()),
            ));
        }

        match fs::rename(&entry.path, &target) {
            Ok(()) => Ok(()),
            Err(rename_error) => {
                // rename cannot cross filesystems; fall back to copy + delete
                let metadata = match fs::symlink_metadata(&entry.path) {
                    Ok(metadata) => metadata,
                    Err(_) => return Err(rename_error),
                };
                if !metadata.is_file() {
                    return Err(rename_error);
                }

                debug!(
                    "rename of {} failed ({}), copying instead",
                    entry.path.display(),
                    rename_error
                );
                copy_then_remove(&entry.path, &target)
            }
        }
    }
}

fn copy_then_remove(source: &Path, target: &Path) -> io::Result<()> {
    if let Err(e) = fs::copy(source, target) {
        let _ = fs::remove_file(target);
        return Err(e);
    }

    if let Ok(metadata) = fs::metadata(source) {
        if let Ok(modified) = metadata.modified() {
            let mtime = filetime::FileTime::from_system_time(modified);
            if let Err(e) = filetime::set_file_mtime(target, mtime) {
                warn!("Could not preserve modification time of {}: {}", target.display(), e);
            }
        }
    }

    if let Err(e) = fs::remove_file(source) {
        let _ = fs::remove_file(target);
        return Err(e);
    }

    Ok(())
}
