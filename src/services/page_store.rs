use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use log::{debug, error, info, warn};
use time::OffsetDateTime;

use crate::errors::WikiError;
use crate::services::Title;
use crate::types::Page;

const PAGE_SUFFIX: &str = ".txt";

/// Flat-file storage for pages, one `<title>.txt` per page
#[derive(Debug, Clone)]
pub struct PageStore {
    dir: PathBuf,
}

impl PageStore {
    /// Create a store rooted at `dir` without touching the filesystem
    pub fn new(dir: PathBuf) -> Self {
        debug!("Creating PageStore with directory: {:?}", dir);
        Self { dir }
    }

    /// Create a store rooted at `dir`, creating the directory if needed
    pub fn open(dir: PathBuf) -> Result<Self, WikiError> {
        if !dir.is_dir() {
            info!("Creating pages directory {:?}", dir);
            fs::create_dir_all(&dir)?;
        }
        Ok(Self::new(dir))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn page_path(&self, title: &Title) -> PathBuf {
        self.dir.join(title.file_name())
    }

    /// Read a page. Any failure is reported as `NotFound`.
    pub fn load(&self, title: &Title) -> Result<Page, WikiError> {
        let path = self.page_path(title);
        let body = fs::read(&path).map_err(|e| {
            debug!("Cannot load {:?}: {}", path, e);
            WikiError::NotFound
        })?;
        let modified = fs::metadata(&path)
            .and_then(|m| m.modified())
            .ok()
            .map(OffsetDateTime::from);

        debug!("Loaded page '{}', {} bytes", title, body.len());
        Ok(Page { title: title.clone(), body, modified })
    }

    /// Create or overwrite the page file
    pub fn save(&self, page: &Page) -> Result<(), WikiError> {
        let path = self.page_path(&page.title);
        let mut file = open_for_write(&path).map_err(|e| {
            error!("Failed to open {:?} for writing: {}", path, e);
            WikiError::Io(e)
        })?;
        file.write_all(&page.body)?;

        info!("Saved page '{}', {} bytes", page.title, page.body.len());
        Ok(())
    }

    /// Remove the page file. Fails if it does not exist.
    pub fn delete(&self, title: &Title) -> Result<(), WikiError> {
        let path = self.page_path(title);
        fs::remove_file(&path).map_err(|e| {
            warn!("Failed to delete {:?}: {}", path, e);
            WikiError::Io(e)
        })?;

        info!("Deleted page '{}'", title);
        Ok(())
    }

    /// Titles of all `.txt` files directly inside the pages directory, in listing order
    pub fn list_titles(&self) -> Result<Vec<String>, WikiError> {
        let entries = fs::read_dir(&self.dir).map_err(|e| {
            error!("Failed to read directory {:?}: {}", self.dir, e);
            WikiError::Io(e)
        })?;

        let mut titles = Vec::new();
        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Failed to read directory entry: {}", e);
                    continue;
                }
            };
            if !entry.file_type().map(|ft| ft.is_file()).unwrap_or(false) {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            match name.strip_suffix(PAGE_SUFFIX) {
                Some(stem) if !stem.is_empty() => titles.push(stem.to_string()),
                _ => debug!("Skipping non-page file: {}", name),
            }
        }

        debug!("Listed {} pages in {:?}", titles.len(), self.dir);
        Ok(titles)
    }
}

#[cfg(unix)]
fn open_for_write(path: &Path) -> std::io::Result<fs::File> {
    use std::os::unix::fs::OpenOptionsExt;
    fs::OpenOptions::new().write(true).create(true).truncate(true).mode(0o600).open(path)
}

#[cfg(not(unix))]
fn open_for_write(path: &Path) -> std::io::Result<fs::File> {
    fs::OpenOptions::new().write(true).create(true).truncate(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use tempfile::TempDir;

    fn create_test_store() -> (PageStore, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let store = PageStore::open(temp_dir.path().join("pages")).unwrap();
        (store, temp_dir)
    }

    fn title(raw: &str) -> Title {
        Title::parse(raw).unwrap()
    }

    #[test]
    fn test_save_then_load_round_trips_body() {
        let (store, _temp_dir) = create_test_store();
        let body = b"<b>bold</b>\nsecond line \xF0\x9F\x93\x9D".to_vec();

        store.save(&Page::new(title("Notes"), body.clone())).unwrap();
        let page = store.load(&title("Notes")).unwrap();

        assert_eq!(page.title, title("Notes"));
        assert_eq!(page.body, body);
        assert!(page.modified.is_some());
    }

    #[test]
    fn test_save_overwrites_entire_body() {
        let (store, _temp_dir) = create_test_store();

        store.save(&Page::new(title("p"), b"a much longer original body".to_vec())).unwrap();
        store.save(&Page::new(title("p"), b"short".to_vec())).unwrap();

        assert_eq!(store.load(&title("p")).unwrap().body, b"short");
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let (store, _temp_dir) = create_test_store();
        assert!(matches!(store.load(&title("nope")), Err(WikiError::NotFound)));
    }

    #[test]
    fn test_load_unreadable_is_not_found() {
        let (store, _temp_dir) = create_test_store();
        // A directory named like a page cannot be read as a file
        fs::create_dir(store.dir().join("odd.txt")).unwrap();
        assert!(matches!(store.load(&title("odd")), Err(WikiError::NotFound)));
    }

    #[test]
    fn test_delete_then_load_is_not_found() {
        let (store, _temp_dir) = create_test_store();
        store.save(&Page::new(title("gone"), b"x".to_vec())).unwrap();

        store.delete(&title("gone")).unwrap();

        assert!(matches!(store.load(&title("gone")), Err(WikiError::NotFound)));
    }

    #[test]
    fn test_delete_missing_fails() {
        let (store, _temp_dir) = create_test_store();
        assert!(matches!(store.delete(&title("never")), Err(WikiError::Io(_))));
    }

    #[test]
    fn test_save_fails_without_directory() {
        let temp_dir = TempDir::new().unwrap();
        let store = PageStore::new(temp_dir.path().join("missing"));
        let result = store.save(&Page::new(title("a"), b"x".to_vec()));
        assert!(matches!(result, Err(WikiError::Io(_))));
    }

    #[test]
    fn test_list_titles_returns_saved_pages() {
        let (store, _temp_dir) = create_test_store();
        for t in ["a", "b", "c"] {
            store.save(&Page::new(title(t), t.as_bytes().to_vec())).unwrap();
        }

        let titles: HashSet<String> = store.list_titles().unwrap().into_iter().collect();
        let expected: HashSet<String> = ["a", "b", "c"].iter().map(|s| s.to_string()).collect();
        assert_eq!(titles, expected);
    }

    #[test]
    fn test_list_titles_ignores_other_files() {
        let (store, _temp_dir) = create_test_store();
        store.save(&Page::new(title("real"), b"x".to_vec())).unwrap();
        fs::write(store.dir().join("notes.md"), "x").unwrap();
        fs::write(store.dir().join("txt_in_name.bak"), "x").unwrap();
        fs::write(store.dir().join("archive.txt.gz"), "x").unwrap();
        fs::write(store.dir().join(".txt"), "x").unwrap();
        fs::create_dir(store.dir().join("nested")).unwrap();
        fs::write(store.dir().join("nested").join("inner.txt"), "x").unwrap();

        assert_eq!(store.list_titles().unwrap(), vec!["real".to_string()]);
    }

    #[test]
    fn test_open_creates_directory() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("a").join("b");
        let store = PageStore::open(dir.clone()).unwrap();
        assert!(dir.is_dir());
        assert!(store.list_titles().unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn test_saved_files_are_owner_only() {
        use std::os::unix::fs::PermissionsExt;

        let (store, _temp_dir) = create_test_store();
        store.save(&Page::new(title("private"), b"x".to_vec())).unwrap();

        let mode = fs::metadata(store.dir().join("private.txt")).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
