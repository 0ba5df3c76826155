//! Map catalog
//!
//! The ordered list of playable maps. Progression is index based: finishing
//! map `i` loads map `i + 1`, and running past the end means there are no
//! more levels.
//!
//! Native: enumerates the map directory.
//! WASM: reads `manifest.txt` written by the build script.

use super::map::{parse_map_data, MapDefinition, MapError};

/// File name of the generated map manifest
pub const MANIFEST_FILE: &str = "manifest.txt";

/// One map file in the catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MapEntry {
    /// File name inside the map directory
    pub file_name: String,
    /// Path used to load the file
    pub path: String,
}

impl MapEntry {
    /// File name without the extension, used for log lines
    pub fn stem(&self) -> &str {
        self.file_name
            .rsplit_once('.')
            .map(|(stem, _)| stem)
            .unwrap_or(&self.file_name)
    }
}

#[derive(Debug, Clone, Default)]
pub struct MapCatalog {
    map_dir: String,
    entries: Vec<MapEntry>,
}

fn is_map_file(name: &str) -> bool {
    name.to_ascii_lowercase().ends_with(".ron")
}

impl MapCatalog {
    /// Build from a list of file names; non-map files are skipped and the rest sorted
    pub fn from_file_names<I, S>(map_dir: &str, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut names: Vec<String> = names
            .into_iter()
            .map(Into::into)
            .filter(|n| is_map_file(n))
            .collect();
        names.sort();
        names.dedup();

        let dir = map_dir.trim_end_matches('/');
        let entries = names
            .into_iter()
            .map(|file_name| MapEntry {
                path: format!("{}/{}", dir, file_name),
                file_name,
            })
            .collect();

        Self {
            map_dir: dir.to_string(),
            entries,
        }
    }

    /// Parse a manifest: one file name per line, blank lines ignored
    pub fn from_manifest(map_dir: &str, manifest: &str) -> Self {
        Self::from_file_names(
            map_dir,
            manifest.lines().map(str::trim).filter(|l| !l.is_empty()),
        )
    }

    /// Enumerate the map directory
    #[cfg(not(target_arch = "wasm32"))]
    pub fn discover(storage: &crate::storage::LocalStorage, map_dir: &str) -> Self {
        match storage.list(map_dir) {
            Ok(files) => Self::from_file_names(map_dir, files),
            Err(e) => {
                macroquad::logging::warn!("Could not list maps in {}: {}", map_dir, e);
                Self::from_file_names(map_dir, Vec::<String>::new())
            }
        }
    }

    /// Load the manifest generated at build time
    #[cfg(target_arch = "wasm32")]
    pub async fn discover_from_manifest(map_dir: &str) -> Self {
        let path = format!("{}/{}", map_dir.trim_end_matches('/'), MANIFEST_FILE);
        match macroquad::file::load_string(&path).await {
            Ok(text) => Self::from_manifest(map_dir, &text),
            Err(e) => {
                macroquad::logging::warn!("Could not load map manifest {}: {}", path, e);
                Self::from_file_names(map_dir, Vec::<String>::new())
            }
        }
    }

    pub fn map_dir(&self) -> &str {
        &self.map_dir
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&MapEntry> {
        self.entries.get(index)
    }

    /// Index of the map after `index`, if there is one
    pub fn next_index(&self, index: usize) -> Option<usize> {
        let next = index.checked_add(1)?;
        (next < self.entries.len()).then_some(next)
    }

    /// Path of a file that sits next to the maps (level bitmaps)
    pub fn resolve(&self, file_name: &str) -> String {
        format!("{}/{}", self.map_dir, file_name)
    }

    /// Read and parse the map at `index`
    pub async fn load(&self, index: usize) -> Result<MapDefinition, MapError> {
        let entry = self.get(index).ok_or_else(|| {
            MapError::ValidationError(format!("no map at index {}", index))
        })?;
        let bytes = macroquad::file::load_file(&entry.path)
            .await
            .map_err(|e| MapError::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{}: {}", entry.path, e),
            )))?;
        let mut map = parse_map_data(&bytes)?;
        if map.name.is_empty() {
            map.name = entry.stem().to_string();
        }
        Ok(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_file_names_filters_and_sorts() {
        let catalog = MapCatalog::from_file_names(
            "assets/maps/",
            ["03-cliffs.ron", "1.png", "01-meadow.ron", "02-caves.RON", "notes.txt"],
        );
        let names: Vec<_> = (0..catalog.len())
            .filter_map(|i| catalog.get(i))
            .map(|e| e.file_name.as_str())
            .collect();
        assert_eq!(names, vec!["01-meadow.ron", "02-caves.RON", "03-cliffs.ron"]);
        assert_eq!(catalog.get(0).unwrap().path, "assets/maps/01-meadow.ron");
        assert_eq!(catalog.resolve("1.png"), "assets/maps/1.png");
    }

    #[test]
    fn test_next_index() {
        let catalog = MapCatalog::from_file_names("maps", ["a.ron", "b.ron"]);
        assert_eq!(catalog.next_index(0), Some(1));
        assert_eq!(catalog.next_index(1), None);
        assert_eq!(catalog.next_index(usize::MAX), None);
        assert!(catalog.get(2).is_none());
    }

    #[test]
    fn test_from_manifest() {
        let manifest = "01-meadow.ron\n\n  02-caves.ron  \n";
        let catalog = MapCatalog::from_manifest("maps", manifest);
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(1).unwrap().stem(), "02-caves");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_discover_directory() {
        let dir = tempfile::TempDir::new().unwrap();
        let storage = crate::storage::LocalStorage::with_base_dir(dir.path());
        storage.write("maps/b.ron", b"").unwrap();
        storage.write("maps/a.ron", b"").unwrap();
        storage.write("maps/a.png", b"").unwrap();

        let catalog = MapCatalog::discover(&storage, "maps");
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.get(0).unwrap().file_name, "a.ron");

        let empty = MapCatalog::discover(&storage, "missing");
        assert!(empty.is_empty());
    }
}
