use std::path::{Component, Path, PathBuf};

use serde::Serialize;

/// URL prefix the images directory is mounted under.
pub const IMAGES_ROUTE: &str = "/images";

/// Where a question's figure can be fetched from, or why it cannot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Figure {
    Available { url: String },
    /// `path` is the value from the question file, empty when it was blank.
    Missing { path: String },
}

/// Resolves question image paths against the served images directory.
#[derive(Clone, Debug)]
pub struct ImageStore {
    dir: PathBuf,
}

impl ImageStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Accepts paths relative to the images directory as well as paths that start with it,
    /// like `data/images/수1/1.png`.
    pub fn locate(&self, image: &str) -> Figure {
        let image = image.trim();
        let missing = || Figure::Missing {
            path: image.to_string(),
        };
        if image.is_empty() {
            return missing();
        }

        let path = Path::new(image);
        let relative = path.strip_prefix(&self.dir).unwrap_or(path);
        let segments = relative
            .components()
            .map(|c| match c {
                Component::Normal(s) => s.to_str(),
                _ => None,
            })
            .collect::<Option<Vec<_>>>();

        match segments {
            Some(segments) if !segments.is_empty() && self.dir.join(relative).is_file() => {
                Figure::Available {
                    url: format!("{}/{}", IMAGES_ROUTE, segments.join("/")),
                }
            }
            _ => {
                log::debug!("Figure '{}' not found under {}", image, self.dir.display());
                missing()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    fn store_with(file: &str) -> (TempDir, ImageStore) {
        let dir = TempDir::new().expect("temp dir");
        let path = dir.path().join(file);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).expect("create image dir");
        }
        fs::write(&path, b"png").expect("write image");
        let store = ImageStore::new(dir.path());
        (dir, store)
    }

    #[test]
    fn relative_path_resolves_to_url() {
        let (_dir, store) = store_with("수1/1.png");

        assert_eq!(
            store.locate("수1/1.png"),
            Figure::Available {
                url: "/images/수1/1.png".to_string()
            }
        );
    }

    #[test]
    fn path_prefixed_with_images_dir_resolves() {
        let (dir, store) = store_with("수2/3.png");
        let full = dir.path().join("수2/3.png");

        assert_eq!(
            store.locate(full.to_str().expect("utf-8 path")),
            Figure::Available {
                url: "/images/수2/3.png".to_string()
            }
        );
    }

    #[test]
    fn absent_file_is_missing() {
        let (_dir, store) = store_with("수1/1.png");

        assert_eq!(
            store.locate("수1/9.png"),
            Figure::Missing {
                path: "수1/9.png".to_string()
            }
        );
    }

    #[test]
    fn blank_path_is_missing() {
        let (_dir, store) = store_with("수1/1.png");

        assert_eq!(store.locate("  "), Figure::Missing { path: String::new() });
    }

    #[test]
    fn parent_components_are_rejected() {
        let (_dir, store) = store_with("수1/1.png");

        assert!(matches!(store.locate("../수1/1.png"), Figure::Missing { .. }));
        assert!(matches!(store.locate("수1/../수1/1.png"), Figure::Missing { .. }));
    }
}
