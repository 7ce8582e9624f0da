use crate::adapters::LocalStorage;
use crate::core::codec;
use crate::domain::model::Course;
use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::fmt;
use std::path::Path;

pub const DEFAULT_POPULAR_COUNT: usize = 3;

/// An ordered roster of courses. Titles are not required to be unique;
/// lookups by title act on the first match.
#[derive(Debug, Clone, Default)]
pub struct Platform {
    name: String,
    courses: Vec<Course>,
}

impl Platform {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            courses: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.courses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    pub fn add_course(&mut self, course: Course) {
        tracing::debug!("Adding course '{}' to {}", course.title(), self.name);
        self.courses.push(course);
    }

    /// Remove the first course titled `title`. Returns whether one was found.
    pub fn remove_course(&mut self, title: &str) -> bool {
        match self.courses.iter().position(|c| c.title() == title) {
            Some(index) => {
                self.courses.remove(index);
                tracing::debug!("Removed course '{}' from {}", title, self.name);
                true
            }
            None => false,
        }
    }

    pub fn find_course(&self, title: &str) -> Option<&Course> {
        self.courses.iter().find(|c| c.title() == title)
    }

    /// Mutable access to the first course titled `title`, for enrollment.
    pub fn find_course_mut(&mut self, title: &str) -> Option<&mut Course> {
        self.courses.iter_mut().find(|c| c.title() == title)
    }

    /// Independent copy of the course list.
    pub fn get_all_courses(&self) -> Vec<Course> {
        self.courses.clone()
    }

    /// Top `n` courses by enrollment, largest first. Ties keep insertion order.
    pub fn get_most_popular(&self, n: usize) -> Vec<&Course> {
        let mut ranked: Vec<&Course> = self.courses.iter().collect();
        // sort_by 為穩定排序
        ranked.sort_by(|a, b| b.students().len().cmp(&a.students().len()));
        ranked.truncate(n);
        ranked
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        self.save_to(&LocalStorage::new(), path.as_ref())
    }

    pub fn save_to<S: Storage>(&self, storage: &S, path: &Path) -> Result<()> {
        let document = codec::encode_document(&self.courses)?;
        storage.write_file(path, &document)?;

        tracing::info!("💾 Saved {} courses to {}", self.courses.len(), path.display());
        Ok(())
    }

    /// Replace the course list with the contents of `path`, returning how many
    /// courses were loaded.
    ///
    /// On any failure (missing file, undecodable document, malformed record)
    /// the current list is left untouched and the error is returned for the
    /// caller to report.
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        self.load_from(&LocalStorage::new(), path.as_ref())
    }

    pub fn load_from<S: Storage>(&mut self, storage: &S, path: &Path) -> Result<usize> {
        let courses = storage
            .read_file(path)
            .and_then(|bytes| codec::decode_document(&bytes, path))
            .inspect_err(|e| {
                tracing::warn!(
                    "⚠️ Could not load {}: {}. Keeping {} existing courses",
                    path.display(),
                    e,
                    self.courses.len()
                );
            })?;

        self.courses = courses;
        tracing::info!("📂 Loaded {} courses from {}", self.courses.len(), path.display());
        Ok(self.courses.len())
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Platform: {}, courses: {}", self.name, self.courses.len())
    }
}
