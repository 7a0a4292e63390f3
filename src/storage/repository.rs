use super::markdown::{FrontmatterFormat, detect_format, parse_markdown, render_markdown_with_format};
use crate::{
    error::{CrewError, Result},
    model::Record,
};
use slug::slugify;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// File-per-record storage for one kind of workspace entity.
pub struct Repository<T: Record> {
    dir: PathBuf,
    id_length: usize,
    frontmatter_format: FrontmatterFormat,
    _kind: PhantomData<T>,
}

impl<T: Record> Repository<T> {
    pub fn new(data_path: &Path, id_length: usize) -> Self {
        Self {
            dir: data_path.join(T::DIR),
            id_length,
            frontmatter_format: FrontmatterFormat::Toml,
            _kind: PhantomData,
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn generate_id(&self) -> String {
        const ALPHABET: [char; 36] = [
            '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'a', 'b', 'c', 'd', 'e', 'f', 'g',
            'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x',
            'y', 'z',
        ];
        let suffix = nanoid::format(nanoid::rngs::default, &ALPHABET, self.id_length);
        format!("{}{}", T::PREFIX, suffix)
    }

    pub fn generate_filename(&self, id: &str, title: &str) -> String {
        let slug = slugify(title);
        let slug = if slug.len() > 50 {
            slug[..50].trim_end_matches('-').to_string()
        } else {
            slug
        };
        format!("{}--{}.md", id, slug)
    }

    pub fn create(&self, record: &T) -> Result<PathBuf> {
        tracing::info!(kind = T::KIND, id = %record.id(), title = %record.title(), "Creating record");

        record.validate()?;
        if self.exists(record.id()) {
            return Err(CrewError::Storage(format!(
                "{} '{}' already exists",
                T::KIND,
                record.id()
            )));
        }

        std::fs::create_dir_all(&self.dir)?;
        let file_path = self.dir.join(self.generate_filename(record.id(), record.title()));
        let content = render_markdown_with_format(record, self.frontmatter_format)?;
        atomic_write(&file_path, &content)?;

        Ok(file_path)
    }

    pub fn get(&self, id: &str) -> Result<T> {
        let file_path = self.find_file_by_id(id)?;
        let content = std::fs::read_to_string(&file_path)?;
        parse_markdown(&content)
    }

    pub fn exists(&self, id: &str) -> bool {
        self.find_file_by_id(id).is_ok()
    }

    pub fn update(&self, record: &T) -> Result<PathBuf> {
        tracing::info!(kind = T::KIND, id = %record.id(), "Updating record");

        let (old_path, content) = self.render_in_place(record)?;
        let new_path = self.dir.join(self.generate_filename(record.id(), record.title()));

        atomic_write(&new_path, &content)?;

        // Title changes rename the file
        if old_path != new_path {
            std::fs::remove_file(&old_path)?;
        }

        Ok(new_path)
    }

    /// Render an update without writing it, keeping the record's file and frontmatter format.
    ///
    /// Used by transactions, which must replace files in place.
    pub fn render_in_place(&self, record: &T) -> Result<(PathBuf, String)> {
        record.validate()?;
        let path = self.find_file_by_id(record.id())?;
        let original_content = std::fs::read_to_string(&path)?;
        let format = detect_format(&original_content).unwrap_or(self.frontmatter_format);
        let content = render_markdown_with_format(record, format)?;
        Ok((path, content))
    }

    /// All records of this kind sorted by ID. Unreadable files are logged
    /// and skipped, which suits display commands.
    pub fn list(&self) -> Result<Vec<T>> {
        self.scan(false)
    }

    /// All records of this kind sorted by ID, failing on the first file
    /// that cannot be read or parsed.
    pub fn list_strict(&self) -> Result<Vec<T>> {
        self.scan(true)
    }

    fn scan(&self, strict: bool) -> Result<Vec<T>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }

        let mut records = Vec::new();
        for entry in std::fs::read_dir(&self.dir)? {
            let entry = entry?;
            let path = entry.path();

            if !path.is_file() || path.extension().map(|e| e != "md").unwrap_or(true) {
                continue;
            }

            let parsed = std::fs::read_to_string(&path)
                .map_err(CrewError::from)
                .and_then(|content| parse_markdown::<T>(&content));
            match parsed {
                Ok(record) => records.push(record),
                Err(e) if strict => {
                    return Err(CrewError::Parse(format!(
                        "{} file {}: {}",
                        T::KIND,
                        path.display(),
                        e
                    )));
                }
                Err(e) => tracing::warn!(
                    kind = T::KIND,
                    path = %path.display(),
                    error = %e,
                    "Skipping unreadable record file"
                ),
            }
        }

        records.sort_by(|a, b| a.id().cmp(b.id()));
        Ok(records)
    }

    pub fn find_file_by_id(&self, id: &str) -> Result<PathBuf> {
        crate::validation::validate_id(id)?;
        let search_id = if id.starts_with(T::PREFIX) {
            id.to_string()
        } else {
            format!("{}{}", T::PREFIX, id)
        };
        let file_prefix = format!("{}--", search_id);

        if self.dir.exists() {
            for entry in std::fs::read_dir(&self.dir)? {
                let entry = entry?;
                let path = entry.path();

                if path.is_file() {
                    let Some(filename) = path.file_name() else {
                        continue;
                    };
                    if filename.to_string_lossy().starts_with(&file_prefix) {
                        return Ok(path);
                    }
                }
            }
        }

        Err(CrewError::NotFound(format!("{} {}", T::KIND, id)))
    }
}

/// Atomically write content to a file using temp file + rename
pub(crate) fn atomic_write(target_path: &Path, content: &str) -> Result<()> {
    let target_dir = target_path
        .parent()
        .ok_or_else(|| CrewError::Storage("Target path has no parent directory".to_string()))?;

    // The temp file must live next to the target for the rename to be atomic
    let mut temp_file = NamedTempFile::new_in(target_dir)
        .map_err(|e| CrewError::Storage(format!("Failed to create temp file: {}", e)))?;

    use std::io::Write;
    temp_file
        .write_all(content.as_bytes())
        .map_err(|e| CrewError::Storage(format!("Failed to write to temp file: {}", e)))?;

    temp_file
        .as_file()
        .sync_all()
        .map_err(|e| CrewError::Storage(format!("Failed to sync temp file: {}", e)))?;

    temp_file
        .persist(target_path)
        .map_err(|e| CrewError::Storage(format!("Failed to persist temp file: {}", e)))?;

    Ok(())
}
