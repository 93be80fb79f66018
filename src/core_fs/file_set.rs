use crate::core_fs::path::parent_unix_path;

/// An ordered list of local files, optionally relative to a base directory.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    base_dir: Option<String>,
    files: Vec<String>,
}

impl FileSet {
    pub fn new<I, S>(base_dir: Option<String>, files: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            base_dir,
            files: files.into_iter().map(Into::into).collect(),
        }
    }

    pub fn base_dir(&self) -> Option<&str> {
        self.base_dir.as_deref()
    }

    pub fn set_base_dir(&mut self, base_dir: Option<String>) {
        self.base_dir = base_dir;
    }

    pub fn files(&self) -> &[String] {
        &self.files
    }

    pub fn add_file(&mut self, file_name: impl Into<String>) {
        self.files.push(file_name.into());
    }

    pub fn clear_list(&mut self) {
        self.files.clear();
    }

    /// Replaces the list with a single file whose directory becomes the base.
    pub fn set_file(&mut self, file_name: impl Into<String>) {
        let file_name = file_name.into();
        self.clear_list();
        self.base_dir = parent_unix_path(&file_name);
        self.files.push(file_name);
    }

    pub fn set_files<I, S>(&mut self, base_dir: Option<String>, file_names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.clear_list();
        self.files.extend(file_names.into_iter().map(Into::into));
        self.base_dir = base_dir;
    }

    pub fn sort_files(&mut self) {
        self.files.sort();
    }
}
