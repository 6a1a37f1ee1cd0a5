use std::path::{Path, PathBuf};

use aidl_ir::Interface;
use aidl_validate::FilenameCase;

use crate::pipeline::LoadRequest;

/// What a Java invocation does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Task {
    #[default]
    CompileAidlToJava,
    PreprocessAidl,
}

/// Settings for the Java compile and preprocess tasks.
#[derive(Debug, Clone)]
pub struct JavaOptions {
    pub task: Task,

    /// Directories searched for imported declarations, in order.
    pub import_paths: Vec<PathBuf>,

    /// Preprocessed caches registered before imports are resolved.
    pub preprocessed_files: Vec<PathBuf>,

    pub input_file_name: String,

    /// Generated file, or the cache file for [`Task::PreprocessAidl`].
    /// Derived from `output_base_folder` when unset.
    pub output_file_name: Option<PathBuf>,

    /// Root under which `<package path>/<Name>.java` is placed.
    pub output_base_folder: Option<PathBuf>,

    pub dep_file_name: Option<PathBuf>,

    /// Write the dependency file next to the output as `<output>.d`.
    pub auto_dep_file: bool,

    /// Inputs of [`Task::PreprocessAidl`].
    pub files_to_preprocess: Vec<String>,

    pub filename_case: FilenameCase,
}

impl Default for JavaOptions {
    fn default() -> Self {
        Self {
            task: Task::default(),
            import_paths: Vec::new(),
            preprocessed_files: Vec::new(),
            input_file_name: String::new(),
            output_file_name: None,
            output_base_folder: None,
            dep_file_name: None,
            auto_dep_file: false,
            files_to_preprocess: Vec::new(),
            filename_case: FilenameCase::host(),
        }
    }
}

impl JavaOptions {
    pub fn load_request(&self) -> LoadRequest<'_> {
        LoadRequest {
            preprocessed_files: &self.preprocessed_files,
            import_paths: &self.import_paths,
            input_file: &self.input_file_name,
            filename_case: self.filename_case,
        }
    }

    /// The explicit output file, else `<base>/<package path>/<Name>.java`.
    pub fn resolve_output_file(&self, interface: &Interface) -> Option<PathBuf> {
        if let Some(path) = &self.output_file_name {
            return Some(path.clone());
        }
        let base = self.output_base_folder.as_ref()?;

        let mut path = base.clone();
        for segment in interface.package.split('.').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        let stem = interface.name.split('.').next().unwrap_or_default();
        path.push(format!("{}.java", stem));
        Some(path)
    }

    /// `<output>.d` when `auto_dep_file` is set, else `dep_file_name`.
    pub fn resolve_dep_file(&self, output: &Path) -> Option<PathBuf> {
        if self.auto_dep_file {
            let mut name = output.as_os_str().to_owned();
            name.push(".d");
            return Some(PathBuf::from(name));
        }
        self.dep_file_name.clone()
    }
}

/// Settings for the C++ compile task. No preprocessed caches.
#[derive(Debug, Clone)]
pub struct CppOptions {
    pub import_paths: Vec<PathBuf>,

    pub input_file_name: String,

    /// Directory receiving generated headers.
    pub output_header_dir: PathBuf,

    pub output_cpp_file_name: PathBuf,

    pub dep_file_name: Option<PathBuf>,

    pub filename_case: FilenameCase,
}

impl Default for CppOptions {
    fn default() -> Self {
        Self {
            import_paths: Vec::new(),
            input_file_name: String::new(),
            output_header_dir: PathBuf::new(),
            output_cpp_file_name: PathBuf::new(),
            dep_file_name: None,
            filename_case: FilenameCase::host(),
        }
    }
}

impl CppOptions {
    pub fn load_request(&self) -> LoadRequest<'_> {
        LoadRequest {
            preprocessed_files: &[],
            import_paths: &self.import_paths,
            input_file: &self.input_file_name,
            filename_case: self.filename_case,
        }
    }
}
