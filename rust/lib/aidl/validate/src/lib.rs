//! AIDL Validator
//!
//! Checks applied once the type namespace is populated:
//! - Declarations live in files named after their package and name
//! - Method signatures only use registered types, in legal roles
//! - Oneway methods return void and take no out parameters
//! - Method names are unique within an interface
//! - Method ids are all explicit (in range, unique) or all automatic

pub mod filename;
pub mod method_ids;
pub mod structure;

pub use filename::{
    check_document_filenames, check_filename, expected_relative_path, FilenameCase,
    AIDL_EXTENSION,
};
pub use method_ids::{assign_method_ids, MAX_USER_SET_METHOD_ID, MIN_USER_SET_METHOD_ID};
pub use structure::{check_package, check_types};
