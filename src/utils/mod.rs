pub mod naming;
pub mod paths;

pub use naming::{
    PLACEHOLDER_NAME, category_dir_name, fingerprint, folder_name, prompt_path, sanitize,
    unique_path,
};
pub use paths::relative_link_path;
