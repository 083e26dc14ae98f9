use crate::utils::config::{DEFAULT_MAX_ITEMS, NODE_MODULE_FILES};

/// List the built-in runtime module files skipped by `--skip-node-files`
pub fn display_modules() {
    println!("Built-in module files ({}):", NODE_MODULE_FILES.len());
    for file in NODE_MODULE_FILES {
        println!("  {}", file);
    }
    println!();
    println!("Default max items: {}", DEFAULT_MAX_ITEMS);
}
