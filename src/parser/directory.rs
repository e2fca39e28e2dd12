use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

static MAKE_DIRECTORY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\S*make(?:\[\d+\])?: (Entering|Leaving) directory [`'"](.*)['"]$"#)
        .expect("valid make directory pattern")
});

/// Working directory of the make process that printed the current line.
pub(crate) struct DirectoryStack {
    stack: Vec<PathBuf>,
}

impl DirectoryStack {
    pub(crate) fn new(root: &Path) -> Self {
        Self {
            stack: vec![root.to_path_buf()],
        }
    }

    pub(crate) fn current(&self) -> &Path {
        // never empty, the root is not popped
        &self.stack[self.stack.len() - 1]
    }

    /// Track an `Entering directory` / `Leaving directory` message.
    /// Returns false for any other line.
    pub(crate) fn observe(&mut self, line: &str) -> bool {
        let Some(caps) = MAKE_DIRECTORY.captures(line) else {
            return false;
        };

        if &caps[1] == "Entering" {
            let dir = self.current().join(&caps[2]);
            self.stack.push(dir);
        } else if self.stack.len() > 1 {
            self.stack.pop();
        }
        true
    }
}
