use crate::config::RelocateConfig;
use std::path::Path;

/// Decides which directory entries the relocator picks up, by file-name suffix.
pub struct ImageFilter {
    suffixes: Vec<String>,
}

impl ImageFilter {
    pub fn new(config: &RelocateConfig) -> Self {
        let mut filter = Self {
            suffixes: Vec::new(),
        };
        for extension in &config.extensions {
            filter.add_extension(extension.as_str());
        }
        filter
    }

    pub fn matches_name(&self, name: &str) -> bool {
        let name_lower = name.to_lowercase();
        self.suffixes
            .iter()
            .any(|suffix| name_lower.ends_with(suffix.as_str()))
    }

    pub fn matches_path(&self, path: &Path) -> bool {
        path.file_name()
            .map(|name| self.matches_name(&name.to_string_lossy()))
            .unwrap_or(false)
    }

    pub fn add_extension<S: Into<String>>(&mut self, extension: S) {
        let ext = extension.into();
        let suffix = format!(".{}", ext.trim_start_matches('.').to_lowercase());
        if !self.suffixes.contains(&suffix) {
            self.suffixes.push(suffix);
        }
    }

    pub fn suffixes(&self) -> &[String] {
        &self.suffixes
    }

    pub fn describe(&self) -> String {
        self.suffixes.join("/")
    }
}

impl Default for ImageFilter {
    fn default() -> Self {
        Self::new(&RelocateConfig::default())
    }
}
