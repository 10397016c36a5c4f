/// Run-level settings for a placement pass.
#[derive(Debug, Clone)]
pub struct AssemblyConfig {
    /// Appended to the root object's name to form the container node's name.
    pub container_suffix: String,
    /// Whether `.NNN` suffixes are stripped from entry names before template lookup.
    pub strip_disambiguation_suffix: bool,
}

impl AssemblyConfig {
    pub fn container_name(&self, root_name: &str) -> String {
        format!("{}{}", root_name, self.container_suffix)
    }
}

impl Default for AssemblyConfig {
    fn default() -> Self {
        Self {
            container_suffix: "_Decoration".to_string(),
            strip_disambiguation_suffix: true,
        }
    }
}
