use crate::{ConfigError, RelativePath, ShaderStage};
use std::collections::HashMap;

/// One declared compilation unit: a source file compiled into one output artifact.
///
/// Source and output start unset and must both be provided before the module
/// can be compiled. Setters may be called any number of times, last write wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderModule {
    name: String,
    source: Option<RelativePath>,
    output: Option<RelativePath>,
    stage: ShaderStage,
}

impl ShaderModule {
    /// Creates an unconfigured module with `stage = Auto`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            output: None,
            stage: ShaderStage::Auto,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn source(&self) -> Option<&RelativePath> {
        self.source.as_ref()
    }

    pub const fn output(&self) -> Option<&RelativePath> {
        self.output.as_ref()
    }

    pub const fn stage(&self) -> ShaderStage {
        self.stage
    }

    pub fn set_source(&mut self, path: RelativePath) -> &mut Self {
        self.source = Some(path);
        self
    }

    pub fn set_output(&mut self, path: RelativePath) -> &mut Self {
        self.output = Some(path);
        self
    }

    pub fn set_stage(&mut self, stage: ShaderStage) -> &mut Self {
        self.stage = stage;
        self
    }

    /// By-value variant of [`ShaderModule::set_source`] for chained construction.
    #[must_use]
    pub fn with_source(mut self, path: RelativePath) -> Self {
        self.source = Some(path);
        self
    }

    #[must_use]
    pub fn with_output(mut self, path: RelativePath) -> Self {
        self.output = Some(path);
        self
    }

    #[must_use]
    pub fn with_stage(mut self, stage: ShaderStage) -> Self {
        self.stage = stage;
        self
    }

    /// Returns the source and output paths, or the configuration error naming this module.
    ///
    /// # Errors
    ///
    /// `ConfigError::MissingSource` / `ConfigError::MissingOutput` when a path is unset.
    pub fn paths(&self) -> Result<(&RelativePath, &RelativePath), ConfigError> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| ConfigError::MissingSource(self.name.clone()))?;
        let output = self
            .output
            .as_ref()
            .ok_or_else(|| ConfigError::MissingOutput(self.name.clone()))?;
        Ok((source, output))
    }
}

/// Insertion-ordered mapping from module name to [`ShaderModule`].
///
/// Names are unique: declaring a name twice is an error, never an overwrite.
/// Iteration follows declaration order, which is also compilation order.
#[derive(Debug, Clone, Default)]
pub struct ModuleRegistry {
    modules: Vec<ShaderModule>,
    index: HashMap<String, usize>,
}

impl ModuleRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a new module and returns it for configuration.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateModuleName` if `name` is already declared.
    pub fn declare(&mut self, name: impl Into<String>) -> Result<&mut ShaderModule, ConfigError> {
        let slot = self.register(ShaderModule::new(name))?;
        Ok(&mut self.modules[slot])
    }

    /// Adds a fully built module. Returns its position in declaration order.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::DuplicateModuleName` if a module with the same name exists.
    pub fn register(&mut self, module: ShaderModule) -> Result<usize, ConfigError> {
        if self.index.contains_key(module.name()) {
            return Err(ConfigError::DuplicateModuleName(module.name().to_string()));
        }
        let slot = self.modules.len();
        log::trace!("Declared shader module '{}' at position {}", module.name(), slot);
        self.index.insert(module.name().to_string(), slot);
        self.modules.push(module);
        Ok(slot)
    }

    pub fn get(&self, name: &str) -> Option<&ShaderModule> {
        self.index.get(name).map(|&slot| &self.modules[slot])
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut ShaderModule> {
        self.index.get(name).map(|&slot| &mut self.modules[slot])
    }

    /// All modules in declaration order.
    pub fn all(&self) -> &[ShaderModule] {
        &self.modules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, ShaderModule> {
        self.modules.iter()
    }

    pub fn len(&self) -> usize {
        self.modules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.modules.is_empty()
    }

    /// Checks that every module has both paths set.
    ///
    /// # Errors
    ///
    /// Reports the first incomplete module in declaration order.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.modules.iter().try_for_each(|m| m.paths().map(|_| ()))
    }
}

impl<'a> IntoIterator for &'a ModuleRegistry {
    type Item = &'a ShaderModule;
    type IntoIter = std::slice::Iter<'a, ShaderModule>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
