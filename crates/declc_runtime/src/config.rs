//! Compile pipeline configuration.

use std::path::PathBuf;

use declc_render::RenderConfig;

/// Extension of DSL files picked up from directories.
pub const DEFAULT_EXTENSION: &str = "decl";

/// Configuration for one compile run.
#[derive(Clone, Debug)]
pub struct CompileConfig {
    /// Input files and directories.
    pub inputs: Vec<PathBuf>,

    /// Output root directory.
    pub output: PathBuf,

    /// Namespace prefix mapped onto the output root.
    pub prefix: String,

    /// Extension filter for directory inputs.
    pub extension: String,

    /// Rendering settings.
    pub render: RenderConfig,
}

impl Default for CompileConfig {
    fn default() -> Self {
        Self {
            inputs: Vec::new(),
            output: PathBuf::from("."),
            prefix: String::new(),
            extension: DEFAULT_EXTENSION.to_string(),
            render: RenderConfig::default(),
        }
    }
}

impl CompileConfig {
    /// Creates a configuration reading `input` and writing below `output`.
    #[must_use]
    pub fn new(input: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self::default().with_input(input).with_output(output)
    }

    /// Builder method to add an input path.
    #[must_use]
    pub fn with_input(mut self, input: impl Into<PathBuf>) -> Self {
        self.inputs.push(input.into());
        self
    }

    /// Builder method to set the output root.
    #[must_use]
    pub fn with_output(mut self, output: impl Into<PathBuf>) -> Self {
        self.output = output.into();
        self
    }

    /// Builder method to set the PSR-4 namespace prefix.
    #[must_use]
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Builder method to set the input extension filter.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    /// Builder method to set the rendering settings.
    #[must_use]
    pub fn with_render(mut self, render: RenderConfig) -> Self {
        self.render = render;
        self
    }
}
