//! The compile pipeline: discover, parse, render, write.

use std::fs;
use std::path::PathBuf;

use declc_foundation::{Error, Result};
use declc_language::{DeclarationRegistry, parse_source};
use declc_render::{RenderOutput, Renderer};

use crate::config::CompileConfig;
use crate::discovery::discover;
use crate::resolver::{PathResolver, Psr4Resolver};

/// What a compile run produced.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CompileSummary {
    /// Number of input files parsed.
    pub files: usize,
    /// Number of declarations across all files.
    pub declarations: usize,
    /// Written paths in artifact order.
    pub written: Vec<PathBuf>,
}

/// Runs the whole pipeline for one configuration.
#[derive(Debug)]
pub struct Compiler {
    config: CompileConfig,
    renderer: Renderer,
    resolver: Box<dyn PathResolver>,
}

impl Compiler {
    /// Creates a compiler writing in PSR-4 layout.
    #[must_use]
    pub fn new(config: CompileConfig) -> Self {
        let renderer = Renderer::new(config.render.clone());
        let resolver = Box::new(Psr4Resolver::new(&config.prefix, config.output.clone()));
        Self {
            config,
            renderer,
            resolver,
        }
    }

    /// Builder method to replace the output layout.
    #[must_use]
    pub fn with_resolver(mut self, resolver: impl PathResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &CompileConfig {
        &self.config
    }

    /// Returns the renderer for builder customization.
    pub fn renderer_mut(&mut self) -> &mut Renderer {
        &mut self.renderer
    }

    /// Finds the input files.
    ///
    /// # Errors
    /// Returns `Io` for missing or unreadable inputs.
    pub fn discover(&self) -> Result<Vec<PathBuf>> {
        discover(&self.config.inputs, &self.config.extension)
    }

    /// Parses every file and merges the results in file order.
    ///
    /// # Errors
    /// Returns the first read, parse or merge error.
    pub fn parse_all(&self, files: &[PathBuf]) -> Result<DeclarationRegistry> {
        let mut registry = DeclarationRegistry::new();
        for file in files {
            let source_id = file.display().to_string();
            let source = fs::read_to_string(file).map_err(|e| Error::io(&source_id, &e))?;
            let parsed = parse_source(&source_id, &source)?;
            log::debug!("{source_id}: {} declaration(s)", parsed.len());
            registry = registry.merge(&parsed)?;
        }
        log::info!(
            "parsed {} declaration(s) from {} file(s)",
            registry.len(),
            files.len()
        );
        Ok(registry)
    }

    /// Renders the registry.
    ///
    /// # Errors
    /// Returns the first rendering error.
    pub fn render(&self, registry: &DeclarationRegistry) -> Result<RenderOutput> {
        self.renderer.render(registry)
    }

    /// Writes every artifact to its resolved path.
    ///
    /// All paths are resolved before the first file is written, so a
    /// resolution failure leaves the output untouched.
    ///
    /// # Errors
    /// Returns the first resolution or write error.
    pub fn write(&self, output: &RenderOutput) -> Result<Vec<PathBuf>> {
        let targets = output
            .iter()
            .map(|artifact| Ok((self.resolver.resolve(&artifact.identifier)?, artifact)))
            .collect::<Result<Vec<_>>>()?;

        let mut written = Vec::with_capacity(targets.len());
        for (path, artifact) in targets {
            let display = path.display().to_string();
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).map_err(|e| Error::io(&display, &e))?;
            }
            fs::write(&path, &artifact.code).map_err(|e| Error::io(&display, &e))?;
            log::debug!("wrote {display}");
            written.push(path);
        }
        log::info!("wrote {} file(s)", written.len());
        Ok(written)
    }

    /// Discovers, parses, renders and writes.
    ///
    /// Nothing is written unless parsing and rendering both succeed.
    ///
    /// # Errors
    /// Returns the first error of any stage.
    pub fn run(&self) -> Result<CompileSummary> {
        let files = self.discover()?;
        let registry = self.parse_all(&files)?;
        let output = self.render(&registry)?;
        let written = self.write(&output)?;
        Ok(CompileSummary {
            files: files.len(),
            declarations: registry.len(),
            written,
        })
    }
}
