use crate::error::RenderError;
use crate::filter::{project_filter, FilterRenderer, FilterWriter};
use crate::report::Reporter;
use crate::types::{FilterEntity, GeneratorConfig};
use std::io::Write;

/// Outcome counts of one generation batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationStats {
    /// Filters rendered and written
    pub written: usize,
    /// Filters that failed to render
    pub render_failures: usize,
    /// Filters rendered but not written
    pub write_failures: usize,
}

impl GenerationStats {
    pub fn merge(&mut self, other: GenerationStats) {
        self.written += other.written;
        self.render_failures += other.render_failures;
        self.write_failures += other.write_failures;
    }
}

/// Renders and writes filter classes for preprocessed entities
pub struct FilterGenerator {
    config: GeneratorConfig,
    renderer: FilterRenderer,
    writer: FilterWriter,
}

impl FilterGenerator {
    pub fn new(config: GeneratorConfig) -> Result<Self, RenderError> {
        let renderer = FilterRenderer::new()?;
        let writer = FilterWriter::new(&config);
        Ok(FilterGenerator {
            config,
            renderer,
            writer,
        })
    }

    /// Generate one file per entity
    ///
    /// A failure to render or write one entity is reported and the batch moves
    /// on to the next entity.
    pub fn generate<W: Write>(&mut self, entities: &[FilterEntity], reporter: &mut Reporter<W>) -> GenerationStats {
        let mut stats = GenerationStats::default();

        for entity in entities {
            let rendered = project_filter(entity, &self.config)
                .and_then(|projected| {
                    let text = self.renderer.render_projected(&projected)?;
                    Ok((projected.in_filter_model, text))
                });

            let (model, text) = match rendered {
                Ok(rendered) => rendered,
                Err(err) => {
                    reporter.error(format!(
                        "Filter `{}` generating was failed: {}",
                        entity.display_name(),
                        err
                    ));
                    stats.render_failures += 1;
                    continue;
                }
            };
            reporter.gen(format!(
                "Filter `{}` has been created successfully.",
                entity.display_name()
            ));

            let path = self
                .writer
                .destination(&self.config.file_name_for(&model), reporter);
            match self.writer.write(&path, &text, reporter) {
                Ok(absolute) => {
                    reporter.gen(format!(
                        "Filter `{}` has been written to file `{}`.",
                        entity.display_name(),
                        absolute.display()
                    ));
                    stats.written += 1;
                }
                Err(err) => {
                    reporter.error(err);
                    stats.write_failures += 1;
                }
            }
        }

        reporter.gen("It is finished.");
        stats
    }
}
