pub mod filter;
pub mod module;
pub mod modules;
pub mod recipe;

use tracing::{debug, info, warn};

use crate::error::ImageError;
use crate::image_buf::Image;
pub use filter::Filter;

/// One pipeline entry: a filter and the name it is reported under.
#[derive(Clone, Debug, PartialEq)]
pub struct Step {
    pub filter: Filter,
    pub name: String,
}

/// What happened when a pipeline ran.
#[derive(Debug, Default)]
pub struct PipelineReport {
    pub applied: Vec<String>,
    pub skipped: Vec<(String, ImageError)>,
}

impl PipelineReport {
    pub fn all_applied(&self) -> bool {
        self.skipped.is_empty()
    }
}

/// Ordered filter chain applied to a single image.
///
/// ```text
/// decode -> step 1 -> step 2 -> ... -> step n -> encode
/// ```
///
/// Steps run in insertion order against the same image, each seeing the
/// result of the ones before it. A step that fails validation is logged
/// and skipped without modifying the image; later steps still run.
#[derive(Clone, Debug, Default)]
pub struct Pipeline {
    steps: Vec<Step>,
}

impl Pipeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a step. Parameters are not validated until the step runs.
    pub fn add(&mut self, filter: Filter, name: impl Into<String>) {
        let name = name.into();
        info!(filter = %name, "added filter");
        self.steps.push(Step { filter, name });
    }

    /// Append a step under the filter's own name.
    pub fn push(&mut self, filter: Filter) {
        let name = filter.name();
        self.add(filter, name);
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    pub fn clear(&mut self) {
        self.steps.clear();
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn names(&self) -> Vec<&str> {
        self.steps.iter().map(|s| s.name.as_str()).collect()
    }

    /// Run every step in order against `image`.
    pub fn apply(&self, image: &mut Image) -> PipelineReport {
        let mut report = PipelineReport::default();
        if self.steps.is_empty() {
            info!("no filters to apply");
            return report;
        }

        let total = self.steps.len();
        info!(count = total, "applying filters");
        for (i, step) in self.steps.iter().enumerate() {
            info!(step = i + 1, total, filter = %step.name, "applying filter");
            let t0 = std::time::Instant::now();
            match step.filter.apply(image) {
                Ok(()) => {
                    debug!(
                        filter = %step.name,
                        elapsed_ms = t0.elapsed().as_millis(),
                        width = image.width(),
                        height = image.height(),
                        "filter done"
                    );
                    report.applied.push(step.name.clone());
                }
                Err(err) => {
                    warn!(filter = %step.name, error = %err, "filter skipped");
                    report.skipped.push((step.name.clone(), err));
                }
            }
        }

        if report.all_applied() {
            info!("all filters applied");
        } else {
            warn!(
                skipped = report.skipped.len(),
                total, "some filters were skipped"
            );
        }
        report
    }
}
