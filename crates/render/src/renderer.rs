use crate::error::Result;
use crate::html::{render_households, render_page, NO_DATA_HTML};
use crate::print::{extract_block, print_document, PrintHost, PrintSurface};
use huji_core::Household;

/// Presents households and prints one of them.
pub trait Renderer {
    /// Replace everything previously rendered with `households`.
    fn render_all(&mut self, households: &[Household]);

    /// Print the rendered block at `index` on a new surface from `host`.
    ///
    /// Returns `Ok(false)` without touching `host` when there is no such block.
    fn print_one<H: PrintHost>(&self, index: usize, host: &mut H) -> Result<bool>;
}

/// Renders into an in-memory HTML container.
///
/// Printing reads the container, not the households it was rendered from, so
/// edits made through [`HtmlRenderer::container_mut`] show up in print.
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    container: String,
    blocks: usize,
}

impl Default for HtmlRenderer {
    fn default() -> Self {
        Self {
            container: NO_DATA_HTML.to_string(),
            blocks: 0,
        }
    }
}

impl HtmlRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current container markup.
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Mutable access to the container markup.
    pub fn container_mut(&mut self) -> &mut String {
        &mut self.container
    }

    /// Number of household blocks from the last render.
    pub fn block_count(&self) -> usize {
        self.blocks
    }

    /// The container wrapped in the full review page.
    pub fn page(&self, extra: &str) -> String {
        render_page(&self.container, extra)
    }
}

impl Renderer for HtmlRenderer {
    fn render_all(&mut self, households: &[Household]) {
        self.container = render_households(households);
        self.blocks = households.len();
        tracing::debug!(households = self.blocks, "rendered households");
    }

    fn print_one<H: PrintHost>(&self, index: usize, host: &mut H) -> Result<bool> {
        let Some(block) = extract_block(&self.container, index) else {
            tracing::debug!(index, "no household block to print");
            return Ok(false);
        };

        let document = print_document(&block);
        let mut surface = host.open(index)?;
        surface.write(&document)?;
        surface.print()?;
        surface.close()?;

        tracing::info!(index, "printed household");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::print::MemoryPrintHost;
    use huji_core::Member;

    fn households() -> Vec<Household> {
        let mut first = Household::new("1", "");
        first.members.push(Member {
            name: "A".to_string(),
            ..Member::default()
        });
        let mut second = Household::new("2", "X");
        second.members.push(Member {
            name: "C".to_string(),
            ..Member::default()
        });
        vec![first, second]
    }

    #[test]
    fn test_starts_with_placeholder() {
        let renderer = HtmlRenderer::new();
        assert_eq!(renderer.container(), NO_DATA_HTML);
        assert_eq!(renderer.block_count(), 0);
    }

    #[test]
    fn test_render_all_replaces_previous_output() {
        let mut renderer = HtmlRenderer::new();
        renderer.render_all(&households());
        assert_eq!(renderer.block_count(), 2);
        assert!(renderer.container().contains("household-1"));

        renderer.render_all(&households()[..1]);
        assert_eq!(renderer.block_count(), 1);
        assert!(!renderer.container().contains("household-1"));

        renderer.render_all(&[]);
        assert_eq!(renderer.container(), NO_DATA_HTML);
    }

    #[test]
    fn test_print_one_opens_prints_closes() {
        let mut renderer = HtmlRenderer::new();
        renderer.render_all(&households());

        let mut host = MemoryPrintHost::new();
        assert!(renderer.print_one(1, &mut host).unwrap());

        let jobs = host.jobs();
        assert_eq!(jobs.len(), 1);
        assert_eq!(jobs[0].index, 1);
        assert!(jobs[0].printed);
        assert!(jobs[0].closed);
        assert!(jobs[0].document.contains("户号：2 | 地址：X"));
        assert!(!jobs[0].document.contains("print-btn"));
    }

    #[test]
    fn test_print_out_of_range_is_noop() {
        let mut renderer = HtmlRenderer::new();
        renderer.render_all(&households());

        let mut host = MemoryPrintHost::new();
        assert!(!renderer.print_one(2, &mut host).unwrap());
        assert!(!renderer.print_one(usize::MAX, &mut host).unwrap());
        assert!(host.jobs().is_empty());
    }

    #[test]
    fn test_print_before_render_is_noop() {
        let renderer = HtmlRenderer::new();
        let mut host = MemoryPrintHost::new();
        assert!(!renderer.print_one(0, &mut host).unwrap());
        assert!(host.jobs().is_empty());
    }

    #[test]
    fn test_print_reflects_container_edits() {
        let mut renderer = HtmlRenderer::new();
        renderer.render_all(&households());
        let edited = renderer.container().replace(
            r#"<span class="value">A</span>"#,
            r#"<span class="value">A (edited)</span>"#,
        );
        *renderer.container_mut() = edited;

        let mut host = MemoryPrintHost::new();
        renderer.print_one(0, &mut host).unwrap();
        assert!(host.jobs()[0].document.contains("A (edited)"));
    }
}
