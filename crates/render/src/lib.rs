//! # huji-render
//!
//! HTML presentation of households.
//!
//! [`HtmlRenderer`] renders every household into a container of blocks with
//! ids `household-0`, `household-1`, ... in sorted order, and prints a single
//! block by copying it out of that container into a standalone document.
//!
//! ```
//! use huji_core::Household;
//! use huji_render::{HtmlRenderer, MemoryPrintHost, Renderer};
//!
//! let mut renderer = HtmlRenderer::new();
//! renderer.render_all(&[Household::new("1", "幸福路8号")]);
//!
//! let mut host = MemoryPrintHost::new();
//! assert!(renderer.print_one(0, &mut host)?);
//! assert!(!renderer.print_one(5, &mut host)?);
//! assert_eq!(host.jobs().len(), 1);
//! # Ok::<(), huji_render::RenderError>(())
//! ```

mod error;
mod html;
mod print;
mod renderer;

pub use error::{RenderError, Result};
pub use html::{block_id, escape_html, render_households, render_page, NO_DATA_HTML};
pub use print::{
    extract_block, print_document, FilePrintHost, FileSurface, MemoryPrintHost, MemorySurface,
    PrintHost, PrintJob, PrintSurface, PRINT_TITLE,
};
pub use renderer::{HtmlRenderer, Renderer};
