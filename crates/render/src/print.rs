//! Single-household print documents and the surfaces they are printed on.

use crate::error::Result;
use crate::html::block_id;
use scraper::{Html, Selector};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};
use std::thread::JoinHandle;

/// Title of every print document.
pub const PRINT_TITLE: &str = "户籍信息打印";

const PRINT_STYLE: &str = r"
body { font-family: Arial, sans-serif; margin: 0; padding: 20px; }
.household-item { border: 1px solid #e0e0e0; border-radius: 8px; padding: 20px; background-color: #fafafa; }
.household-header { margin-bottom: 15px; padding-bottom: 10px; border-bottom: 1px solid #e0e0e0; }
.household-header h3 { color: #2c3e50; }
.member-list { margin-top: 15px; }
.member-item { display: grid; grid-template-columns: 1fr 1fr 1fr 1fr; gap: 10px; padding: 10px; background-color: white; border-radius: 4px; margin-bottom: 8px; border-left: 4px solid #3498db; }
.member-item .label { font-weight: bold; color: #555; }
.member-item .value { color: #333; }
";

/// Copy the household block at `index` out of a rendered container, without
/// its print buttons.
///
/// Returns `None` when the container has no such block.
pub fn extract_block(container: &str, index: usize) -> Option<String> {
    let block_selector = Selector::parse(&format!("#{}", block_id(index))).ok()?;
    let button_selector = Selector::parse(".print-btn").ok()?;

    let fragment = Html::parse_fragment(container);
    let block = fragment.select(&block_selector).next()?;

    let mut html = block.html();
    for button in block.select(&button_selector) {
        html = html.replacen(&button.html(), "", 1);
    }
    Some(html)
}

/// Wrap an extracted block in a standalone print document.
pub fn print_document(block_html: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="zh-CN">
<head>
<meta charset="UTF-8">
<title>{PRINT_TITLE}</title>
<style>{PRINT_STYLE}</style>
</head>
<body>
<div style="width: 100%; padding: 20px;">{block_html}</div>
</body>
</html>
"#
    )
}

/// Somewhere print documents can be opened, printed and closed.
pub trait PrintHost {
    type Surface<'a>: PrintSurface
    where
        Self: 'a;

    /// Open a fresh surface for the household block at `index`.
    fn open(&mut self, index: usize) -> Result<Self::Surface<'_>>;
}

/// One open print surface.
pub trait PrintSurface {
    /// Load the document into the surface.
    fn write(&mut self, document: &str) -> Result<()>;

    /// Start printing. Does not wait for the print to finish.
    fn print(&mut self) -> Result<()>;

    /// Close the surface.
    fn close(self) -> Result<()>;
}

/// Writes each print document to `household-{index}.html` in a directory and
/// optionally hands the file to a print command.
#[derive(Debug, Clone)]
pub struct FilePrintHost {
    out_dir: PathBuf,
    print_command: Option<String>,
    written: Vec<PathBuf>,
}

impl FilePrintHost {
    pub fn new(out_dir: impl Into<PathBuf>) -> Self {
        Self {
            out_dir: out_dir.into(),
            print_command: None,
            written: Vec::new(),
        }
    }

    /// Run `command <file>` when a document is printed, e.g. `lp`.
    #[must_use]
    pub fn with_print_command(mut self, command: impl Into<String>) -> Self {
        self.print_command = Some(command.into());
        self
    }

    /// Files written so far.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl PrintHost for FilePrintHost {
    type Surface<'a> = FileSurface<'a>;

    fn open(&mut self, index: usize) -> Result<Self::Surface<'_>> {
        std::fs::create_dir_all(&self.out_dir)?;
        let path = self.out_dir.join(format!("{}.html", block_id(index)));
        let writer = BufWriter::new(File::create(&path)?);
        self.written.push(path.clone());
        Ok(FileSurface {
            path,
            writer,
            print_command: self.print_command.as_deref(),
        })
    }
}

/// A print document file being written.
#[derive(Debug)]
pub struct FileSurface<'a> {
    path: PathBuf,
    writer: BufWriter<File>,
    print_command: Option<&'a str>,
}

impl FileSurface<'_> {
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl PrintSurface for FileSurface<'_> {
    fn write(&mut self, document: &str) -> Result<()> {
        self.writer.write_all(document.as_bytes())?;
        Ok(())
    }

    fn print(&mut self) -> Result<()> {
        self.writer.flush()?;
        if let Some(command) = self.print_command {
            // Printing does not block on the command; the reaper thread is detached.
            send_to_printer(command, &self.path)?;
        }
        Ok(())
    }

    fn close(mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Start `command <path>` and wait for it on a background thread, so the
/// child is reaped even when the host outlives many print jobs.
fn send_to_printer(command: &str, path: &Path) -> Result<JoinHandle<Option<ExitStatus>>> {
    let mut child = Command::new(command).arg(path).spawn()?;
    let pid = child.id();
    tracing::info!(command, pid, path = %path.display(), "sent to printer");

    let command = command.to_string();
    let reaper = std::thread::spawn(move || match child.wait() {
        Ok(status) => {
            if !status.success() {
                tracing::warn!(command = %command, pid, %status, "print command failed");
            }
            Some(status)
        }
        Err(e) => {
            tracing::warn!(command = %command, pid, error = %e, "could not wait on print command");
            None
        }
    });
    Ok(reaper)
}

/// A print job captured by [`MemoryPrintHost`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PrintJob {
    pub index: usize,
    pub document: String,
    pub printed: bool,
    pub closed: bool,
}

/// Keeps print documents in memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryPrintHost {
    jobs: Vec<PrintJob>,
}

impl MemoryPrintHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn jobs(&self) -> &[PrintJob] {
        &self.jobs
    }

    pub fn into_jobs(self) -> Vec<PrintJob> {
        self.jobs
    }
}

impl PrintHost for MemoryPrintHost {
    type Surface<'a> = MemorySurface<'a>;

    fn open(&mut self, index: usize) -> Result<Self::Surface<'_>> {
        self.jobs.push(PrintJob {
            index,
            ..PrintJob::default()
        });
        let job = self.jobs.len() - 1;
        Ok(MemorySurface { host: self, job })
    }
}

/// A surface backed by a [`PrintJob`].
#[derive(Debug)]
pub struct MemorySurface<'a> {
    host: &'a mut MemoryPrintHost,
    job: usize,
}

impl MemorySurface<'_> {
    fn job(&mut self) -> &mut PrintJob {
        &mut self.host.jobs[self.job]
    }
}

impl PrintSurface for MemorySurface<'_> {
    fn write(&mut self, document: &str) -> Result<()> {
        self.job().document.push_str(document);
        Ok(())
    }

    fn print(&mut self) -> Result<()> {
        self.job().printed = true;
        Ok(())
    }

    fn close(mut self) -> Result<()> {
        self.job().closed = true;
        Ok(())
    }
}
