//! Report Sinks
//!
//! The reporter never prints directly; it writes headings, text lines and
//! tables to a [`ReportSink`] supplied by the caller.

use eeg_table::Table;
use std::io::{self, Write};

/// Destination for human-readable report output
pub trait ReportSink {
    /// Section heading
    fn heading(&mut self, title: &str) -> io::Result<()>;

    /// One line of text
    fn line(&mut self, text: &str) -> io::Result<()>;

    /// A full table
    fn table(&mut self, table: &Table) -> io::Result<()>;
}

/// Writes a plain-text report to any [`Write`] target
pub struct WriterSink<W: Write> {
    writer: W,
}

impl<W: Write> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Recover the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl WriterSink<io::Stdout> {
    /// Sink printing to standard output
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> ReportSink for WriterSink<W> {
    fn heading(&mut self, title: &str) -> io::Result<()> {
        writeln!(self.writer, "### {}:", title)
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", text)
    }

    fn table(&mut self, table: &Table) -> io::Result<()> {
        self.writer.write_all(render_table(table).as_bytes())?;
        self.writer.flush()
    }
}

/// One captured report entry
#[derive(Debug, Clone, PartialEq)]
pub enum ReportEntry {
    Heading(String),
    Line(String),
    Table(Table),
}

/// Collects entries in memory instead of displaying them
#[derive(Debug, Default)]
pub struct MemorySink {
    pub entries: Vec<ReportEntry>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Headings in emission order
    pub fn headings(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                ReportEntry::Heading(h) => Some(h.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Text lines in emission order
    pub fn lines(&self) -> Vec<&str> {
        self.entries
            .iter()
            .filter_map(|e| match e {
                ReportEntry::Line(l) => Some(l.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ReportSink for MemorySink {
    fn heading(&mut self, title: &str) -> io::Result<()> {
        self.entries.push(ReportEntry::Heading(title.to_string()));
        Ok(())
    }

    fn line(&mut self, text: &str) -> io::Result<()> {
        self.entries.push(ReportEntry::Line(text.to_string()));
        Ok(())
    }

    fn table(&mut self, table: &Table) -> io::Result<()> {
        self.entries.push(ReportEntry::Table(table.clone()));
        Ok(())
    }
}

fn format_line<'a>(values: impl Iterator<Item = &'a str>, widths: &[usize]) -> String {
    let padded: Vec<String> = values
        .zip(widths)
        .map(|(v, &w)| format!("{:<w$}", v, w = w))
        .collect();
    let mut line = padded.join("  ").trim_end().to_string();
    line.push('\n');
    line
}

/// Render a table as left-aligned text columns with a header line
pub fn render_table(table: &Table) -> String {
    let cells: Vec<Vec<String>> = table
        .rows()
        .iter()
        .map(|row| row.iter().map(|v| v.to_string()).collect())
        .collect();

    let widths: Vec<usize> = table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            cells
                .iter()
                .map(|row| row[i].chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = format_line(table.columns().iter().map(String::as_str), &widths);
    for row in &cells {
        out.push_str(&format_line(row.iter().map(String::as_str), &widths));
    }
    out
}
