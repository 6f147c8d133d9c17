//! Conversion driver: OSM XML document in, JSON lines out.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use roxmltree::Document;
use tracing::{info, warn};

use crate::config::StreetTables;
use crate::error::Result;
use crate::shaper::shape_element;
use crate::types::ShapedRecord;
use crate::xml::{is_shapeable, parsed_element};

/// What to do when a single element fails to shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ErrorPolicy {
    /// Log the failure, leave the record out and continue.
    #[default]
    SkipAndContinue,
    /// Abort on the first failing element.
    FailFast,
}

/// Options for [`process_map`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Write indented JSON instead of one record per line.
    pub pretty: bool,
    pub policy: ErrorPolicy,
}

/// Outcome of a conversion run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConversionSummary {
    /// Records produced.
    pub records: usize,
    /// Elements that do not produce records (`tag`, `nd`, `relation`, ...).
    pub skipped: usize,
    /// Elements left out because they failed to shape.
    pub failed: usize,
    /// One message per failed element.
    pub warnings: Vec<String>,
}

/// Shape every element of a document, handing each record to `sink` in
/// document order.
///
/// Element errors are handled according to `policy`; errors returned by
/// `sink` always abort.
pub fn for_each_record<F>(
    doc: &Document<'_>,
    tables: &StreetTables,
    policy: ErrorPolicy,
    mut sink: F,
) -> Result<ConversionSummary>
where
    F: FnMut(ShapedRecord) -> Result<()>,
{
    let mut summary = ConversionSummary::default();

    for node in doc.descendants().filter(|n| n.is_element()) {
        if !is_shapeable(node) {
            summary.skipped += 1;
            continue;
        }

        match shape_element(&parsed_element(node), tables) {
            Ok(Some(record)) => {
                sink(record)?;
                summary.records += 1;
            }
            Ok(None) => summary.skipped += 1,
            Err(e) if e.is_element_error() && policy == ErrorPolicy::SkipAndContinue => {
                warn!(error = %e, "skipping element");
                summary.failed += 1;
                summary.warnings.push(e.to_string());
            }
            Err(e) => return Err(e),
        }
    }

    Ok(summary)
}

/// Shape every element of a document and collect the records.
pub fn shape_document(
    doc: &Document<'_>,
    tables: &StreetTables,
    policy: ErrorPolicy,
) -> Result<(Vec<ShapedRecord>, ConversionSummary)> {
    let mut records = Vec::new();
    let summary = for_each_record(doc, tables, policy, |record| {
        records.push(record);
        Ok(())
    })?;
    Ok((records, summary))
}

/// Write one record as JSON followed by a newline.
///
/// Non-ASCII text is written as UTF-8, not escaped.
pub fn write_record<W: Write>(writer: &mut W, record: &ShapedRecord, pretty: bool) -> Result<()> {
    if pretty {
        serde_json::to_writer_pretty(&mut *writer, record)?;
    } else {
        serde_json::to_writer(&mut *writer, record)?;
    }
    writer.write_all(b"\n")?;
    Ok(())
}

/// Write records one after another.
pub fn write_records<'r, W, I>(writer: &mut W, records: I, pretty: bool) -> Result<()>
where
    W: Write,
    I: IntoIterator<Item = &'r ShapedRecord>,
{
    for record in records {
        write_record(writer, record, pretty)?;
    }
    Ok(())
}

/// Shape a parsed document straight into `writer`.
pub fn convert_document<W: Write>(
    doc: &Document<'_>,
    tables: &StreetTables,
    options: ConvertOptions,
    writer: &mut W,
) -> Result<ConversionSummary> {
    for_each_record(doc, tables, options.policy, |record| {
        write_record(&mut *writer, &record, options.pretty)
    })
}

/// Convert an OSM XML file into a JSON lines file.
///
/// # Arguments
/// * `input` - OSM XML file
/// * `output` - JSON file to create (overwritten if it exists)
/// * `tables` - Street tables used for street name normalization
/// * `options` - Output format and error policy
pub fn process_map(
    input: &Path,
    output: &Path,
    tables: &StreetTables,
    options: ConvertOptions,
) -> Result<ConversionSummary> {
    let xml = fs::read_to_string(input)?;
    let doc = Document::parse(&xml)?;

    let mut writer = BufWriter::new(File::create(output)?);
    let summary = convert_document(&doc, tables, options, &mut writer)?;
    writer.flush()?;

    info!(
        input = %input.display(),
        output = %output.display(),
        records = summary.records,
        failed = summary.failed,
        "conversion finished"
    );
    Ok(summary)
}
