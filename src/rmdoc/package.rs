//! `.rmdoc` container packaging.
//!
//! An `.rmdoc` is a zip archive holding exactly `pageCount + 2` entries:
//! a content descriptor (`{id}.content`), notebook metadata
//! (`{id}.metadata`) and one serialized stroke page per
//! `{id}/{pageId}.rm`. Only the minimal descriptor fields the device
//! needs to accept the file are modeled.

use std::io::{Cursor, Write};

use serde::Serialize;
use tracing::debug;
use uuid::Uuid;
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

use crate::error::{Result, RmScribeError};

const RM_EXT: &str = ".rm";
const RMDOC_EXT: &str = ".rmdoc";
/// Display-name prefix the upload watcher prepends to generated files.
const NAME_PREFIX: &str = "out-";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimestampedStr {
    timestamp: &'static str,
    value: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TimestampedInt {
    timestamp: &'static str,
    value: i32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PageEntry {
    id: String,
    idx: TimestampedStr,
    template: TimestampedStr,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CPages {
    last_opened: TimestampedStr,
    original: TimestampedInt,
    pages: Vec<PageEntry>,
}

/// `{id}.content` descriptor: enumerates the pages and the notebook
/// geometry the device expects for a portrait A5-ratio notebook.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ContentDescriptor {
    c_pages: CPages,
    cover_page_number: i32,
    file_type: &'static str,
    format_version: i32,
    line_height: i32,
    margins: i32,
    orientation: &'static str,
    page_count: i32,
    size_in_bytes: String,
    text_alignment: &'static str,
    text_scale: i32,
    zoom_mode: &'static str,
}

/// `{id}.metadata` descriptor: display name and timestamps.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct NotebookMetadata {
    created_time: i64,
    last_modified: i64,
    last_opened: i64,
    last_opened_page: i32,
    parent: &'static str,
    pinned: bool,
    #[serde(rename = "type")]
    doc_type: &'static str,
    visible_name: String,
}

fn content_descriptor(page_ids: &[String], total_bytes: usize) -> ContentDescriptor {
    let pages = page_ids
        .iter()
        .enumerate()
        .map(|(i, id)| PageEntry {
            id: id.clone(),
            idx: TimestampedStr { timestamp: "1:2", value: format!("ba-{i}") },
            template: TimestampedStr { timestamp: "1:2", value: "Blank".to_string() },
        })
        .collect();

    ContentDescriptor {
        c_pages: CPages {
            last_opened: TimestampedStr {
                timestamp: "1:1",
                value: page_ids[0].clone(),
            },
            original: TimestampedInt { timestamp: "1:1", value: -1 },
            pages,
        },
        cover_page_number: -1,
        file_type: "notebook",
        format_version: 2,
        line_height: -1,
        margins: 125,
        orientation: "portrait",
        page_count: page_ids.len() as i32,
        size_in_bytes: total_bytes.to_string(),
        text_alignment: "justify",
        text_scale: 1,
        zoom_mode: "bestFit",
    }
}

fn notebook_metadata(visible_name: String, now: i64) -> NotebookMetadata {
    NotebookMetadata {
        created_time: now,
        last_modified: now,
        last_opened: now,
        last_opened_page: 0,
        parent: "",
        pinned: true,
        doc_type: "DocumentType",
        visible_name,
    }
}

/// Derive the display name from the container file name: base name minus
/// the `.rmdoc` extension and the conventional `out-` prefix.
fn visible_name_from(zip_name: &str) -> String {
    let base = zip_name.rsplit(['/', '\\']).next().unwrap_or(zip_name);
    let base = base.strip_suffix(RMDOC_EXT).unwrap_or(base);
    let base = base.strip_prefix(NAME_PREFIX).filter(|s| !s.is_empty()).unwrap_or(base);
    base.to_string()
}

/// Package serialized stroke pages into an `.rmdoc` container buffer.
///
/// `rm_name` is the stroke file name the pages were produced for; a
/// trailing `.rm` is replaced with `.rmdoc` to form the suggested
/// container file name (the second return value). Document and page
/// identifiers are freshly generated per call, so packaging the same
/// pages twice yields two distinct notebooks.
///
/// Any entry-write or JSON-encode failure is fatal to the call: a
/// partially written archive is unusable, so no buffer is returned.
pub fn create_rmdoc(rm_name: &str, pages: &[Vec<u8>]) -> Result<(Vec<u8>, String)> {
    if pages.is_empty() {
        return Err(RmScribeError::validation("cannot package a document with no pages"));
    }

    let zip_name = match rm_name.strip_suffix(RM_EXT) {
        Some(stem) => format!("{stem}{RMDOC_EXT}"),
        None => format!("{rm_name}{RMDOC_EXT}"),
    };
    let visible_name = visible_name_from(&zip_name);

    let notebook_id = Uuid::new_v4().to_string();
    let page_ids: Vec<String> = pages.iter().map(|_| Uuid::new_v4().to_string()).collect();
    let total_bytes: usize = pages.iter().map(Vec::len).sum();
    let now = chrono::Utc::now().timestamp();

    let content = serde_json::to_vec_pretty(&content_descriptor(&page_ids, total_bytes))?;
    let metadata = serde_json::to_vec_pretty(&notebook_metadata(visible_name, now))?;

    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default();

    writer.start_file(format!("{notebook_id}.content"), options)?;
    writer.write_all(&content)?;

    writer.start_file(format!("{notebook_id}.metadata"), options)?;
    writer.write_all(&metadata)?;

    for (page_id, data) in page_ids.iter().zip(pages) {
        writer.start_file(format!("{notebook_id}/{page_id}.rm"), options)?;
        writer.write_all(data)?;
    }

    let buffer = writer.finish()?.into_inner();
    debug!(
        notebook_id = %notebook_id,
        pages = pages.len(),
        bytes = buffer.len(),
        "packaged rmdoc container"
    );
    Ok((buffer, zip_name))
}
