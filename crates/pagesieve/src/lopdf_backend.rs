//! lopdf-based PDF backend.
//!
//! Implements [`PdfBackend`] with the [lopdf](https://crates.io/crates/lopdf)
//! crate: documents are opened from disk, page text comes from
//! `Document::extract_text`, and matched pages are copied into the output by
//! grafting the source's renumbered object table and attaching the chosen
//! page objects to a freshly built page tree at save time.

use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

use lopdf::{Object, ObjectId, dictionary};

use crate::backend::PdfBackend;
use crate::error::BackendError;

/// Monotonic token so the output accumulator can tell source documents
/// apart and graft each one's objects only once.
static NEXT_SOURCE_TOKEN: AtomicU64 = AtomicU64::new(1);

/// Page dictionary keys that may be inherited from ancestor page-tree nodes
/// and must be materialized onto a page before its tree is discarded.
const INHERITABLE_KEYS: [&[u8]; 4] = [b"Resources", b"MediaBox", b"CropBox", b"Rotate"];

/// Upper bound on the `/Parent` walk; a malformed document can contain a
/// cyclic parent chain, which must not hang the scan.
const MAX_PARENT_DEPTH: usize = 64;

/// An opened source PDF backed by lopdf.
pub struct LopdfSource {
    inner: lopdf::Document,
    /// Page ObjectIds in document order (index 0 is page 1).
    page_ids: Vec<ObjectId>,
    token: u64,
}

impl std::fmt::Debug for LopdfSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LopdfSource")
            .field("page_count", &self.page_ids.len())
            .finish_non_exhaustive()
    }
}

/// The growing output document.
///
/// Appended pages are registered in order; the page tree, catalog, and
/// trailer are only assembled at save time, so a failed append never leaves
/// the accumulator in a broken state.
pub struct OutputAccumulator {
    doc: lopdf::Document,
    /// Appended page ObjectIds, in discovery order.
    page_ids: Vec<ObjectId>,
    /// Source token → that source's renumbered page ids (0-based order).
    grafts: HashMap<u64, Vec<ObjectId>>,
}

/// The lopdf-backed [`PdfBackend`] implementation. This is the default
/// backend used by the scanner.
pub struct LopdfBackend;

impl PdfBackend for LopdfBackend {
    type Document = LopdfSource;
    type Output = OutputAccumulator;
    type Error = BackendError;

    fn open(path: &Path) -> Result<Self::Document, Self::Error> {
        let inner = lopdf::Document::load(path)
            .map_err(|e| BackendError::Open(format!("failed to parse PDF: {e}")))?;

        if inner.is_encrypted() {
            return Err(BackendError::Open("PDF is encrypted".to_string()));
        }

        // get_pages returns BTreeMap<u32, ObjectId> with 1-based keys.
        let page_ids: Vec<ObjectId> = inner.get_pages().into_values().collect();

        Ok(LopdfSource {
            inner,
            page_ids,
            token: NEXT_SOURCE_TOKEN.fetch_add(1, Ordering::Relaxed),
        })
    }

    fn page_count(doc: &Self::Document) -> usize {
        doc.page_ids.len()
    }

    fn page_text(doc: &Self::Document, index: usize) -> Result<String, Self::Error> {
        if index >= doc.page_ids.len() {
            return Err(BackendError::Extract {
                page: index,
                message: format!("page index out of range (0..{})", doc.page_ids.len()),
            });
        }
        doc.inner
            .extract_text(&[index as u32 + 1])
            .map_err(|e| BackendError::Extract {
                page: index,
                message: e.to_string(),
            })
    }

    fn new_output() -> Self::Output {
        OutputAccumulator {
            doc: lopdf::Document::with_version("1.5"),
            page_ids: Vec::new(),
            grafts: HashMap::new(),
        }
    }

    fn append_page(
        out: &mut Self::Output,
        doc: &Self::Document,
        index: usize,
    ) -> Result<(), Self::Error> {
        out.append_page(doc, index)
    }

    fn output_page_count(out: &Self::Output) -> usize {
        out.page_ids.len()
    }

    fn save_output(out: &mut Self::Output, path: &Path) -> Result<(), Self::Error> {
        out.save(path)
    }
}

impl OutputAccumulator {
    /// Append one page of `source` by copy.
    ///
    /// The first page appended from a given source grafts that source's
    /// whole renumbered object table (minus its Catalog/Pages/Outlines
    /// structure) into the accumulator; subsequent pages from the same
    /// source only register another page id. Objects belonging to pages
    /// that are never appended are pruned at save time.
    fn append_page(&mut self, source: &LopdfSource, index: usize) -> Result<(), BackendError> {
        if !self.grafts.contains_key(&source.token) {
            let pages = self.graft_source(source, index)?;
            self.grafts.insert(source.token, pages);
        }
        let pages = &self.grafts[&source.token];
        let page_id = *pages.get(index).ok_or_else(|| BackendError::CopyPage {
            page: index,
            message: format!("page index out of range (0..{})", pages.len()),
        })?;
        self.page_ids.push(page_id);
        Ok(())
    }

    /// Copy `source`'s objects into the accumulator, renumbered past the
    /// accumulator's current id space. Returns the renumbered page ids in
    /// document order. `requested` is only used for error context.
    fn graft_source(
        &mut self,
        source: &LopdfSource,
        requested: usize,
    ) -> Result<Vec<ObjectId>, BackendError> {
        let mut clone = source.inner.clone();
        clone.renumber_objects_with(self.doc.max_id + 1);

        let page_ids: Vec<ObjectId> = clone.get_pages().into_values().collect();

        // Materialize inheritable attributes onto each page dictionary
        // before the source page tree is dropped, then cut the page loose
        // from its old parent.
        for &page_id in &page_ids {
            let mut inherited: Vec<(&[u8], Object)> = Vec::new();
            {
                let dict = clone
                    .get_object(page_id)
                    .and_then(|o| o.as_dict())
                    .map_err(|e| {
                        BackendError::CopyPage {
                            page: requested,
                            message: format!("failed to get page dictionary: {e}"),
                        }
                    })?;
                for key in INHERITABLE_KEYS {
                    if dict.get(key).is_err() {
                        if let Some(value) = resolve_inherited(&clone, page_id, key)
                            .map_err(|message| BackendError::CopyPage {
                                page: requested,
                                message,
                            })?
                        {
                            inherited.push((key, value.clone()));
                        }
                    }
                }
            }
            let dict = clone
                .get_object_mut(page_id)
                .and_then(|o| o.as_dict_mut())
                .map_err(|e| BackendError::CopyPage {
                    page: requested,
                    message: format!("failed to get page dictionary: {e}"),
                })?;
            for (key, value) in inherited {
                dict.set(key, value);
            }
            dict.remove(b"Parent");
        }

        // Carry everything except the source's document structure; the
        // output builds its own catalog and page tree at save time.
        self.doc.max_id = clone.max_id;
        for (id, object) in clone.objects {
            match dict_type(&object) {
                Some(b"Catalog") | Some(b"Pages") | Some(b"Outlines") | Some(b"Outline") => {}
                _ => {
                    self.doc.objects.insert(id, object);
                }
            }
        }

        Ok(page_ids)
    }

    /// Assemble the page tree and catalog, drop everything unreachable, and
    /// write the document to `path`.
    fn save(&mut self, path: &Path) -> Result<(), BackendError> {
        let kids: Vec<Object> = self.page_ids.iter().map(|id| Object::Reference(*id)).collect();
        let pages_id = self.doc.add_object(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => Object::Integer(self.page_ids.len() as i64),
        });

        for &page_id in &self.page_ids {
            let dict = self
                .doc
                .get_object_mut(page_id)
                .and_then(|o| o.as_dict_mut())
                .map_err(|e| BackendError::Write(format!("missing appended page: {e}")))?;
            dict.set("Parent", Object::Reference(pages_id));
        }

        let catalog_id = self.doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => Object::Reference(pages_id),
        });
        self.doc.trailer.set("Root", Object::Reference(catalog_id));

        // Unappended pages and their private resources are unreachable from
        // the new catalog; drop them before writing.
        self.doc.prune_objects();
        self.doc.renumber_objects();
        self.doc.compress();

        self.doc
            .save(path)
            .map_err(|e| BackendError::Write(e.to_string()))?;
        Ok(())
    }
}

/// Look up a key on a page dictionary, walking up the page tree via
/// `/Parent` when the key is not on the page itself. Errors are returned as
/// plain messages so the caller can attach page context.
fn resolve_inherited<'a>(
    doc: &'a lopdf::Document,
    page_id: ObjectId,
    key: &[u8],
) -> Result<Option<&'a Object>, String> {
    let mut current_id = page_id;
    for _ in 0..MAX_PARENT_DEPTH {
        let dict = doc
            .get_object(current_id)
            .and_then(|o| o.as_dict())
            .map_err(|e| format!("failed to get page dictionary: {e}"))?;

        if let Ok(value) = dict.get(key) {
            return Ok(Some(value));
        }

        match dict.get(b"Parent") {
            Ok(parent_obj) => {
                current_id = parent_obj
                    .as_reference()
                    .map_err(|e| format!("invalid /Parent reference: {e}"))?;
            }
            Err(_) => return Ok(None),
        }
    }
    Err("cyclic /Parent chain in page tree".to_string())
}

/// The `/Type` name of a dictionary or stream object, if it has one.
fn dict_type(object: &Object) -> Option<&[u8]> {
    let dict = match object {
        Object::Dictionary(dict) => dict,
        Object::Stream(stream) => &stream.dict,
        _ => return None,
    };
    dict.get(b"Type").ok()?.as_name().ok()
}
