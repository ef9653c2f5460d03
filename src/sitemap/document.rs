// src/sitemap/document.rs
// =============================================================================
// Parses a sitemap body and decides what kind of sitemap it is.
//
// Two shapes exist in the sitemap 0.9 schema:
//
//   <sitemapindex xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//     <sitemap><loc>https://example.com/posts.xml</loc></sitemap>
//   </sitemapindex>
//
//   <urlset xmlns="http://www.sitemaps.org/schemas/sitemap/0.9">
//     <url><loc>https://example.com/</loc></url>
//   </urlset>
//
// Only elements bound to the sitemap namespace count. A <url> without that
// namespace is just some other XML and is ignored.
//
// We stream the document with quick-xml's NsReader instead of building a
// tree: sitemaps can hold 50,000 entries and all we need are counts.
// =============================================================================

use quick_xml::escape::unescape;
use quick_xml::events::Event;
use quick_xml::name::{Namespace, ResolveResult};
use quick_xml::NsReader;

use super::fetch::SkipReason;

/// Namespace every sitemap element must be bound to.
pub const SITEMAP_NS: &[u8] = b"http://www.sitemaps.org/schemas/sitemap/0.9";

// What a successfully parsed sitemap turned out to be
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SitemapDocument {
    /// Points at other sitemaps. `children` holds each `<sitemap><loc>`.
    Index { children: Vec<String> },
    /// Lists pages directly. `urls` is the number of `<url>` elements.
    Leaf { urls: usize },
}

impl SitemapDocument {
    // Parses raw bytes into a classified document
    //
    // Any XML error, an unclosed element, or a body with no root element at
    // all counts as malformed.
    pub fn parse(body: &[u8]) -> Result<Self, SkipReason> {
        let mut reader = NsReader::from_reader(body);
        reader.config_mut().trim_text(true);

        let mut buf = Vec::new();
        let mut depth: usize = 0;
        let mut saw_root = false;

        let mut urls = 0usize;
        let mut sitemap_elements = 0usize;
        let mut children = Vec::new();

        // Depth of the <sitemap> we are inside, so we only pick up <loc>
        // elements that are its direct children.
        let mut open_sitemap: Option<usize> = None;
        let mut loc_text: Option<String> = None;

        loop {
            let (ns, event) = reader
                .read_resolved_event_into(&mut buf)
                .map_err(|e| SkipReason::Malformed(e.to_string()))?;
            let in_sitemap_ns = matches!(ns, ResolveResult::Bound(Namespace(uri)) if uri == SITEMAP_NS);

            match event {
                Event::Start(e) => {
                    saw_root = true;
                    depth += 1;
                    if in_sitemap_ns {
                        match e.local_name().as_ref() {
                            b"url" => urls += 1,
                            b"sitemap" => {
                                sitemap_elements += 1;
                                open_sitemap = Some(depth);
                            }
                            b"loc" if open_sitemap == Some(depth - 1) => {
                                loc_text = Some(String::new());
                            }
                            _ => {}
                        }
                    }
                }
                Event::Empty(e) => {
                    saw_root = true;
                    if in_sitemap_ns {
                        match e.local_name().as_ref() {
                            b"url" => urls += 1,
                            b"sitemap" => sitemap_elements += 1,
                            _ => {}
                        }
                    }
                }
                Event::Text(text) => {
                    if let Some(loc) = loc_text.as_mut() {
                        push_loc_text(loc, &text);
                    }
                }
                Event::CData(data) => {
                    if let Some(loc) = loc_text.as_mut() {
                        loc.push_str(&String::from_utf8_lossy(&data));
                    }
                }
                Event::End(e) => {
                    if in_sitemap_ns {
                        match e.local_name().as_ref() {
                            b"loc" => {
                                if let Some(loc) = loc_text.take() {
                                    let loc = loc.trim();
                                    if !loc.is_empty() {
                                        children.push(loc.to_string());
                                    }
                                }
                            }
                            b"sitemap" if open_sitemap == Some(depth) => open_sitemap = None,
                            _ => {}
                        }
                    }
                    depth = depth.saturating_sub(1);
                }
                Event::Eof => break,
                _ => {}
            }
            buf.clear();
        }

        if !saw_root {
            return Err(SkipReason::Malformed("document has no root element".to_string()));
        }
        if depth != 0 {
            return Err(SkipReason::Malformed("unexpected end of document".to_string()));
        }

        if sitemap_elements > 0 {
            Ok(SitemapDocument::Index { children })
        } else {
            Ok(SitemapDocument::Leaf { urls })
        }
    }

    /// Number of pages this document lists directly. Zero for an index.
    pub fn url_count(&self) -> usize {
        match self {
            SitemapDocument::Index { .. } => 0,
            SitemapDocument::Leaf { urls } => *urls,
        }
    }
}

// Appends <loc> text, decoding bytes that aren't valid UTF-8 lossily
//
// Bodies are read as UTF-8. A loc from a Latin-1 document keeps its ASCII
// parts and gets replacement characters for the rest, instead of failing the
// whole index.
fn push_loc_text(loc: &mut String, raw: &[u8]) {
    let decoded = String::from_utf8_lossy(raw);
    match unescape(&decoded) {
        Ok(unescaped) => loc.push_str(&unescaped),
        Err(_) => loc.push_str(&decoded),
    }
}
