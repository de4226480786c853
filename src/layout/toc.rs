//! Table of contents back-fill (layout phase 2).

use super::metrics::TextMeasure;
use super::{LayoutOptions, TocPages};
use crate::model::{DrawOp, Font, Page, TocEntry};
use serde::{Deserialize, Serialize};

/// Gap kept between an entry's text and its page number.
const NUMBER_GAP: f32 = 3.0;

/// Where the TOC entries go, recorded during phase 1.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TocAnchor {
    /// Numbers of the pages reserved for the TOC, in order
    pub pages: Vec<u32>,

    /// Baseline of the first entry on the first reserved page
    pub start_y: f32,
}

/// Number of entries that fit on one TOC page starting at `start_y`.
fn slots(start_y: f32, options: &LayoutOptions) -> usize {
    let bottom = options.geometry.content_bottom();
    if start_y > bottom {
        return 0;
    }
    ((bottom - start_y) / options.toc_line_height).floor() as usize + 1
}

/// Pages needed for `entry_count` entries under the configured policy.
pub fn pages_needed(entry_count: usize, start_y: f32, options: &LayoutOptions) -> usize {
    match options.toc_pages {
        TocPages::Single => 1,
        TocPages::Fit => {
            let first = slots(start_y, options);
            if entry_count <= first {
                return 1;
            }
            let per_page = slots(options.geometry.margin, options).max(1);
            1 + (entry_count - first).div_ceil(per_page)
        }
    }
}

/// Position of every entry as (index into `anchor.pages`, baseline).
fn placements(count: usize, anchor: &TocAnchor, options: &LayoutOptions) -> Vec<(usize, f32)> {
    let advance = options.toc_line_height;
    let mut out = Vec::with_capacity(count);
    let mut page = 0;
    let mut y = anchor.start_y;

    for _ in 0..count {
        let has_next = page + 1 < anchor.pages.len();
        if options.toc_pages == TocPages::Fit
            && has_next
            && y > options.geometry.content_bottom()
        {
            page += 1;
            y = options.geometry.margin;
        }
        out.push((page, y));
        y += advance;
    }
    out
}

/// Write the resolved entries onto the reserved TOC pages.
///
/// Only pages listed in `anchor` are touched; every other page is returned
/// unchanged.
pub fn patch_toc(
    mut pages: Vec<Page>,
    entries: &[TocEntry],
    anchor: &TocAnchor,
    options: &LayoutOptions,
) -> Vec<Page> {
    let geometry = &options.geometry;
    let measure = TextMeasure::new(Font::Regular, options.body_size, geometry);
    let right = geometry.content_right();

    if options.toc_pages == TocPages::Single
        && entries.len() > slots(anchor.start_y, options)
    {
        log::warn!(
            "Table of contents has {} entries but the reserved page holds {}; extra entries run past the margin",
            entries.len(),
            slots(anchor.start_y, options)
        );
    }

    for (entry, (slot, y)) in entries
        .iter()
        .zip(placements(entries.len(), anchor, options))
    {
        let Some(number) = anchor.pages.get(slot) else {
            continue;
        };
        let Some(page) = pages.iter_mut().find(|p| p.number == *number) else {
            log::warn!("TOC page {} is missing from the layout", number);
            continue;
        };

        let x = geometry.margin + (entry.level.max(1) - 1) as f32 * options.toc_indent;
        let label = entry.page.to_string();
        let label_x = right - measure.width(&label);
        let text = measure.truncate(&entry.text, label_x - NUMBER_GAP - x);

        page.push(DrawOp::Text {
            x,
            y,
            text,
            font: Font::Regular,
            size: options.body_size,
        });
        page.push(DrawOp::Text {
            x: label_x,
            y,
            text: label,
            font: Font::Regular,
            size: options.body_size,
        });
    }

    log::debug!(
        "Patched {} TOC entries onto {} page(s)",
        entries.len(),
        anchor.pages.len()
    );
    pages
}
