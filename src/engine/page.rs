use unicode_segmentation::UnicodeSegmentation;
use unicode_width::UnicodeWidthStr;

use crate::engine::select::Selection;
use crate::model::item::{ItemKey, Pool};

/// Display columns taken by the status-marker gutter (`"[x] "`). Wrapped
/// continuation rows are indented by this much so body text stays aligned.
const GUTTER: usize = 4;

/// One item's slot on a page and the number of rows it occupies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageEntry {
    pub key: ItemKey,
    pub rows: usize,
}

/// A contiguous run of selection entries that fits one screen.
#[derive(Debug, Clone, Default)]
pub struct Page {
    pub entries: Vec<PageEntry>,
}

impl Page {
    pub fn height(&self) -> usize {
        self.entries.iter().map(|e| e.rows).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// The full paging of the current selection, plus which page holds the
/// cursor. Rebuilt every render pass.
#[derive(Debug, Clone, Default)]
pub struct Paged {
    pub pages: Vec<Page>,
    pub current: usize,
}

impl Paged {
    pub fn current_page(&self) -> Option<&Page> {
        self.pages.get(self.current)
    }
}

/// Partition the selection into height-bounded pages by greedy accumulation:
/// when appending the next block would overflow the page, close it and start
/// a new one with that block. The cursor's page is recorded in the same
/// pass. A block taller than the whole page gets a page to itself.
pub fn paginate(pool: &Pool, selection: &Selection, width: usize, height: usize) -> Paged {
    let height = height.max(1);
    let cursor = selection.cursor();

    let mut pages: Vec<Page> = Vec::new();
    let mut open = Page::default();
    let mut current = 0;

    for (idx, &key) in selection.keys().iter().enumerate() {
        let label = pool.get(key).map(|i| i.display_label()).unwrap_or_default();
        let rows = wrap_label(&label, width).len();

        if !open.is_empty() && open.height() + rows > height {
            pages.push(std::mem::take(&mut open));
        }
        open.entries.push(PageEntry { key, rows });

        if cursor == Some(idx) {
            current = pages.len();
        }
    }

    if !open.is_empty() || pages.is_empty() {
        pages.push(open);
    }

    Paged { pages, current }
}

/// Wrap a rendered item label (`"[x] body text"`) to `width` columns. The
/// first row keeps the status marker; continuation rows carry a blank gutter
/// of the same width.
pub fn wrap_label(label: &str, width: usize) -> Vec<String> {
    let width = width.max(GUTTER + 1);
    // back off to a char boundary: the byte after the marker may start a
    // multibyte character
    let mut cut = GUTTER.min(label.len());
    while !label.is_char_boundary(cut) {
        cut -= 1;
    }
    let (marker, body) = label.split_at(cut);

    let body_rows = wrap_text(body, width - GUTTER);
    body_rows
        .into_iter()
        .enumerate()
        .map(|(i, row)| {
            if i == 0 {
                format!("{marker}{row}")
            } else {
                format!("{}{row}", " ".repeat(GUTTER))
            }
        })
        .collect()
}

/// Greedy word wrap by display width; words wider than a whole row fall back
/// to character wrapping.
fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    if text.width() <= width {
        return vec![text.to_string()];
    }

    let mut rows = Vec::new();
    let mut row = String::new();
    let mut row_width = 0;

    for word in text.split(' ') {
        let mut word = word;
        loop {
            let word_width = word.width();
            let sep = usize::from(!row.is_empty());

            if row_width + sep + word_width <= width {
                if sep == 1 {
                    row.push(' ');
                    row_width += 1;
                }
                row.push_str(word);
                row_width += word_width;
                break;
            }

            if row.is_empty() {
                let (head, tail) = split_at_width(word, width);
                rows.push(head.to_string());
                word = tail;
                if word.is_empty() {
                    break;
                }
                continue;
            }

            rows.push(std::mem::take(&mut row));
            row_width = 0;
        }
    }

    if !row.is_empty() || rows.is_empty() {
        rows.push(row);
    }
    rows
}

/// Split a word at the last grapheme boundary that fits `width` columns,
/// always taking at least one grapheme so progress is guaranteed.
fn split_at_width(word: &str, width: usize) -> (&str, &str) {
    let mut taken = 0;
    let mut end = 0;
    for (offset, g) in word.grapheme_indices(true) {
        let w = g.width();
        if end > 0 && taken + w > width {
            break;
        }
        end = offset + g.len();
        taken += w;
        if taken >= width {
            break;
        }
    }
    word.split_at(end)
}
