use std::fmt::{self, Write};
use thiserror::Error;
use unicode_width::UnicodeWidthStr;

/// A labelled link between two words of a diagram.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagramLink {
    pub left: usize,
    pub right: usize,
    pub label: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DiagramError {
    #[error("link {left}-{right} `{label}` must join two distinct words out of {words}")]
    InvalidLink {
        left: usize,
        right: usize,
        label: String,
        words: usize,
    },
}

/// Fixed-width ASCII rendering of a linkage.
///
/// ```text
///                 +-Os--+
///     +--Wd---+Ss-+ +Ds-+
///     |       |   | |   |
/// LEFT-WALL this is a test
/// ```
///
/// Each link is drawn between the anchors (centre columns) of its words and
/// stacked above every link it encloses. The `Display` impl writes the link
/// rows, the anchor bars and the word line; [`LinkDiagram::render`] adds the
/// blank lines the engine puts around a diagram.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkDiagram {
    words: Vec<String>,
    links: Vec<DiagramLink>,
}

struct Layout {
    gaps: Vec<usize>,
    anchors: Vec<usize>,
    width: usize,
    /// Row of each link, indexed like `LinkDiagram::links`. Row 0 sits on the bars.
    rows: Vec<usize>,
}

impl LinkDiagram {
    pub fn new<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words.into_iter().map(Into::into).collect(),
            links: Vec::new(),
        }
    }

    /// Add a link between the words at `left` and `right`.
    pub fn link(
        &mut self,
        left: usize,
        right: usize,
        label: impl Into<String>,
    ) -> Result<(), DiagramError> {
        let label = label.into();
        if left >= right || right >= self.words.len() {
            return Err(DiagramError::InvalidLink {
                left,
                right,
                label,
                words: self.words.len(),
            });
        }
        self.links.push(DiagramLink { left, right, label });
        Ok(())
    }

    pub fn words(&self) -> &[String] {
        &self.words
    }

    pub fn links(&self) -> &[DiagramLink] {
        &self.links
    }

    /// The diagram as the engine prints it: a blank line, the diagram, a blank line.
    pub fn render(&self) -> String {
        format!("\n{}\n\n", self)
    }

    fn layout(&self) -> Layout {
        let widths: Vec<usize> = self
            .words
            .iter()
            .map(|word| UnicodeWidthStr::width(word.as_str()))
            .collect();
        let mut gaps = vec![1; self.words.len().saturating_sub(1)];

        // Shortest links first, so widening a gap never squeezes an earlier label
        let mut order: Vec<usize> = (0..self.links.len()).collect();
        order.sort_by_key(|&i| {
            let link = &self.links[i];
            (link.right - link.left, link.left)
        });

        for &i in &order {
            let link = &self.links[i];
            let anchors = anchor_columns(&widths, &gaps);
            let interior = anchors[link.right] - anchors[link.left] - 1;
            let needed = link.label.chars().count();
            if interior < needed {
                gaps[link.right - 1] += needed - interior;
            }
        }

        let anchors = anchor_columns(&widths, &gaps);
        // a zero-width last word puts its anchor one past the text
        let width = (widths.iter().sum::<usize>() + gaps.iter().sum::<usize>())
            .max(anchors.last().map_or(0, |last| last + 1));

        let mut rows = vec![0; self.links.len()];
        let mut placed: Vec<usize> = Vec::with_capacity(self.links.len());
        for &i in &order {
            let link = &self.links[i];
            let mut row = placed
                .iter()
                .filter(|&&j| encloses(link, &self.links[j]))
                .map(|&j| rows[j] + 1)
                .max()
                .unwrap_or(0);
            while placed
                .iter()
                .any(|&j| rows[j] == row && overlaps(&anchors, link, &self.links[j]))
            {
                row += 1;
            }
            rows[i] = row;
            placed.push(i);
        }

        Layout {
            gaps,
            anchors,
            width,
            rows,
        }
    }
}

fn anchor_columns(widths: &[usize], gaps: &[usize]) -> Vec<usize> {
    let mut anchors = Vec::with_capacity(widths.len());
    let mut start = 0;
    for (idx, width) in widths.iter().enumerate() {
        anchors.push(start + width / 2);
        start += width + gaps.get(idx).copied().unwrap_or(0);
    }
    anchors
}

fn encloses(outer: &DiagramLink, inner: &DiagramLink) -> bool {
    inner.left >= outer.left
        && inner.right <= outer.right
        && (inner.left, inner.right) != (outer.left, outer.right)
}

fn overlaps(anchors: &[usize], a: &DiagramLink, b: &DiagramLink) -> bool {
    anchors[a.left] < anchors[b.right] && anchors[b.left] < anchors[a.right]
}

impl fmt::Display for LinkDiagram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let layout = self.layout();
        let anchors = &layout.anchors;
        let height = layout.rows.iter().max().map_or(0, |top| top + 1);
        let mut grid = vec![vec![' '; layout.width]; height];

        for (link, &row) in self.links.iter().zip(&layout.rows) {
            let (start, end) = (anchors[link.left], anchors[link.right]);
            let cells = &mut grid[row];
            cells[start] = '+';
            cells[end] = '+';
            for cell in &mut cells[start + 1..end] {
                *cell = '-';
            }
            let interior = end - start - 1;
            let label_at = start + 1 + (interior - link.label.chars().count()) / 2;
            for (offset, ch) in link.label.chars().enumerate() {
                cells[label_at + offset] = ch;
            }
        }

        // drop verticals from each link end down to the bars
        for (link, &row) in self.links.iter().zip(&layout.rows) {
            for &column in &[anchors[link.left], anchors[link.right]] {
                for cells in grid.iter_mut().take(row) {
                    if cells[column] == ' ' {
                        cells[column] = '|';
                    }
                }
            }
        }

        let mut lines: Vec<String> = grid
            .iter()
            .rev()
            .map(|cells| cells.iter().collect::<String>().trim_end().to_string())
            .collect();

        if !self.links.is_empty() {
            let mut bars = vec![' '; layout.width];
            for link in &self.links {
                bars[anchors[link.left]] = '|';
                bars[anchors[link.right]] = '|';
            }
            lines.push(bars.iter().collect::<String>().trim_end().to_string());
        }

        let mut word_line = String::new();
        for (idx, word) in self.words.iter().enumerate() {
            if idx > 0 {
                for _ in 0..layout.gaps[idx - 1] {
                    word_line.write_char(' ')?;
                }
            }
            word_line.push_str(word);
        }
        lines.push(word_line);

        f.write_str(&lines.join("\n"))
    }
}
