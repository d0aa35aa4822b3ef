//! Line Patches
//!
//! Tracks line replacements and insertions against a source text and
//! applies them in a single pass.
//!
//! # Design
//!
//! Edits are addressed by [`Slot`] rather than by line number, so planning
//! an insertion never invalidates slots handed out earlier. Final line
//! numbers are only known once [`LinePatches::apply`] has laid out every
//! line.
//!
//! # Example
//!
//! ```ignore
//! let mut patches = LinePatches::new("a = 1\nfoo()");
//! let probe = patches.insert_after(Slot::Original(0), "reveal_type(a)");
//! patches.replace(Slot::Original(1), "reveal_type(foo())");
//!
//! let patched = patches.apply();
//! assert_eq!(patched.line_number(probe), 2);
//! ```

use tracing::trace;

/// A line position while patches are being planned.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Slot {
    /// Zero-based index of a line of the source text.
    Original(usize),
    /// Index of a planned insertion, in creation order.
    Inserted(usize),
}

#[derive(Clone, Debug, PartialEq, Eq)]
struct Insertion {
    /// Original line the inserted line follows.
    after: usize,
    text: String,
}

/// Planned edits against the lines of a source text.
///
/// Insertions after the same original line keep their creation order.
#[derive(Clone, Debug)]
pub struct LinePatches<'src> {
    original: Vec<&'src str>,
    replaced: Vec<Option<String>>,
    inserted: Vec<Insertion>,
}

impl<'src> LinePatches<'src> {
    /// Split `source` on `\n`; a trailing newline yields a final empty line
    /// so joining the lines back restores it.
    pub fn new(source: &'src str) -> Self {
        let original: Vec<&str> = source.split('\n').collect();
        LinePatches {
            replaced: vec![None; original.len()],
            original,
            inserted: Vec::new(),
        }
    }

    /// Current text at a slot, including planned replacements.
    pub fn text(&self, slot: Slot) -> &str {
        match slot {
            Slot::Original(index) => self.replaced[index]
                .as_deref()
                .unwrap_or(self.original[index]),
            Slot::Inserted(index) => &self.inserted[index].text,
        }
    }

    /// Replace the text at a slot.
    pub fn replace(&mut self, slot: Slot, text: impl Into<String>) {
        let text = text.into();
        trace!(?slot, %text, "replace line");
        match slot {
            Slot::Original(index) => self.replaced[index] = Some(text),
            Slot::Inserted(index) => self.inserted[index].text = text,
        }
    }

    /// Insert a new line after a slot and return the new line's slot.
    pub fn insert_after(&mut self, slot: Slot, text: impl Into<String>) -> Slot {
        let after = match slot {
            Slot::Original(index) => index,
            Slot::Inserted(index) => self.inserted[index].after,
        };
        let text = text.into();
        trace!(?slot, %text, "insert line");
        self.inserted.push(Insertion { after, text });
        Slot::Inserted(self.inserted.len() - 1)
    }

    /// Check if no edits are planned.
    pub fn is_empty(&self) -> bool {
        self.inserted.is_empty() && self.replaced.iter().all(Option::is_none)
    }

    /// Lay out every line and record the final line number of each slot.
    pub fn apply(&self) -> Patched {
        let mut lines: Vec<&str> = Vec::with_capacity(self.original.len() + self.inserted.len());
        let mut original_numbers = Vec::with_capacity(self.original.len());
        let mut inserted_numbers = vec![0; self.inserted.len()];

        let mut by_anchor: Vec<Vec<usize>> = vec![Vec::new(); self.original.len()];
        for (index, insertion) in self.inserted.iter().enumerate() {
            by_anchor[insertion.after].push(index);
        }

        for (index, anchored) in by_anchor.iter().enumerate() {
            lines.push(self.text(Slot::Original(index)));
            original_numbers.push(line_number(lines.len()));
            for &inserted in anchored {
                lines.push(&self.inserted[inserted].text);
                inserted_numbers[inserted] = line_number(lines.len());
            }
        }

        Patched {
            text: lines.join("\n"),
            original_numbers,
            inserted_numbers,
        }
    }
}

fn line_number(count: usize) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Result of applying [`LinePatches`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Patched {
    text: String,
    original_numbers: Vec<u32>,
    inserted_numbers: Vec<u32>,
}

impl Patched {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn into_text(self) -> String {
        self.text
    }

    /// One-based line number of a slot in the patched text.
    pub fn line_number(&self, slot: Slot) -> u32 {
        match slot {
            Slot::Original(index) => self.original_numbers[index],
            Slot::Inserted(index) => self.inserted_numbers[index],
        }
    }
}

#[cfg(test)]
mod tests;
