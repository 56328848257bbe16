//! The located literal block and its textual replacement.

/// The expected literal block inside one snapshot of a source file.
///
/// `before` runs up to and including the opening-delimiter line, `between`
/// holds the content lines, `after` starts at the closing-delimiter line.
/// Built fresh per promotion attempt and discarded after the rewrite.
#[derive(Debug)]
pub struct LiteralRegion<'a> {
    open_line: usize,
    close_line: usize,
    before: &'a [&'a str],
    between: &'a [&'a str],
    after: &'a [&'a str],
}

impl<'a> LiteralRegion<'a> {
    pub(crate) fn new(lines: &'a [&'a str], open_line: usize, close_line: usize) -> Self {
        Self {
            open_line,
            close_line,
            before: &lines[..=open_line],
            between: &lines[open_line + 1..close_line],
            after: &lines[close_line..],
        }
    }

    /// 0-based index of the opening-delimiter line.
    pub fn open_line(&self) -> usize {
        self.open_line
    }

    /// 0-based index of the closing-delimiter line.
    pub fn close_line(&self) -> usize {
        self.close_line
    }

    /// Current content lines of the block.
    pub fn between(&self) -> &[&'a str] {
        self.between
    }

    /// Line-count change the file undergoes when the block is replaced by
    /// `replacement_lines` lines.
    pub fn line_delta(&self, replacement_lines: usize) -> isize {
        replacement_lines as isize - self.between.len() as isize
    }

    /// Full file text with the block content replaced by `actual`, each
    /// line re-indented with the original block's indentation.
    pub fn replace_with(&self, actual: &[&str]) -> String {
        let indent = self.indentation();
        let mut lines: Vec<String> =
            Vec::with_capacity(self.before.len() + actual.len() + self.after.len());
        lines.extend(self.before.iter().map(|line| (*line).to_string()));
        lines.extend(actual.iter().map(|line| format!("{indent}{line}")));
        lines.extend(self.after.iter().map(|line| (*line).to_string()));
        lines.join("\n")
    }

    /// Shared leading whitespace of the content lines; an empty block
    /// borrows the closing-delimiter line's indentation so new content
    /// lands where the author put the block.
    fn indentation(&self) -> &'a str {
        if self.between.is_empty() {
            return self.after.first().map(|line| space_prefix(line)).unwrap_or("");
        }
        let mut prefix: Option<&str> = None;
        for line in self.between {
            match prefix {
                Some(current) if line.starts_with(current) => {}
                _ => prefix = Some(space_prefix(line)),
            }
        }
        prefix.unwrap_or("")
    }
}

fn space_prefix(line: &str) -> &str {
    &line[..line.len() - line.trim_start().len()]
}
