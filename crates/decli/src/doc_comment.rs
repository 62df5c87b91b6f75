//! Documentation-block extraction and tag lookup.
//!
//! A documentation block is rebuilt from an item's `#[doc]` attributes: the
//! lines before the first `@tag` line form the summary, every `@name text`
//! line opens a tag, and indented continuation lines extend the preceding
//! tag. Lookup is pure and ordered; a block is never mutated after parsing.

use regex::Regex;
use syn::Attribute;

/// An immutable documentation block attached to a declaration or member.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DocBlock {
    summary: String,
    tags: Vec<DocTag>,
}

/// One `@name value` annotation inside a documentation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocTag {
    /// The tag name, without the leading `@`.
    pub name: String,
    /// The free text following the tag name, trimmed.
    pub text: String,
}

/// Selects documentation tags by name.
pub enum TagSelector<'a> {
    /// Matches the exact tag name.
    Exact(&'a str),
    /// Matches tag names against a pattern.
    Pattern(&'a Regex),
    /// Matches tag names with a predicate.
    Predicate(&'a dyn Fn(&str) -> bool),
}

impl TagSelector<'_> {
    fn matches(&self, name: &str) -> bool {
        match self {
            TagSelector::Exact(expected) => *expected == name,
            TagSelector::Pattern(pattern) => pattern.is_match(name),
            TagSelector::Predicate(predicate) => predicate(name),
        }
    }
}

impl DocBlock {
    /// Rebuilds the documentation block from an item's attributes.
    ///
    /// Returns `None` when the item carries no `#[doc]` lines at all; an
    /// empty comment (`/** */`) still yields a block, with an empty summary.
    pub fn from_attrs(attrs: &[Attribute]) -> Option<Self> {
        let mut lines = Vec::new();

        for attr in attrs {
            if attr.path().is_ident("doc")
                && let Ok(meta) = attr.meta.require_name_value()
                && let syn::Expr::Lit(expr_lit) = &meta.value
                && let syn::Lit::Str(lit_str) = &expr_lit.lit
            {
                let comment = lit_str.value();

                // Remove the leading space that rustdoc adds
                let trimmed = comment.strip_prefix(' ').unwrap_or(&comment);
                lines.push(trimmed.to_string());
            }
        }

        if lines.is_empty() {
            return None;
        }

        Some(Self::from_lines(&lines))
    }

    fn from_lines(lines: &[String]) -> Self {
        let mut summary_lines: Vec<&str> = Vec::new();
        let mut tags: Vec<DocTag> = Vec::new();

        for line in lines {
            match split_tag_line(line) {
                Some((name, text)) => tags.push(DocTag {
                    name: name.to_string(),
                    text: text.trim().to_string(),
                }),
                None if tags.is_empty() => summary_lines.push(line),
                // Continuation line of the preceding tag
                None => {
                    if let Some(last) = tags.last_mut() {
                        let continuation = line.trim();
                        if !continuation.is_empty() {
                            if !last.text.is_empty() {
                                last.text.push('\n');
                            }
                            last.text.push_str(continuation);
                        }
                    }
                }
            }
        }

        Self {
            summary: summary_lines.join("\n").trim().to_string(),
            tags,
        }
    }

    /// The free text before the first tag, trimmed. Empty when the block
    /// consists of tags only.
    pub fn summary(&self) -> &str {
        &self.summary
    }

    /// The first non-empty summary line, if any.
    pub fn summary_line(&self) -> Option<&str> {
        self.summary.lines().map(str::trim).find(|line| !line.is_empty())
    }

    /// All tags, in document order.
    pub fn all_tags(&self) -> &[DocTag] {
        &self.tags
    }

    /// The tags matching the selector, in document order. Empty on no match.
    pub fn tags(&self, selector: TagSelector<'_>) -> Vec<&DocTag> {
        self.tags
            .iter()
            .filter(|tag| selector.matches(&tag.name))
            .collect()
    }

    /// The tag at `index` among same-named tags; negative indices count from
    /// the end (`-1` is the last). `None` when out of range.
    pub fn tag(&self, name: &str, index: isize) -> Option<&DocTag> {
        let matches = self.tags(TagSelector::Exact(name));

        let position = if index >= 0 {
            index as usize
        } else {
            matches.len().checked_sub(index.unsigned_abs())?
        };

        matches.get(position).copied()
    }
}

/// Splits an `@name rest` line into its tag name and text.
fn split_tag_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.trim_start().strip_prefix('@')?;

    let name_end = rest
        .find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
        .unwrap_or(rest.len());
    if name_end == 0 {
        // A bare `@` is plain text, not a tag
        return None;
    }

    Some((&rest[..name_end], &rest[name_end..]))
}
