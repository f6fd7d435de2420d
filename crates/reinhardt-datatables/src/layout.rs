//! Layout mini-language builder.
//!
//! The runtime places its chrome (filter box, length menu, pager, ...)
//! according to a compact string such as `<'top'lf>t<'bottom'ip>`.
//! [`LayoutBuilder`] assembles that string token by token with an insertion
//! cursor, so fragments can be spliced into the middle of an existing
//! layout.
//!
//! # Example
//!
//! ```
//! use reinhardt_datatables::layout::{LayoutBuilder, Region};
//!
//! let mut layout = LayoutBuilder::new();
//! layout
//! 	.open_group_with_classes(["top"])
//! 	.add_region(Region::LengthMenu)
//! 	.add_region(Region::Filter)
//! 	.close_group()
//! 	.add_region(Region::Table);
//!
//! assert_eq!(layout.serialize(), "<'top'lf>t");
//! assert_eq!(layout.open_groups(), 0);
//! ```

use crate::diagnostics::Diagnostic;

/// Built-in grid control regions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Region {
	/// Page size selector.
	LengthMenu,
	/// Global search box.
	Filter,
	/// The table itself.
	Table,
	/// Information summary.
	Info,
	/// Pagination control.
	Pager,
	/// Processing indicator.
	Processing,
}

impl Region {
	/// Single-letter code of the region.
	pub fn code(self) -> char {
		match self {
			Self::LengthMenu => 'l',
			Self::Filter => 'f',
			Self::Table => 't',
			Self::Info => 'i',
			Self::Pager => 'p',
			Self::Processing => 'r',
		}
	}

	/// Looks a region up by its code.
	pub fn from_code(code: char) -> Option<Self> {
		match code {
			'l' => Some(Self::LengthMenu),
			'f' => Some(Self::Filter),
			't' => Some(Self::Table),
			'i' => Some(Self::Info),
			'p' => Some(Self::Pager),
			'r' => Some(Self::Processing),
			_ => None,
		}
	}
}

/// A single layout token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutToken {
	/// Opens a group, optionally with a class list or an `#id` selector.
	Open(Option<String>),
	/// Closes the innermost group.
	Close,
	/// A built-in region.
	Region(Region),
	/// Custom markup or an extension region such as `B`.
	Literal(String),
}

impl LayoutToken {
	fn write(&self, out: &mut String) {
		match self {
			Self::Open(None) => out.push('<'),
			Self::Open(Some(hint)) => {
				out.push_str("<'");
				out.push_str(hint);
				out.push('\'');
			}
			Self::Close => out.push('>'),
			Self::Region(region) => out.push(region.code()),
			Self::Literal(text) => out.push_str(text),
		}
	}

	fn balance(&self) -> i32 {
		match self {
			Self::Open(_) => 1,
			Self::Close => -1,
			_ => 0,
		}
	}
}

/// Token builder for the layout string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayoutBuilder {
	tokens: Vec<LayoutToken>,
	open_groups: i32,
	cursor: Option<usize>,
	diagnostics: Vec<Diagnostic>,
}

impl LayoutBuilder {
	/// Creates an empty layout with the cursor at the end.
	pub fn new() -> Self {
		Self::default()
	}

	/// Parses an existing layout string.
	///
	/// Region letters become regions, `<` with an optional quoted hint opens
	/// a group, `>` closes one and every other character is kept as a
	/// literal.
	pub fn parse(layout: &str) -> Self {
		let mut builder = Self::new();
		let mut chars = layout.chars().peekable();
		while let Some(c) = chars.next() {
			match c {
				'<' => match chars.peek().copied() {
					Some(quote @ ('\'' | '"')) => {
						chars.next();
						let hint: String = chars.by_ref().take_while(|&c| c != quote).collect();
						builder.push_token(LayoutToken::Open(Some(hint)));
					}
					_ => builder.push_token(LayoutToken::Open(None)),
				},
				'>' => {
					builder.close_group();
				}
				c => match Region::from_code(c) {
					Some(region) => builder.push_token(LayoutToken::Region(region)),
					None => builder.push_token(LayoutToken::Literal(c.to_string())),
				},
			}
		}
		builder
	}

	fn push_token(&mut self, token: LayoutToken) {
		self.open_groups += token.balance();
		match self.cursor {
			Some(index) => {
				let index = index.min(self.tokens.len());
				self.tokens.insert(index, token);
				self.cursor = Some(index + 1);
			}
			None => self.tokens.push(token),
		}
	}

	/// Opens a plain group.
	pub fn open_group(&mut self) -> &mut Self {
		self.push_token(LayoutToken::Open(None));
		self
	}

	/// Opens a group carrying the given CSS classes.
	pub fn open_group_with_classes<I, S>(&mut self, classes: I) -> &mut Self
	where
		I: IntoIterator<Item = S>,
		S: AsRef<str>,
	{
		let hint = classes
			.into_iter()
			.map(|class| class.as_ref().to_string())
			.collect::<Vec<_>>()
			.join(" ");
		let hint = if hint.is_empty() { None } else { Some(hint) };
		self.push_token(LayoutToken::Open(hint));
		self
	}

	/// Opens a group rendered as an element with the given id.
	pub fn open_group_with_id(&mut self, id: &str) -> &mut Self {
		self.push_token(LayoutToken::Open(Some(format!("#{id}"))));
		self
	}

	/// Closes the innermost group.
	///
	/// Closing more groups than were opened is recorded as a diagnostic and
	/// the counter goes negative.
	pub fn close_group(&mut self) -> &mut Self {
		self.push_token(LayoutToken::Close);
		if self.open_groups < 0 {
			let diagnostic = Diagnostic::LayoutOverClosed {
				open_groups: self.open_groups,
			};
			diagnostic.emit();
			self.diagnostics.push(diagnostic);
		}
		self
	}

	/// Adds a built-in region.
	pub fn add_region(&mut self, region: Region) -> &mut Self {
		self.push_token(LayoutToken::Region(region));
		self
	}

	/// Adds custom markup; empty text is ignored.
	pub fn add_literal(&mut self, text: impl Into<String>) -> &mut Self {
		let text = text.into();
		if text.is_empty() {
			let diagnostic = Diagnostic::EmptyLayoutLiteral;
			diagnostic.emit();
			self.diagnostics.push(diagnostic);
			return self;
		}
		self.push_token(LayoutToken::Literal(text));
		self
	}

	/// Moves the insertion cursor in front of the token at `index`.
	///
	/// Indices past the end are clamped to the end.
	pub fn set_cursor(&mut self, index: usize) -> &mut Self {
		self.cursor = Some(index.min(self.tokens.len()));
		self
	}

	/// Resets the cursor so further tokens are appended.
	pub fn set_cursor_to_end(&mut self) -> &mut Self {
		self.cursor = None;
		self
	}

	/// Current cursor; `None` means append.
	pub fn cursor(&self) -> Option<usize> {
		self.cursor
	}

	/// Removes the token at `index`, keeping the group counter in sync.
	pub fn remove_at(&mut self, index: usize) -> Option<LayoutToken> {
		if index >= self.tokens.len() {
			return None;
		}
		let token = self.tokens.remove(index);
		self.open_groups -= token.balance();
		if let Some(cursor) = self.cursor
			&& cursor > index
		{
			self.cursor = Some(cursor - 1);
		}
		Some(token)
	}

	/// Position of the first occurrence of a region.
	pub fn position_of(&self, region: Region) -> Option<usize> {
		self.tokens
			.iter()
			.position(|token| *token == LayoutToken::Region(region))
	}

	/// Tokens in order.
	pub fn tokens(&self) -> &[LayoutToken] {
		&self.tokens
	}

	/// Number of tokens.
	pub fn len(&self) -> usize {
		self.tokens.len()
	}

	/// Returns whether the layout has no tokens.
	pub fn is_empty(&self) -> bool {
		self.tokens.is_empty()
	}

	/// Raw open-group counter, negative when over-closed.
	pub fn open_groups(&self) -> i32 {
		self.open_groups
	}

	/// Diagnostics raised while building.
	pub fn diagnostics(&self) -> &[Diagnostic] {
		&self.diagnostics
	}

	/// The balance diagnostic, if groups are not balanced.
	pub fn unbalanced(&self) -> Option<Diagnostic> {
		(self.open_groups != 0).then_some(Diagnostic::LayoutUnbalanced {
			open_groups: self.open_groups,
		})
	}

	/// Concatenates all tokens.
	///
	/// An unbalanced layout is logged and still serialized.
	pub fn serialize(&self) -> String {
		if let Some(diagnostic) = self.unbalanced() {
			diagnostic.emit();
		}
		let mut out = String::new();
		for token in &self.tokens {
			token.write(&mut out);
		}
		out
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use rstest::rstest;

	#[rstest]
	fn test_group_round_trip() {
		let mut layout = LayoutBuilder::new();
		layout.open_group().add_region(Region::Pager).close_group();

		assert_eq!(layout.serialize(), "<p>");
		assert_eq!(layout.open_groups(), 0);
		assert!(layout.unbalanced().is_none());
	}

	#[rstest]
	fn test_over_close_is_reported_and_serialized() {
		let mut layout = LayoutBuilder::new();
		layout.add_region(Region::Table).close_group();

		assert_eq!(layout.open_groups(), -1);
		assert_eq!(
			layout.diagnostics(),
			&[Diagnostic::LayoutOverClosed { open_groups: -1 }]
		);
		assert_eq!(
			layout.unbalanced(),
			Some(Diagnostic::LayoutUnbalanced { open_groups: -1 })
		);
		assert_eq!(layout.serialize(), "t>");
	}

	#[rstest]
	fn test_cursor_inserts_left_to_right() {
		let mut layout = LayoutBuilder::parse("lfrtip");
		layout.set_cursor(2).add_literal("B").add_literal("C");

		assert_eq!(layout.serialize(), "lfBCrtip");
		assert_eq!(layout.cursor(), Some(4));

		layout.set_cursor_to_end().add_literal("X");
		assert_eq!(layout.serialize(), "lfBCrtipX");
	}

	#[rstest]
	fn test_group_hints() {
		let mut layout = LayoutBuilder::new();
		layout
			.open_group_with_classes(["top", "row"])
			.add_region(Region::Filter)
			.close_group()
			.open_group_with_id("footer")
			.add_region(Region::Info)
			.close_group();

		assert_eq!(layout.serialize(), "<'top row'f><'#footer'i>");
	}

	#[rstest]
	fn test_parse_keeps_hints() {
		let layout = LayoutBuilder::parse("<'top'lf>t<\"#bottom\"ip>");

		assert_eq!(layout.open_groups(), 0);
		assert_eq!(layout.serialize(), "<'top'lf>t<'#bottom'ip>");
	}

	#[rstest]
	#[case(0, -1)]
	#[case(2, 1)]
	fn test_remove_rebalances(#[case] index: usize, #[case] expected_open: i32) {
		let mut layout = LayoutBuilder::parse("<t>");
		layout.remove_at(index);

		assert_eq!(layout.open_groups(), expected_open);
	}

	#[rstest]
	fn test_remove_shifts_cursor() {
		let mut layout = LayoutBuilder::parse("lft");
		layout.set_cursor(2);
		layout.remove_at(0);

		assert_eq!(layout.cursor(), Some(1));
		assert_eq!(layout.remove_at(10), None);
	}

	#[rstest]
	fn test_empty_literal_is_ignored() {
		let mut layout = LayoutBuilder::new();
		layout.add_literal("");

		assert!(layout.is_empty());
		assert_eq!(layout.diagnostics(), &[Diagnostic::EmptyLayoutLiteral]);
	}
}
