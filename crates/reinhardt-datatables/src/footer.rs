//! Computed footer totals.
//!
//! Each [`FooterSum`] reduces a (usually hidden) numeric source column into
//! a visible footer cell on every redraw. Two figures are computed: the
//! grand total over all rows and the total of the current page. When both
//! are equal only one value is printed, otherwise both are shown using the
//! combined format of [`SumFormat`].
//!
//! The same rules are available natively through [`FooterSum::evaluate`],
//! e.g. to pre-render the footer.

use crate::error::{DataTablesError, Result};
use crate::js::{JsCode, quote};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

static FLOAT_PREFIX_REGEX: Lazy<Regex> = Lazy::new(|| {
	Regex::new(r"^[+-]?(Infinity|(\d+\.?\d*|\.\d+)([eE][+-]?\d+)?)")
		.expect("FLOAT_PREFIX_REGEX: invalid regex pattern")
});

/// Cleans textual cell values before they are parsed.
#[derive(Debug, Clone)]
pub enum Normalizer {
	/// Removes every occurrence of the given strings, e.g. currency symbols
	/// or thousands separators.
	Strip(Vec<String>),
	/// A JavaScript function `(v) => string`; `native` is its Rust
	/// counterpart used by [`FooterSum::evaluate`], if any.
	Script {
		/// Function expression.
		code: JsCode,
		/// Native equivalent.
		native: Option<fn(&str) -> String>,
	},
}

impl Normalizer {
	/// Strips the given strings.
	pub fn strip<I, S>(parts: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		Self::Strip(parts.into_iter().map(Into::into).collect())
	}

	fn js_statement(&self) -> String {
		match self {
			Self::Strip(parts) => parts
				.iter()
				.map(|part| format!("v=v.split({}).join(\"\");", quote(part)))
				.collect(),
			Self::Script { code, .. } => format!("v=({code})(v);"),
		}
	}

	fn apply(&self, value: &str) -> String {
		match self {
			Self::Strip(parts) => parts
				.iter()
				.filter(|part| !part.is_empty())
				.fold(value.to_string(), |acc, part| acc.replace(part.as_str(), "")),
			Self::Script { native: Some(native), .. } => native(value),
			Self::Script { native: None, .. } => value.to_string(),
		}
	}
}

/// Text around the printed totals.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SumFormat {
	/// Printed before each figure.
	pub prefix: String,
	/// Printed after each figure.
	pub suffix: String,
	/// Printed before the page total when both figures are shown.
	pub both_prefix: String,
	/// Printed between page total and grand total.
	pub both_separator: String,
	/// Printed after the grand total when both figures are shown.
	pub both_suffix: String,
}

impl SumFormat {
	/// Creates a format with a figure prefix and suffix.
	pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
		Self {
			prefix: prefix.into(),
			suffix: suffix.into(),
			..Self::default()
		}
	}

	/// Sets the text used when both figures are shown.
	pub fn both(
		mut self,
		prefix: impl Into<String>,
		separator: impl Into<String>,
		suffix: impl Into<String>,
	) -> Self {
		self.both_prefix = prefix.into();
		self.both_separator = separator.into();
		self.both_suffix = suffix.into();
		self
	}

	fn single(&self, value: &str) -> String {
		format!("{}{}{}", self.prefix, value, self.suffix)
	}

	/// Formats the totals; equal totals print a single figure.
	pub fn print(&self, total: f64, page_total: f64) -> String {
		let single_total = self.single(&format_number(total));
		if total == page_total {
			return single_total;
		}
		format!(
			"{}{}{}{}{}",
			self.both_prefix,
			self.single(&format_number(page_total)),
			self.both_separator,
			single_total,
			self.both_suffix
		)
	}

	fn js_function(&self) -> String {
		let wrap = |figure: &str| {
			let mut expr = figure.to_string();
			if !self.prefix.is_empty() {
				expr = format!("{}+{}", quote(&self.prefix), expr);
			}
			if !self.suffix.is_empty() {
				expr = format!("{}+{}", expr, quote(&self.suffix));
			}
			expr
		};
		let total = wrap("t");
		let page_total = wrap("pt");
		let mut both = if !self.both_prefix.is_empty() {
			format!("{}+{}", quote(&self.both_prefix), page_total)
		} else if page_total == "pt" && self.both_separator.is_empty() {
			// keep `pt+t` a concatenation, not an addition
			format!("\"\"+{page_total}")
		} else {
			page_total
		};
		if !self.both_separator.is_empty() {
			both = format!("{}+{}", both, quote(&self.both_separator));
		}
		both = format!("{both}+{total}");
		if !self.both_suffix.is_empty() {
			both = format!("{}+{}", both, quote(&self.both_suffix));
		}
		format!("function(t,pt){{return t==pt?{total}:{both};}}")
	}
}

/// Sum of one source column printed into one footer cell.
#[derive(Debug, Clone)]
pub struct FooterSum {
	calc_column: usize,
	print_column: usize,
	normalizer: Option<Normalizer>,
	format: SumFormat,
}

impl FooterSum {
	/// Sums `calc_column` into the footer of `print_column`.
	pub fn new(calc_column: usize, print_column: usize) -> Self {
		Self {
			calc_column,
			print_column,
			normalizer: None,
			format: SumFormat::default(),
		}
	}

	/// Cleans textual values before parsing.
	pub fn normalizer(mut self, normalizer: Normalizer) -> Self {
		self.normalizer = Some(normalizer);
		self
	}

	/// Sets the output format.
	pub fn format(mut self, format: SumFormat) -> Self {
		self.format = format;
		self
	}

	/// Column whose values are summed.
	pub fn calc_column(&self) -> usize {
		self.calc_column
	}

	/// Column whose footer shows the result.
	pub fn print_column(&self) -> usize {
		self.print_column
	}

	/// Converts a raw cell value to a number.
	///
	/// Strings are normalized and parsed like `parseFloat` (`NaN` when no
	/// numeric prefix exists), numbers are used as-is, anything else is 0.
	pub fn extract(&self, value: &Value) -> f64 {
		match value {
			Value::String(text) => {
				let text = match &self.normalizer {
					Some(normalizer) => normalizer.apply(text),
					None => text.clone(),
				};
				parse_float(&text)
			}
			Value::Number(number) => number.as_f64().unwrap_or(0.0),
			_ => 0.0,
		}
	}

	/// Sums the values.
	pub fn total(&self, values: &[Value]) -> f64 {
		values.iter().fold(0.0, |acc, value| acc + self.extract(value))
	}

	/// Footer text for all rows and the rows of the current page.
	pub fn evaluate(&self, all: &[Value], page: &[Value]) -> String {
		self.format.print(self.total(all), self.total(page))
	}

	fn js_block(&self, index: usize) -> String {
		let normalize = self
			.normalizer
			.as_ref()
			.map(Normalizer::js_statement)
			.unwrap_or_default();
		format!(
			"let funcIntVal{i}=function(v){{if(typeof v===\"string\"){{{normalize}return parseFloat(v);}}if(typeof v===\"number\"){{return v;}}return 0;}};\
			 let funcPrintSum{i}={print};\
			 let funcReduce{i}=function(a,b){{return funcIntVal{i}(a)+funcIntVal{i}(b);}};\
			 let total{i}=api.column({calc}).data().reduce(funcReduce{i},0);\
			 let pagetotal{i}=api.column({calc},{{\"page\":\"current\"}}).data().reduce(funcReduce{i},0);\
			 $(api.column({target}).footer()).html(funcPrintSum{i}(total{i},pagetotal{i}));",
			i = index,
			print = self.format.js_function(),
			calc = self.calc_column,
			target = self.print_column,
		)
	}
}

/// Footer callback computing one or more sums.
#[derive(Debug, Clone)]
pub struct FooterAggregation {
	sums: Vec<FooterSum>,
}

impl FooterAggregation {
	/// Creates the aggregation; at least one sum is required.
	pub fn new(sums: impl IntoIterator<Item = FooterSum>) -> Result<Self> {
		let sums: Vec<_> = sums.into_iter().collect();
		if sums.is_empty() {
			return Err(DataTablesError::EmptyFooterAggregation);
		}
		Ok(Self { sums })
	}

	/// The sums in order.
	pub fn sums(&self) -> &[FooterSum] {
		&self.sums
	}

	/// The runtime `footerCallback` function.
	pub fn to_js(&self) -> JsCode {
		let blocks: String = self
			.sums
			.iter()
			.enumerate()
			.map(|(index, sum)| sum.js_block(index))
			.collect();
		JsCode::new(format!(
			"function(tfoot,data,start,end,display){{let api=this.api();{blocks}}}"
		))
	}
}

/// Parses the longest numeric prefix like JavaScript's `parseFloat`.
pub fn parse_float(text: &str) -> f64 {
	let text = text.trim_start();
	let Some(found) = FLOAT_PREFIX_REGEX.find(text) else {
		return f64::NAN;
	};
	let literal = found.as_str();
	match literal.trim_start_matches(['+', '-']) {
		"Infinity" if literal.starts_with('-') => f64::NEG_INFINITY,
		"Infinity" => f64::INFINITY,
		_ => literal.parse().unwrap_or(f64::NAN),
	}
}

/// Formats a number the way JavaScript's `Number.prototype.toString` does.
///
/// Magnitudes of `1e21` and above or below `1e-6` use exponent notation.
pub fn format_number(value: f64) -> String {
	if value.is_nan() {
		"NaN".to_string()
	} else if value.is_infinite() {
		let text = if value > 0.0 { "Infinity" } else { "-Infinity" };
		text.to_string()
	} else if value == 0.0 {
		"0".to_string()
	} else if value.abs() >= 1e21 || value.abs() < 1e-6 {
		let text = format!("{value:e}");
		match text.split_once('e') {
			Some((mantissa, exponent)) if !exponent.starts_with('-') => {
				format!("{mantissa}e+{exponent}")
			}
			_ => text,
		}
	} else {
		value.to_string()
	}
}
