use crate::schema::Type;
use crate::tree::NodeKind;
use crate::{Error, Result, TreeNode, Value};

use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt::Write;

/// A date pattern attached to a field.
///
/// Accepts the classic pattern letters (`yyyy-MM-dd HH:mm:ss`) and
/// translates them to strftime; a pattern containing `%` is taken as
/// strftime already. A malformed pattern is reported when the format is
/// used, as a configuration error.
#[derive(Debug, Clone, PartialEq)]
pub struct DateFormat {
    pattern: String,
    strftime: core::result::Result<String, String>,
}

impl DateFormat {
    pub fn new(pattern: &str) -> DateFormat {
        DateFormat {
            pattern: pattern.to_string(),
            strftime: translate(pattern),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// The equivalent strftime string.
    pub fn strftime(&self) -> Result<&str> {
        match &self.strftime {
            Ok(strftime) => Ok(strftime),
            Err(reason) => Err(Error::configuration(format!(
                "invalid date format `{}`: {reason}",
                self.pattern
            ))),
        }
    }

    /// Formats a date value as a string node. `Null` stays `Null`.
    pub fn format(&self, value: &Value) -> Result<TreeNode> {
        let strftime = self.strftime()?;
        let items = StrftimeItems::new(strftime);

        let mut out = String::new();
        // Writing fails when the pattern asks for a field the value lacks
        let written = match value {
            Value::Null => return Ok(TreeNode::Null),
            Value::Date(v) => write!(out, "{}", v.format_with_items(items)),
            Value::DateTime(v) => write!(out, "{}", v.format_with_items(items)),
            Value::Timestamp(v) => write!(out, "{}", v.format_with_items(items)),
            _ => return Err(value.unexpected("date")),
        };

        written.map_err(|_| {
            Error::type_conversion_detail(
                value.kind_name(),
                format!("`{}` needs fields a {} does not have", self.pattern, value.kind_name()),
            )
        })?;

        Ok(TreeNode::String(out))
    }

    /// Parses a string node into a value of the date type `ty`.
    pub fn parse(&self, ty: &Type, node: &TreeNode) -> Result<Value> {
        let strftime = self.strftime()?;

        let Some(text) = node.as_str() else {
            return Err(Error::type_conversion(ty, NodeKind::String, node.kind()));
        };

        let parse_failed = |err: chrono::ParseError| {
            Error::type_conversion_detail(
                ty,
                format!("`{text}` does not match `{}`: {err}", self.pattern),
            )
        };

        match ty.unwrap_option() {
            Type::Date => NaiveDate::parse_from_str(text, strftime)
                .map(Value::Date)
                .map_err(parse_failed),
            Type::DateTime => parse_naive(text, strftime)
                .map(Value::DateTime)
                .map_err(parse_failed),
            Type::Timestamp if strftime.contains("%z") || strftime.contains("%:z") => {
                DateTime::parse_from_str(text, strftime)
                    .map(|v| Value::Timestamp(v.with_timezone(&Utc)))
                    .map_err(parse_failed)
            }
            Type::Timestamp => parse_naive(text, strftime)
                .map(|v| Value::Timestamp(v.and_utc()))
                .map_err(parse_failed),
            _ => Err(Error::type_conversion_detail(
                ty,
                "date formats apply to date types only",
            )),
        }
    }
}

// A date-only pattern reads as midnight.
fn parse_naive(text: &str, strftime: &str) -> core::result::Result<NaiveDateTime, chrono::ParseError> {
    match NaiveDateTime::parse_from_str(text, strftime) {
        Ok(v) => Ok(v),
        Err(err) => match NaiveDate::parse_from_str(text, strftime) {
            Ok(date) => Ok(date.and_time(chrono::NaiveTime::MIN)),
            Err(_) => Err(err),
        },
    }
}

fn translate(pattern: &str) -> core::result::Result<String, String> {
    if pattern.is_empty() {
        return Err("empty pattern".to_string());
    }

    if pattern.contains('%') {
        if StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error)) {
            return Err("unsupported strftime specifier".to_string());
        }
        return Ok(pattern.to_string());
    }

    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            // `''` is a literal quote, inside or outside a quoted run
            if chars.get(i + 1) == Some(&'\'') {
                out.push('\'');
                i += 2;
                continue;
            }

            i += 1;
            loop {
                match chars.get(i) {
                    None => return Err("unterminated quoted literal".to_string()),
                    Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                        out.push('\'');
                        i += 2;
                    }
                    Some('\'') => {
                        i += 1;
                        break;
                    }
                    Some(&literal) => {
                        push_literal(&mut out, literal);
                        i += 1;
                    }
                }
            }
            continue;
        }

        if !c.is_ascii_alphabetic() {
            push_literal(&mut out, c);
            i += 1;
            continue;
        }

        let mut width = 1;
        while chars.get(i + width) == Some(&c) {
            width += 1;
        }
        i += width;

        let spec = match (c, width) {
            ('y', 2) => "%y",
            ('y', _) => "%Y",
            ('M', 1) => "%-m",
            ('M', 2) => "%m",
            ('M', 3) => "%b",
            ('M', _) => "%B",
            ('d', 1) => "%-d",
            ('d', _) => "%d",
            ('H', 1) => "%-H",
            ('H', _) => "%H",
            ('h', 1) => "%-I",
            ('h', _) => "%I",
            ('m', 1) => "%-M",
            ('m', _) => "%M",
            ('s', 1) => "%-S",
            ('s', _) => "%S",
            ('S', _) => "%3f",
            ('a', _) => "%p",
            ('E', 1..=3) => "%a",
            ('E', _) => "%A",
            ('Z', _) => "%z",
            _ => return Err(format!("unsupported pattern letter `{c}`")),
        };
        out.push_str(spec);
    }

    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    if c == '%' {
        out.push_str("%%");
    } else {
        out.push(c);
    }
}
