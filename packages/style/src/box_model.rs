//! Box-model math: shorthand parsing and margin-aware widths.

use std::fmt;

/// A single CSS length such as `10px`, `1.5em`, `20%` or unitless `0`
#[derive(Debug, Clone, PartialEq)]
pub struct Length {
    pub value: f64,
    pub unit: String,
}

impl Length {
    pub fn parse(token: &str) -> Option<Self> {
        let token = token.trim();
        let split = token
            .char_indices()
            .find(|(i, c)| !(c.is_ascii_digit() || *c == '.' || (*i == 0 && (*c == '-' || *c == '+'))))
            .map(|(i, _)| i)
            .unwrap_or(token.len());

        let (number, unit) = token.split_at(split);
        let value: f64 = number.parse().ok()?;

        if !unit.chars().all(|c| c.is_ascii_alphabetic() || c == '%') {
            return None;
        }
        // Only zero may omit its unit
        if unit.is_empty() && value != 0.0 {
            return None;
        }

        Some(Self {
            value,
            unit: unit.to_ascii_lowercase(),
        })
    }

    pub fn is_zero(&self) -> bool {
        self.value == 0.0
    }

    pub fn is_px(&self) -> bool {
        self.unit == "px" || (self.unit.is_empty() && self.is_zero())
    }

    fn abs(&self) -> Length {
        Length {
            value: self.value.abs(),
            unit: self.unit.clone(),
        }
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", format_number(self.value), self.unit)
    }
}

fn format_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

/// The four sides of a `margin`/`padding` shorthand
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoxSides {
    pub top: String,
    pub right: String,
    pub bottom: String,
    pub left: String,
}

impl BoxSides {
    /// Expand a 1–4 value shorthand. Values containing CSS functions are not
    /// split and yield `None`.
    pub fn parse(shorthand: &str) -> Option<Self> {
        if shorthand.contains('(') {
            return None;
        }

        let parts: Vec<&str> = shorthand.split_whitespace().collect();
        let (top, right, bottom, left) = match parts.as_slice() {
            [all] => (*all, *all, *all, *all),
            [vertical, horizontal] => (*vertical, *horizontal, *vertical, *horizontal),
            [top, horizontal, bottom] => (*top, *horizontal, *bottom, *horizontal),
            [top, right, bottom, left] => (*top, *right, *bottom, *left),
            _ => return None,
        };

        Some(Self {
            top: top.to_string(),
            right: right.to_string(),
            bottom: bottom.to_string(),
            left: left.to_string(),
        })
    }

    /// Terms to subtract from the outer width for the left and right sides,
    /// e.g. `- 20px` or `- 20px - 1em`. `None` when nothing is subtracted.
    fn horizontal_terms(&self) -> Option<String> {
        let mut px_total = 0.0;
        let mut others = Vec::new();

        for side in [&self.left, &self.right] {
            // `auto` and keywords do not take up width
            let Some(length) = Length::parse(side) else {
                continue;
            };
            if length.is_px() {
                px_total += length.value;
            } else if !length.is_zero() {
                others.push(length);
            }
        }

        let mut terms = Vec::new();
        if px_total != 0.0 {
            let sign = if px_total > 0.0 { '-' } else { '+' };
            terms.push(format!("{} {}px", sign, format_number(px_total.abs())));
        }
        for length in others {
            let sign = if length.value > 0.0 { '-' } else { '+' };
            terms.push(format!("{} {}", sign, length.abs()));
        }

        if terms.is_empty() {
            None
        } else {
            Some(terms.join(" "))
        }
    }
}

/// Width of a container inside `parent`.
///
/// An explicit width wins. Otherwise horizontal margins are subtracted from
/// the parent width so the margin never overflows it:
/// `parent - (marginLeft + marginRight)`.
pub fn effective_width(parent: &str, width: Option<&str>, margin: Option<&str>) -> String {
    if let Some(width) = width.map(str::trim).filter(|w| !w.is_empty()) {
        return width.to_string();
    }

    margin
        .and_then(BoxSides::parse)
        .and_then(|sides| sides.horizontal_terms())
        .map(|terms| format!("calc({} {})", parent, terms))
        .unwrap_or_else(|| parent.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_lengths() {
        assert_eq!(
            Length::parse("10px"),
            Some(Length {
                value: 10.0,
                unit: "px".to_string()
            })
        );
        assert_eq!(Length::parse("-2.5em").unwrap().value, -2.5);
        assert_eq!(Length::parse("20%").unwrap().unit, "%");
        assert!(Length::parse("0").unwrap().is_px());
        assert_eq!(Length::parse("auto"), None);
        assert_eq!(Length::parse("12"), None);
        assert_eq!(Length::parse("10p x"), None);
    }

    #[test]
    fn test_shorthand_expansion() {
        let one = BoxSides::parse("4px").unwrap();
        assert_eq!((one.top.as_str(), one.left.as_str()), ("4px", "4px"));

        let two = BoxSides::parse("1px 2px").unwrap();
        assert_eq!((two.bottom.as_str(), two.right.as_str()), ("1px", "2px"));

        let three = BoxSides::parse("1px 2px 3px").unwrap();
        assert_eq!((three.bottom.as_str(), three.left.as_str()), ("3px", "2px"));

        let four = BoxSides::parse("1px 2px 3px 4px").unwrap();
        assert_eq!(four.left, "4px");

        assert!(BoxSides::parse("").is_none());
        assert!(BoxSides::parse("1px 2px 3px 4px 5px").is_none());
        assert!(BoxSides::parse("calc(1px + 2px)").is_none());
    }

    #[test]
    fn test_margin_is_subtracted_from_parent() {
        assert_eq!(
            effective_width("100%", None, Some("0px 10px 0px 10px")),
            "calc(100% - 20px)"
        );
        assert_eq!(
            effective_width("600px", None, Some("0 15px")),
            "calc(600px - 30px)"
        );
    }

    #[test]
    fn test_explicit_width_wins() {
        assert_eq!(effective_width("100%", Some("50%"), Some("0 10px")), "50%");
    }

    #[test]
    fn test_no_horizontal_margin_keeps_parent() {
        assert_eq!(effective_width("100%", None, None), "100%");
        assert_eq!(effective_width("100%", None, Some("10px 0")), "100%");
        assert_eq!(effective_width("100%", None, Some("0 auto")), "100%");
        assert_eq!(effective_width("100%", Some("  "), None), "100%");
    }

    #[test]
    fn test_mixed_units() {
        assert_eq!(
            effective_width("100%", None, Some("0 1em 0 10px")),
            "calc(100% - 10px - 1em)"
        );
        assert_eq!(
            effective_width("100%", None, Some("0 -5px")),
            "calc(100% + 10px)"
        );
        assert_eq!(
            effective_width("100%", None, Some("0 2.5px 0 0")),
            "calc(100% - 2.5px)"
        );
    }
}
