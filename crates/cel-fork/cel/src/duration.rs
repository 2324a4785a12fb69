//! Parsing and formatting for Go-style duration strings (`"1h30m"`,
//! `"1.5ms"`), used by the `duration()` CEL function and by the `string()`
//! conversion of a `Value::Duration`.

use nom::Parser;
use nom::branch::alt;
use nom::bytes::complete::tag;
use nom::character::complete::{char, digit1};
use nom::combinator::{opt, recognize};
use nom::multi::many1;
use nom::sequence::pair;
use nom::{IResult, error::Error as NomError};

fn unit_nanos(unit: &str) -> Option<i64> {
	Some(match unit {
		"ns" => 1,
		"us" | "\u{b5}s" => 1_000,
		"ms" => 1_000_000,
		"s" => 1_000_000_000,
		"m" => 60 * 1_000_000_000,
		"h" => 3600 * 1_000_000_000,
		_ => return None,
	})
}

fn number(input: &str) -> IResult<&str, f64> {
	let (rest, s) = recognize(pair(digit1, opt(pair(char('.'), digit1)))).parse(input)?;
	let value = s
		.parse::<f64>()
		.map_err(|_| nom::Err::Error(NomError::new(input, nom::error::ErrorKind::Float)))?;
	Ok((rest, value))
}

fn unit(input: &str) -> IResult<&str, &str> {
	alt((tag("ns"), tag("us"), tag("\u{b5}s"), tag("ms"), tag("s"), tag("m"), tag("h"))).parse(input)
}

fn term(input: &str) -> IResult<&str, i64> {
	let (rest, (value, unit)) = pair(number, unit).parse(input)?;
	// unit() only ever returns a string it just matched against unit_nanos's
	// own keys, so this is always Some.
	let nanos = unit_nanos(unit).expect("unit() only returns known units");
	Ok((rest, (value * nanos as f64).round() as i64))
}

/// Parses a Go-style duration string (e.g. `"1h30m1s"`, `"1.5ms"`) into a
/// [`chrono::Duration`]. A leading `-` negates the whole value.
pub fn parse_duration(input: &str) -> IResult<&str, chrono::Duration> {
	let (rest, neg) = opt(char('-')).parse(input)?;
	let (rest, terms) = many1(term).parse(rest)?;
	let total: i64 = terms.iter().sum();
	let total = if neg.is_some() { -total } else { total };
	Ok((rest, chrono::Duration::nanoseconds(total)))
}

/// Formats a [`chrono::Duration`] the way `duration()`'s Go counterpart
/// does: the smallest set of `h`/`m`/`s` components that reconstructs the
/// value exactly, falling back to a fractional-second form for
/// sub-second durations.
pub fn format_duration(d: &chrono::Duration) -> String {
	let total_nanos = match d.num_nanoseconds() {
		Some(n) => n,
		None => return format!("{}s", d.num_seconds()),
	};
	if total_nanos == 0 {
		return "0s".to_string();
	}
	let sign = if total_nanos < 0 { "-" } else { "" };
	let mut nanos = total_nanos.unsigned_abs();

	let hours = nanos / (3600 * 1_000_000_000);
	nanos %= 3600 * 1_000_000_000;
	let minutes = nanos / (60 * 1_000_000_000);
	nanos %= 60 * 1_000_000_000;
	let secs = nanos / 1_000_000_000;
	let sub_nanos = nanos % 1_000_000_000;

	let mut out = String::new();
	out.push_str(sign);
	if hours > 0 {
		out.push_str(&format!("{hours}h"));
	}
	if minutes > 0 {
		out.push_str(&format!("{minutes}m"));
	}
	if secs > 0 || sub_nanos > 0 || out.is_empty() {
		if sub_nanos > 0 {
			let frac = format!("{sub_nanos:09}");
			let frac = frac.trim_end_matches('0');
			out.push_str(&format!("{secs}.{frac}s"));
		} else {
			out.push_str(&format!("{secs}s"));
		}
	}
	out
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn parses_simple_units() {
		assert_eq!(parse_duration("1h").unwrap().1, chrono::Duration::hours(1));
		assert_eq!(
			parse_duration("1h30m").unwrap().1,
			chrono::Duration::minutes(90)
		);
		assert_eq!(
			parse_duration("1.5h").unwrap().1,
			chrono::Duration::minutes(90)
		);
		assert_eq!(
			parse_duration("1ms").unwrap().1,
			chrono::Duration::milliseconds(1)
		);
	}

	#[test]
	fn round_trips_through_format() {
		let d = chrono::Duration::seconds(5400);
		let s = format_duration(&d);
		assert_eq!(parse_duration(&s).unwrap().1, d);
	}
}
