//! Parser for the broker's duration syntax (`300ms`, `1.5h`, `2h45m`).

// crates.io
use time::Duration;
// self
use crate::error::DurationError;

const NANOS_PER_MICRO: f64 = 1e3;
const NANOS_PER_MILLI: f64 = 1e6;
const NANOS_PER_SECOND: f64 = 1e9;

/// Parses a signed sequence of decimal numbers, each followed by a unit.
///
/// Valid units are `ns`, `us` (or `µs`), `ms`, `s`, `m`, and `h`. A bare `0` is accepted.
pub fn parse(value: &str) -> Result<Duration, DurationError> {
	let (negative, mut rest) = match value.strip_prefix('-') {
		Some(rest) => (true, rest),
		None => (false, value.strip_prefix('+').unwrap_or(value)),
	};

	if rest == "0" {
		return Ok(Duration::ZERO);
	}
	if rest.is_empty() {
		return Err(DurationError::MissingNumber);
	}

	let mut total = Duration::ZERO;

	while !rest.is_empty() {
		let (number, tail) = rest.split_at(
			rest.find(|c: char| !c.is_ascii_digit() && c != '.').unwrap_or(rest.len()),
		);
		let (unit, tail) = tail
			.split_at(tail.find(|c: char| c.is_ascii_digit() || c == '.').unwrap_or(tail.len()));

		if number.is_empty() || number == "." {
			return Err(DurationError::MissingNumber);
		}

		let scale = unit_nanos(unit)?;
		let number = number.parse::<f64>().map_err(|_| DurationError::MissingNumber)?;
		let nanos = number * scale;

		if !nanos.is_finite() || nanos > i64::MAX as f64 {
			return Err(DurationError::OutOfRange);
		}

		total = total
			.checked_add(Duration::nanoseconds(nanos as i64))
			.ok_or(DurationError::OutOfRange)?;
		rest = tail;
	}

	Ok(if negative { -total } else { total })
}

fn unit_nanos(unit: &str) -> Result<f64, DurationError> {
	match unit {
		"ns" => Ok(1.),
		"us" | "µs" | "μs" => Ok(NANOS_PER_MICRO),
		"ms" => Ok(NANOS_PER_MILLI),
		"s" => Ok(NANOS_PER_SECOND),
		"m" => Ok(60. * NANOS_PER_SECOND),
		"h" => Ok(3_600. * NANOS_PER_SECOND),
		"" => Err(DurationError::MissingUnit),
		_ => Err(DurationError::UnknownUnit),
	}
}
