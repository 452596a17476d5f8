//! # npm Range Dialect
//!
//! Parses the range syntax used by `package.json` (including its `engines` field)
//! into [`semver::VersionReq`] comparator sets.
//!
//! ## Grammar
//!
//! ```text
//! range      ::= set ( ws* '||' ws* set )*
//! set        ::= hyphen | simple ( ws+ simple )*
//! hyphen     ::= partial ws+ '-' ws+ partial
//! simple     ::= operator? ws* partial
//! operator   ::= '>=' | '<=' | '>' | '<' | '=' | '~>' | '~' | '^'
//! partial    ::= 'v'? xr ( '.' xr ( '.' xr pre? build? )? )?
//! xr         ::= 'x' | 'X' | '*' | digits
//! ```
//!
//! An empty set (for example the right side of `1.x ||`) matches any release,
//! as does a set made only of wildcards.
//!
//! ## Mapping onto `semver`
//!
//! Partial versions map onto [`semver::Comparator`]'s optional minor and patch fields,
//! which already carry npm's X-range semantics:
//! `<=1.2` means `<1.3.0`, `>1` means `>=2.0.0`, and so on.
//! The only translations needed are:
//!
//! - A bare full version is [`Op::Exact`]; a bare partial version is [`Op::Wildcard`].
//! - A hyphen range becomes a `>=` and a `<=` comparator.
//! - A comparator whose major is a wildcard matches everything (`>=*`)
//!   or nothing (`<*`, `>*`).

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag, take_while1},
    character::complete::{char, digit1, multispace0, multispace1},
    combinator::{eof, map_res, opt, value, verify},
    multi::{separated_list0, separated_list1},
    sequence::{delimited, preceded, terminated},
};
use semver::{Comparator, Op, Prerelease, VersionReq};

use crate::Error;

/// A version with optional minor, patch, and prerelease components.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Partial {
    major: Option<u64>,
    minor: Option<u64>,
    patch: Option<u64>,
    pre: Option<String>,
}

impl Partial {
    fn is_full(&self) -> bool {
        self.patch.is_some()
    }
}

/// Parse an npm range into one comparator set per `||` alternative.
#[tracing::instrument]
pub fn parse(input: &str) -> Result<Vec<VersionReq>, Error> {
    let sets = match range(input.trim()) {
        Ok((_, sets)) => sets,
        Err(e) => {
            return Err(Error::ParseRange {
                range: input.to_string(),
                message: format!("failed to parse range: {e:?}"),
            });
        }
    };

    sets.into_iter()
        .map(|set| {
            let mut comparators = Vec::new();
            for (op, partial) in set {
                comparators.extend(comparator(op, partial, input)?);
            }
            Ok(VersionReq { comparators })
        })
        .collect()
}

fn range(input: &str) -> IResult<&str, Vec<Vec<(Op, Partial)>>> {
    terminated(
        separated_list1(delimited(multispace0, tag("||"), multispace0), set),
        eof,
    )
    .parse(input)
}

fn set(input: &str) -> IResult<&str, Vec<(Op, Partial)>> {
    alt((hyphen, separated_list0(multispace1, simple))).parse(input)
}

fn hyphen(input: &str) -> IResult<&str, Vec<(Op, Partial)>> {
    let (input, lower) = partial(input)?;
    let (input, _) = delimited(multispace1, char('-'), multispace1).parse(input)?;
    let (input, upper) = partial(input)?;
    Ok((input, vec![(Op::GreaterEq, lower), (Op::LessEq, upper)]))
}

fn simple(input: &str) -> IResult<&str, (Op, Partial)> {
    let (input, op) = opt(operator).parse(input)?;
    let (input, _) = multispace0(input)?;
    let (input, version) = partial(input)?;

    let op = match op {
        Some(op) => op,
        None if version.is_full() => Op::Exact,
        None => Op::Wildcard,
    };
    Ok((input, (op, version)))
}

fn operator(input: &str) -> IResult<&str, Op> {
    alt((
        value(Op::GreaterEq, tag(">=")),
        value(Op::LessEq, tag("<=")),
        value(Op::Greater, tag(">")),
        value(Op::Less, tag("<")),
        value(Op::Exact, tag("=")),
        value(Op::Tilde, tag("~>")),
        value(Op::Tilde, tag("~")),
        value(Op::Caret, tag("^")),
    ))
    .parse(input)
}

fn partial(input: &str) -> IResult<&str, Partial> {
    let (input, _) = opt(char('v')).parse(input)?;
    let (input, major) = xr(input)?;
    let (input, minor) = opt(preceded(char('.'), xr)).parse(input)?;
    let (input, patch) = match minor {
        Some(_) => opt(preceded(char('.'), xr)).parse(input)?,
        None => (input, None),
    };
    let (input, pre, _build) = match patch {
        Some(_) => {
            let (input, pre) = opt(preceded(char('-'), identifiers)).parse(input)?;
            let (input, build) = opt(preceded(char('+'), identifiers)).parse(input)?;
            (input, pre, build)
        }
        None => (input, None, None),
    };

    // A wildcard component makes every later component a wildcard too.
    let minor = major.and(minor.flatten());
    let patch = minor.and(patch.flatten());

    Ok((
        input,
        Partial {
            major,
            minor,
            patch,
            pre: pre.map(str::to_string),
        },
    ))
}

/// A version component: a number without leading zeros, or `None` for a wildcard.
fn xr(input: &str) -> IResult<&str, Option<u64>> {
    alt((
        value(None, alt((char('x'), char('X'), char('*')))),
        map_res(
            verify(digit1, |digits: &str| digits == "0" || !digits.starts_with('0')),
            |digits: &str| digits.parse::<u64>().map(Some),
        ),
    ))
    .parse(input)
}

fn identifiers(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_ascii_alphanumeric() || c == '.' || c == '-').parse(input)
}

/// Translate a parsed comparator into a `semver` comparator.
///
/// Returns `None` for comparators that match any release.
fn comparator(op: Op, partial: Partial, input: &str) -> Result<Option<Comparator>, Error> {
    let Some(major) = partial.major else {
        return Ok(match op {
            Op::Less | Op::Greater => Some(nothing()),
            _ => None,
        });
    };

    let pre = match (&partial.pre, partial.patch) {
        (Some(pre), Some(_)) => Prerelease::new(pre).map_err(|e| Error::ParseRange {
            range: input.to_string(),
            message: format!("invalid prerelease '{pre}': {e}"),
        })?,
        _ => Prerelease::EMPTY,
    };

    Ok(Some(Comparator {
        op,
        major,
        minor: partial.minor,
        patch: partial.patch,
        pre,
    }))
}

/// A comparator that no version satisfies.
fn nothing() -> Comparator {
    Comparator {
        op: Op::Less,
        major: 0,
        minor: Some(0),
        patch: Some(0),
        pre: Prerelease::new("0").unwrap_or(Prerelease::EMPTY),
    }
}
