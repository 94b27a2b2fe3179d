// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Reads exported files back for graph assertions

#![allow(dead_code)]

use nom::{
    branch::alt,
    bytes::complete::{tag, take_while, take_while1},
    character::complete::{char, digit1, one_of},
    combinator::{map, map_res, opt, recognize},
    multi::separated_list0,
    sequence::{delimited, preceded, terminated, tuple},
    IResult,
};
use rustc_hash::FxHashMap;

/// One attribute value as read from a data line
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Ref(u32),
    Text(String),
    Integer(i64),
    Real(f64),
    Enum(String),
    List(Vec<Value>),
    Omitted,
    Derived,
}

impl Value {
    pub fn as_ref_id(&self) -> Option<u32> {
        match self {
            Value::Ref(id) => Some(*id),
            _ => None,
        }
    }

    pub fn as_real(&self) -> Option<f64> {
        match self {
            Value::Real(v) => Some(*v),
            Value::Integer(v) => Some(*v as f64),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> &[Value] {
        match self {
            Value::List(items) => items,
            _ => &[],
        }
    }

    /// Every reference in this value, lists included
    pub fn refs(&self, out: &mut Vec<u32>) {
        match self {
            Value::Ref(id) => out.push(*id),
            Value::List(items) => items.iter().for_each(|v| v.refs(out)),
            _ => {}
        }
    }
}

/// One data line
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub id: u32,
    pub type_name: String,
    pub attrs: Vec<Value>,
}

impl Line {
    pub fn refs(&self) -> Vec<u32> {
        let mut out = Vec::new();
        self.attrs.iter().for_each(|v| v.refs(&mut out));
        out
    }

    pub fn attr_ref(&self, index: usize) -> u32 {
        self.attrs[index]
            .as_ref_id()
            .unwrap_or_else(|| panic!("#{} attribute {} is not a reference", self.id, index))
    }

    pub fn attr_refs(&self, index: usize) -> Vec<u32> {
        self.attrs[index]
            .as_list()
            .iter()
            .filter_map(Value::as_ref_id)
            .collect()
    }
}

fn ws(input: &str) -> IResult<&str, &str> {
    take_while(|c: char| c == ' ')(input)
}

fn reference(input: &str) -> IResult<&str, Value> {
    map(preceded(char('#'), map_res(digit1, str::parse::<u32>)), Value::Ref)(input)
}

fn text(input: &str) -> IResult<&str, Value> {
    let (rest, _) = char('\'')(input)?;
    let bytes = rest.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'\'' {
            if bytes.get(i + 1) == Some(&b'\'') {
                i += 2;
                continue;
            }
            let raw = &rest[..i];
            return Ok((&rest[i + 1..], Value::Text(raw.replace("''", "'"))));
        }
        i += 1;
    }
    Err(nom::Err::Error(nom::error::Error::new(
        input,
        nom::error::ErrorKind::Char,
    )))
}

fn real(input: &str) -> IResult<&str, Value> {
    map_res(
        recognize(tuple((
            opt(char('-')),
            digit1,
            char('.'),
            opt(digit1),
            opt(tuple((one_of("eE"), opt(one_of("+-")), digit1))),
        ))),
        |s: &str| s.parse::<f64>().map(Value::Real),
    )(input)
}

fn integer(input: &str) -> IResult<&str, Value> {
    map_res(recognize(tuple((opt(char('-')), digit1))), |s: &str| {
        s.parse::<i64>().map(Value::Integer)
    })(input)
}

fn enumerated(input: &str) -> IResult<&str, Value> {
    map(
        delimited(
            char('.'),
            take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_'),
            char('.'),
        ),
        |s: &str| Value::Enum(s.to_string()),
    )(input)
}

fn list(input: &str) -> IResult<&str, Value> {
    map(
        delimited(
            char('('),
            separated_list0(tuple((char(','), ws)), value),
            char(')'),
        ),
        Value::List,
    )(input)
}

fn value(input: &str) -> IResult<&str, Value> {
    alt((
        real,
        integer,
        reference,
        text,
        enumerated,
        list,
        map(char('$'), |_| Value::Omitted),
        map(char('*'), |_| Value::Derived),
    ))(input)
}

/// `#12 = IFCWALL(...);`
pub fn parse_line(input: &str) -> Option<Line> {
    let result: IResult<&str, (u32, &str, Value)> = terminated(
        tuple((
            preceded(char('#'), map_res(digit1, str::parse::<u32>)),
            preceded(
                tag(" = "),
                take_while1(|c: char| c.is_ascii_alphanumeric() || c == '_'),
            ),
            list,
        )),
        char(';'),
    )(input);
    match result {
        Ok(("", (id, type_name, Value::List(attrs)))) => Some(Line {
            id,
            type_name: type_name.to_string(),
            attrs,
        }),
        _ => None,
    }
}

/// Data section of an exported file
#[derive(Debug)]
pub struct Graph {
    pub lines: Vec<Line>,
    index: FxHashMap<u32, usize>,
}

impl Graph {
    /// Parse every line between `DATA;` and `ENDSEC;`; panics on a malformed line
    pub fn parse(file: &str) -> Self {
        let data = file
            .split_once("DATA;\n")
            .expect("missing DATA section")
            .1;
        let data = data
            .rsplit_once("ENDSEC;\nEND-ISO-10303-21;")
            .expect("missing trailer")
            .0;
        let lines: Vec<Line> = data
            .lines()
            .map(|l| parse_line(l).unwrap_or_else(|| panic!("malformed line: {l}")))
            .collect();
        let index = lines.iter().enumerate().map(|(i, l)| (l.id, i)).collect();
        Self { lines, index }
    }

    pub fn from_bytes(bytes: &[u8]) -> Self {
        Self::parse(std::str::from_utf8(bytes).expect("output is not UTF-8"))
    }

    pub fn get(&self, id: u32) -> &Line {
        &self.lines[self.index[&id]]
    }

    pub fn of_type<'a, 'b>(&'a self, type_name: &'b str) -> impl Iterator<Item = &'a Line> + 'b
    where
        'a: 'b,
    {
        self.lines.iter().filter(move |l| l.type_name == type_name)
    }

    pub fn count(&self, type_name: &str) -> usize {
        self.of_type(type_name).count()
    }

    pub fn one(&self, type_name: &str) -> &Line {
        let mut found = self.of_type(type_name);
        let line = found
            .next()
            .unwrap_or_else(|| panic!("no {type_name} record"));
        assert!(found.next().is_none(), "more than one {type_name} record");
        line
    }

    /// Identifiers are unique and every reference points backwards
    pub fn assert_topological(&self) {
        assert_eq!(self.index.len(), self.lines.len(), "duplicate identifiers");
        let mut seen = rustc_hash::FxHashSet::default();
        for line in &self.lines {
            for target in line.refs() {
                assert!(
                    seen.contains(&target),
                    "#{} references #{} before it is written",
                    line.id,
                    target
                );
            }
            seen.insert(line.id);
        }
    }

    /// Coordinates of a cartesian point record
    pub fn point(&self, id: u32) -> Vec<f64> {
        let line = self.get(id);
        assert_eq!(line.type_name, "IFCCARTESIANPOINT");
        line.attrs[0]
            .as_list()
            .iter()
            .filter_map(Value::as_real)
            .collect()
    }

    /// Origin of the axis placement under a local placement
    pub fn placement_origin(&self, local_placement: u32) -> Vec<f64> {
        let local = self.get(local_placement);
        assert_eq!(local.type_name, "IFCLOCALPLACEMENT");
        let axis = self.get(local.attr_ref(1));
        self.point(axis.attr_ref(0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_line() {
        let line = parse_line("#4 = IFCSIUNIT(*, .LENGTHUNIT., $, .METRE.);").unwrap();
        assert_eq!(line.id, 4);
        assert_eq!(line.type_name, "IFCSIUNIT");
        assert_eq!(line.attrs[0], Value::Derived);
        assert_eq!(line.attrs[1], Value::Enum("LENGTHUNIT".into()));
        assert_eq!(line.attrs[2], Value::Omitted);

        let line = parse_line("#9 = IFCWALL('a''b', (#1, #2), 3, 0.5);").unwrap();
        assert_eq!(line.attrs[0], Value::Text("a'b".into()));
        assert_eq!(line.attr_refs(1), vec![1, 2]);
        assert_eq!(line.attrs[2], Value::Integer(3));
        assert_eq!(line.attrs[3], Value::Real(0.5));
    }
}
