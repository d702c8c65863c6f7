//! Loosely-typed quaternion descriptions
//!
//! Config files and other runtime data describe a rotation in whichever form
//! is convenient: a bare number, a list of four components, or a table of
//! named parts. [`QuaternionDescriptor`] deserializes any of these and
//! resolves them to a [`Quaternion`].
//!
//! Named tables are resolved with this precedence:
//! 1. `scalar` / `vector`
//! 2. `real` / `imaginary`
//! 3. `axis` + `angle`
//! 4. `array`
//! 5. `matrix`
//! 6. any other names, sorted alphabetically and used positionally
//!    (one name gives a real quaternion, otherwise exactly four are needed)

use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::matrix;
use crate::quaternion::fixed_length;
use crate::{Quaternion, QuaternionError};

/// A single component: a number, numeric text, or nothing at all
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Element {
    Missing,
    Number(f64),
    Text(String),
}

impl Element {
    /// The element as a real number
    pub fn to_real(&self) -> Result<f64, QuaternionError> {
        match self {
            Element::Missing => Err(QuaternionError::Type(
                "a missing value cannot be interpreted as a real number".to_string(),
            )),
            Element::Number(value) => Ok(*value),
            Element::Text(text) => text.trim().parse::<f64>().map_err(|_| {
                QuaternionError::Value(format!("'{}' cannot be interpreted as a real number", text))
            }),
        }
    }

    /// Like [`Element::to_real`], but a missing value counts as zero
    fn to_real_or_zero(&self) -> Result<f64, QuaternionError> {
        match self {
            Element::Missing => Ok(0.0),
            other => other.to_real(),
        }
    }
}

impl From<f64> for Element {
    fn from(value: f64) -> Self {
        Element::Number(value)
    }
}

impl From<&str> for Element {
    fn from(text: &str) -> Self {
        Element::Text(text.to_string())
    }
}

impl From<Option<f64>> for Element {
    fn from(value: Option<f64>) -> Self {
        value.map_or(Element::Missing, Element::Number)
    }
}

/// Value of a named part in a [`QuaternionDescriptor::Named`] table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Field {
    Element(Element),
    List(Vec<Element>),
    Matrix(Vec<Vec<Element>>),
}

impl Field {
    fn to_real(&self) -> Result<f64, QuaternionError> {
        match self {
            Field::Element(element) => element.to_real(),
            _ => Err(QuaternionError::Type("a sequence cannot be interpreted as a real number".to_string())),
        }
    }

    fn to_real_or_zero(&self) -> Result<f64, QuaternionError> {
        match self {
            Field::Element(element) => element.to_real_or_zero(),
            _ => self.to_real(),
        }
    }

    /// A sequence of exactly `N` reals; missing means all zeros
    fn to_sequence<const N: usize>(&self) -> Result<[f64; N], QuaternionError> {
        match self {
            Field::Element(Element::Missing) => Ok([0.0; N]),
            Field::Element(_) => Err(QuaternionError::Value(format!(
                "expected a sequence of {} real numbers, got a single value",
                N
            ))),
            Field::List(elements) => sequence::<N>(elements),
            Field::Matrix(rows) => Err(QuaternionError::Value(format!(
                "Unexpected number of elements in sequence: expected {}, got {} rows",
                N,
                rows.len()
            ))),
        }
    }

    fn to_matrix(&self) -> Result<matrix::Mat3, QuaternionError> {
        match self {
            Field::Matrix(rows) => {
                let rows = rows
                    .iter()
                    .map(|row| row.iter().map(Element::to_real).collect())
                    .collect::<Result<Vec<Vec<f64>>, _>>()?;
                matrix::from_rows(&rows)
            }
            Field::Element(Element::Missing) => Err(QuaternionError::Type(
                "a missing value cannot be interpreted as a matrix".to_string(),
            )),
            _ => Err(QuaternionError::Value(
                "Invalid matrix shape: input must be a 3x3 or 4x4 matrix".to_string(),
            )),
        }
    }
}

impl From<f64> for Field {
    fn from(value: f64) -> Self {
        Field::Element(Element::Number(value))
    }
}

impl From<Vec<f64>> for Field {
    fn from(values: Vec<f64>) -> Self {
        Field::List(values.into_iter().map(Element::Number).collect())
    }
}

/// Convert every element, then check the length
fn sequence<const N: usize>(elements: &[Element]) -> Result<[f64; N], QuaternionError> {
    let values = elements
        .iter()
        .map(Element::to_real)
        .collect::<Result<Vec<f64>, _>>()?;
    fixed_length::<N>(&values)
}

/// Any of the accepted descriptions of a quaternion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QuaternionDescriptor {
    /// `(r, 0, 0, 0)`
    Scalar(Element),
    /// `(w, x, y, z)`; an empty list is the zero quaternion
    Sequence(Vec<Element>),
    /// Named parts; an empty table is the identity
    Named(BTreeMap<String, Field>),
}

impl QuaternionDescriptor {
    /// Build a table descriptor from `(name, value)` pairs
    pub fn named<K, V>(fields: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<Field>,
    {
        QuaternionDescriptor::Named(
            fields.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        )
    }

    /// Resolve the description to a quaternion
    pub fn resolve(&self) -> Result<Quaternion, QuaternionError> {
        match self {
            QuaternionDescriptor::Scalar(element) => {
                element.to_real().map(Quaternion::from_scalar)
            }
            QuaternionDescriptor::Sequence(elements) => {
                sequence::<4>(elements).map(Quaternion::from_array)
            }
            QuaternionDescriptor::Named(fields) => resolve_named(fields),
        }
    }
}

fn resolve_parts(
    fields: &BTreeMap<String, Field>,
    scalar_name: &str,
    vector_name: &str,
) -> Result<Quaternion, QuaternionError> {
    let scalar = match fields.get(scalar_name) {
        Some(field) => field.to_real_or_zero()?,
        None => 0.0,
    };
    let vector = match fields.get(vector_name) {
        Some(field) => field.to_sequence::<3>()?,
        None => [0.0; 3],
    };
    Ok(Quaternion::from_scalar_vector(scalar, vector))
}

fn resolve_named(fields: &BTreeMap<String, Field>) -> Result<Quaternion, QuaternionError> {
    if fields.is_empty() {
        return Ok(Quaternion::IDENTITY);
    }

    let has = |name: &str| fields.contains_key(name);

    if has("scalar") || has("vector") {
        return resolve_parts(fields, "scalar", "vector");
    }
    if has("real") || has("imaginary") {
        return resolve_parts(fields, "real", "imaginary");
    }
    if has("axis") || has("angle") {
        return match (fields.get("axis"), fields.get("angle")) {
            (Some(axis), Some(angle)) => {
                Quaternion::from_axis_angle(axis.to_sequence::<3>()?, angle.to_real()?)
            }
            _ => Err(QuaternionError::Value(
                "Both 'axis' and 'angle' must be provided to describe a meaningful rotation"
                    .to_string(),
            )),
        };
    }
    if let Some(array) = fields.get("array") {
        return array.to_sequence::<4>().map(Quaternion::from_array);
    }
    if let Some(matrix) = fields.get("matrix") {
        return Quaternion::from_rotation_matrix(&matrix.to_matrix()?);
    }

    // BTreeMap iterates in alphabetical order of the names
    let values = fields
        .values()
        .map(Field::to_real)
        .collect::<Result<Vec<f64>, _>>()?;
    if values.len() == 1 {
        Ok(Quaternion::from_scalar(values[0]))
    } else {
        Quaternion::from_slice(&values)
    }
}

impl TryFrom<&QuaternionDescriptor> for Quaternion {
    type Error = QuaternionError;

    fn try_from(descriptor: &QuaternionDescriptor) -> Result<Self, Self::Error> {
        descriptor.resolve()
    }
}

impl TryFrom<QuaternionDescriptor> for Quaternion {
    type Error = QuaternionError;

    fn try_from(descriptor: QuaternionDescriptor) -> Result<Self, Self::Error> {
        descriptor.resolve()
    }
}

impl From<Quaternion> for QuaternionDescriptor {
    fn from(q: Quaternion) -> Self {
        QuaternionDescriptor::Sequence(q.elements().into_iter().map(Element::Number).collect())
    }
}

impl Quaternion {
    /// Compare against a loosely-typed value, converting it first.
    ///
    /// Fails if the value cannot be converted.
    pub fn equals(&self, other: &QuaternionDescriptor) -> Result<bool, QuaternionError> {
        Ok(*self == other.resolve()?)
    }

    /// Assign a component from a loosely-typed value
    pub fn set_element(&mut self, index: isize, value: &Element) -> Result<(), QuaternionError> {
        self.set(index, value.to_real()?)
    }
}

/// Parses one token (a real quaternion) or four tokens `w x y z`.
///
/// The `i`, `j` and `k` suffixes of the default text form are accepted, so
/// `"1.000 +0.500i -0.250j +0.000k"` parses.
impl FromStr for Quaternion {
    type Err = QuaternionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens: Vec<&str> = s.split_whitespace().collect();
        match tokens.as_slice() {
            [scalar] => Ok(Quaternion::from_scalar(scalar.parse::<f64>()?)),
            [w, x, y, z] => Ok(Quaternion::new(
                w.parse::<f64>()?,
                x.strip_suffix('i').unwrap_or(*x).parse::<f64>()?,
                y.strip_suffix('j').unwrap_or(*y).parse::<f64>()?,
                z.strip_suffix('k').unwrap_or(*z).parse::<f64>()?,
            )),
            _ => Err(QuaternionError::Value(format!(
                "Unexpected number of elements in '{}': expected 1 or 4",
                s
            ))),
        }
    }
}
