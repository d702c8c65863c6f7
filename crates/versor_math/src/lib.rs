//! Quaternion Mathematics Library
//!
//! This crate provides a quaternion value type for representing 3D rotations.
//!
//! ## Core Types
//!
//! - [`Quaternion`] - `w + xi + yj + zk`, with Hamilton-product arithmetic
//! - [`Vec3`] - 3D vector for axes and vector parts
//! - [`QuaternionError`] - Type, value, division-by-zero and index errors
//!
//! ## Rotations
//!
//! - Axis-angle and rotation-matrix factories, with the inverse conversions
//! - [`Rotatable`] - Vectors a quaternion can rotate, shape-preserving
//! - [`Intermediates`] - Evenly spaced slerp between two rotations
//!
//! ## Loosely-typed Input
//!
//! - [`QuaternionDescriptor`] - Deserializable description (number, list, or named parts)

mod error;
mod vec3;
mod quaternion;
mod ops;
mod rotation;
mod interpolate;
pub mod matrix;
pub mod descriptor;

pub use error::QuaternionError;
pub use vec3::Vec3;
pub use quaternion::{Quaternion, EQUALITY_ATOL, EQUALITY_RTOL, UNIT_TOLERANCE};
pub use rotation::{wrap_angle, Rotatable};
pub use interpolate::Intermediates;
pub use matrix::{Mat3, Mat4};
pub use descriptor::{Element, Field, QuaternionDescriptor};
