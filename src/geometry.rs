//! # Geometry Adapter Contract
//!
//! The codecs do not do geometry. They only pull ordered coordinates out of
//! whatever the caller hands them. Anything that can list 2 or 3 numbers is
//! [`PointLike`]; anything that can list such points is [`LineLike`]. A
//! polygon contributes only its outer boundary.

/// A single position exposing its ordered coordinates, `(x, y)` or `(x, y, z)`.
pub trait PointLike {
    fn coords(&self) -> Vec<f64>;
}

impl PointLike for (f64, f64) {
    fn coords(&self) -> Vec<f64> {
        vec![self.0, self.1]
    }
}

impl PointLike for (f64, f64, f64) {
    fn coords(&self) -> Vec<f64> {
        vec![self.0, self.1, self.2]
    }
}

impl<const N: usize> PointLike for [f64; N] {
    fn coords(&self) -> Vec<f64> {
        self.to_vec()
    }
}

impl PointLike for [f64] {
    fn coords(&self) -> Vec<f64> {
        self.to_vec()
    }
}

impl PointLike for Vec<f64> {
    fn coords(&self) -> Vec<f64> {
        self.clone()
    }
}

/// An ordered sequence of points: a line string or a ring.
pub trait LineLike {
    fn points(&self) -> Vec<Vec<f64>>;
}

impl<P: PointLike> LineLike for [P] {
    fn points(&self) -> Vec<Vec<f64>> {
        self.iter().map(PointLike::coords).collect()
    }
}

impl<P: PointLike> LineLike for Vec<P> {
    fn points(&self) -> Vec<Vec<f64>> {
        self.as_slice().points()
    }
}

/// A polygon with an outer boundary and optional holes.
///
/// Only the exterior ring is ever consumed.
#[derive(Clone, Debug, PartialEq)]
pub struct Polygon<P> {
    pub exterior: Vec<P>,
    pub interiors: Vec<Vec<P>>,
}

impl<P> Polygon<P> {
    pub fn new(exterior: Vec<P>) -> Self {
        Polygon {
            exterior,
            interiors: Vec::new(),
        }
    }
}

impl<P: PointLike> LineLike for Polygon<P> {
    fn points(&self) -> Vec<Vec<f64>> {
        self.exterior.points()
    }
}
