use crate::airfoil::UnitVec2;
use ncollide2d::na::{Point2, Vector2};
use serde::{Serialize, Serializer};

#[derive(Serialize)]
#[serde(remote = "Point2<f64>")]
pub struct Point2f64 {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
#[serde(remote = "Vector2<f64>")]
pub struct Vector2f64 {
    x: f64,
    y: f64,
}

#[derive(Serialize)]
struct PointRef(#[serde(with = "Point2f64")] Point2<f64>);

/// Serializes a sequence of points as a list of `{x, y}` objects
pub fn points<S: Serializer>(points: &[Point2<f64>], serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_seq(points.iter().map(|p| PointRef(*p)))
}

pub fn unit_vector<S: Serializer>(v: &UnitVec2, serializer: S) -> Result<S::Ok, S::Error> {
    Vector2f64::serialize(&v.into_inner(), serializer)
}
