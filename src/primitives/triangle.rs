use super::{MaterialBlock, VertexLayout};
use crate::error::{Error, Result};
use itertools::Itertools;
use nalgebra::Point3;
use std::slice::ChunksExact;

pub const FLOATS_PER_TRIANGLE: usize = 9;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Triangle {
    pub positions: [Point3<f32>; 3],
}

impl Triangle {
    pub fn new(positions: [Point3<f32>; 3]) -> Self {
        Self { positions }
    }

    pub fn a(&self) -> &Point3<f32> {
        &self.positions[0]
    }

    pub fn b(&self) -> &Point3<f32> {
        &self.positions[1]
    }

    pub fn c(&self) -> &Point3<f32> {
        &self.positions[2]
    }
}

/// Consecutive vertex triples of a position-only buffer, three at a time.
#[derive(Clone, Debug)]
pub struct Triangles<'a> {
    vertices: ChunksExact<'a, f32>,
}

impl<'a> Iterator for Triangles<'a> {
    type Item = Triangle;

    fn next(&mut self) -> Option<Self::Item> {
        let (a, b, c) = self.vertices.next_tuple()?;

        Some(Triangle::new([to_point(a), to_point(b), to_point(c)]))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.vertices.len() / 3;
        (len, Some(len))
    }
}

impl ExactSizeIterator for Triangles<'_> {}

fn to_point(vertex: &[f32]) -> Point3<f32> {
    Point3::new(vertex[0], vertex[1], vertex[2])
}

pub fn triangulate(material: &MaterialBlock) -> Result<Triangles<'_>> {
    if material.layout != VertexLayout::PositionOnly {
        return Err(Error::UnsupportedLayout {
            material: material.name.clone(),
            layout: material.layout.to_string(),
        });
    }

    let count = material.vertices.len();
    if count % FLOATS_PER_TRIANGLE != 0 {
        return Err(Error::MalformedVertexCount {
            material: material.name.clone(),
            count,
        });
    }

    Ok(Triangles {
        vertices: material.vertices.chunks_exact(3),
    })
}
