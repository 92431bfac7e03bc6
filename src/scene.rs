use crate::core::{EmissionOptions, Shading, SurfaceAttributes};
use crate::error::{Error, Result};
use crate::primitives::{triangulate, MaterialBlock, MeshModel, Triangle, Triangles};
use itertools::Itertools;
use log::{debug, warn};
use nalgebra::{Point3, Vector3};
use std::fmt;
use std::io::Write;
use std::iter::FusedIterator;
use std::slice::Iter;

fn format_point(point: &Point3<f32>) -> String {
    point.coords.iter().join(" ")
}

fn format_color(color: &Vector3<f32>) -> String {
    color.iter().join(" ")
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ShadedTriangle {
    pub triangle: Triangle,
    pub surface: SurfaceAttributes,
}

impl fmt::Display for ShadedTriangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let surface = &self.surface;

        write!(
            f,
            "triangle a {} b {} c {} color {} specular {}",
            format_point(self.triangle.a()),
            format_point(self.triangle.b()),
            format_point(self.triangle.c()),
            format_color(&surface.color),
            surface.specular
        )?;
        if let Some(specular_color) = &surface.specular_color {
            write!(f, " color {}", format_color(specular_color))?;
        }
        write!(
            f,
            " shininess {} opacity {} reflectiveness {:?}",
            surface.shininess, surface.opacity, surface.reflectiveness
        )
    }
}

/// One line of the scene description.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum SceneRecord<'a> {
    Comment(&'a str),
    Triangle(ShadedTriangle),
}

impl fmt::Display for SceneRecord<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SceneRecord::Comment(name) => write!(f, "// {}", name),
            SceneRecord::Triangle(triangle) => write!(f, "{}", triangle),
        }
    }
}

/// Lazily walks the model material by material. The first material that cannot be
/// triangulated is reported once and ends the sequence.
#[derive(Clone, Debug)]
pub struct Records<'a> {
    shading: Shading,
    materials: Iter<'a, MaterialBlock>,
    current: Option<(Triangles<'a>, SurfaceAttributes)>,
    finished: bool,
}

impl<'a> Iterator for Records<'a> {
    type Item = Result<SceneRecord<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }

        if let Some((triangles, surface)) = self.current.as_mut() {
            if let Some(triangle) = triangles.next() {
                return Some(Ok(SceneRecord::Triangle(ShadedTriangle {
                    triangle,
                    surface: *surface,
                })));
            }
        }
        self.current = None;

        let material = match self.materials.next() {
            Some(material) => material,
            None => {
                self.finished = true;
                return None;
            }
        };

        match triangulate(material) {
            Ok(triangles) => {
                debug!(
                    "material \"{}\": {} triangles",
                    material.name,
                    triangles.len()
                );
                self.current = Some((triangles, self.shading.surface(material)));
                Some(Ok(SceneRecord::Comment(&material.name)))
            }
            Err(err) => {
                self.finished = true;
                Some(Err(err))
            }
        }
    }
}

impl FusedIterator for Records<'_> {}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EmitSummary {
    pub materials: usize,
    pub triangles: usize,
    /// Material that stopped emission, if any.
    pub aborted_at: Option<String>,
}

#[derive(Debug)]
pub struct SceneConverter<'a> {
    model: &'a MeshModel,
    shading: Shading,
}

impl<'a> SceneConverter<'a> {
    pub fn new(model: &'a MeshModel, options: &EmissionOptions) -> Self {
        Self {
            model,
            shading: Shading::from(options),
        }
    }

    pub fn shading(&self) -> &Shading {
        &self.shading
    }

    pub fn records(&self) -> Records<'a> {
        Records {
            shading: self.shading,
            materials: self.model.materials().iter(),
            current: None,
            finished: false,
        }
    }

    pub fn write_scene<W: Write>(&self, writer: &mut W) -> Result<EmitSummary> {
        let mut summary = EmitSummary::default();

        for record in self.records() {
            match record {
                Ok(record) => {
                    match record {
                        SceneRecord::Comment(_) => summary.materials += 1,
                        SceneRecord::Triangle(_) => summary.triangles += 1,
                    }
                    writeln!(writer, "{}", record)?;
                }
                Err(err) => {
                    let material = match &err {
                        Error::UnsupportedLayout { material, .. }
                        | Error::MalformedVertexCount { material, .. } => material.clone(),
                        _ => return Err(err),
                    };
                    warn!("{}, skipping remaining materials", err);
                    summary.aborted_at = Some(material);
                }
            }
        }
        writer.flush()?;

        Ok(summary)
    }

    pub fn to_scene_string(&self) -> Result<(String, EmitSummary)> {
        let mut buffer = Vec::new();
        let summary = self.write_scene(&mut buffer)?;

        Ok((String::from_utf8_lossy(&buffer).into_owned(), summary))
    }
}
