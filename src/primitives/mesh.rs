use crate::error::Result;
use log::{debug, warn};
use nalgebra::{Vector3, Vector4};
use std::fmt;
use std::iter;
use std::path::Path;
use tobj::load_obj;

/// Name given to faces that never select a material.
pub const DEFAULT_MATERIAL: &str = "default";

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum VertexLayout {
    #[default]
    PositionOnly,
    NormalPosition,
    TexcoordPosition,
    TexcoordNormalPosition,
}

impl VertexLayout {
    pub fn new(has_texcoords: bool, has_normals: bool) -> Self {
        match (has_texcoords, has_normals) {
            (false, false) => VertexLayout::PositionOnly,
            (false, true) => VertexLayout::NormalPosition,
            (true, false) => VertexLayout::TexcoordPosition,
            (true, true) => VertexLayout::TexcoordNormalPosition,
        }
    }

    fn of_mesh(mesh: &tobj::Mesh) -> Self {
        Self::new(!mesh.texcoords.is_empty(), !mesh.normals.is_empty())
    }

    pub fn has_texcoords(self) -> bool {
        matches!(
            self,
            VertexLayout::TexcoordPosition | VertexLayout::TexcoordNormalPosition
        )
    }

    pub fn has_normals(self) -> bool {
        matches!(
            self,
            VertexLayout::NormalPosition | VertexLayout::TexcoordNormalPosition
        )
    }

    pub fn union(self, other: VertexLayout) -> Self {
        Self::new(
            self.has_texcoords() || other.has_texcoords(),
            self.has_normals() || other.has_normals(),
        )
    }

    pub fn components_per_vertex(self) -> usize {
        let mut components = 3;
        if self.has_texcoords() {
            components += 2;
        }
        if self.has_normals() {
            components += 3;
        }

        components
    }

    pub fn tag(self) -> &'static str {
        match self {
            VertexLayout::PositionOnly => "V3F",
            VertexLayout::NormalPosition => "N3F_V3F",
            VertexLayout::TexcoordPosition => "T2F_V3F",
            VertexLayout::TexcoordNormalPosition => "T2F_N3F_V3F",
        }
    }
}

impl fmt::Display for VertexLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct MaterialBlock {
    pub name: String,
    pub layout: VertexLayout,
    pub vertices: Vec<f32>,
    pub diffuse: Vector3<f32>,
    /// RGB plus an intensity component.
    pub specular: Vector4<f32>,
    pub shininess: f32,
    /// Written out as opacity, unconverted.
    pub transparency: f32,
}

impl Default for MaterialBlock {
    fn default() -> Self {
        Self {
            name: DEFAULT_MATERIAL.to_string(),
            layout: VertexLayout::default(),
            vertices: Vec::new(),
            diffuse: Vector3::repeat(0.8),
            specular: Vector4::new(0.0, 0.0, 0.0, 1.0),
            shininess: 0.0,
            transparency: 1.0,
        }
    }
}

impl From<&tobj::Material> for MaterialBlock {
    fn from(material: &tobj::Material) -> Self {
        let [r, g, b] = material.specular;

        Self {
            name: material.name.clone(),
            layout: VertexLayout::default(),
            vertices: Vec::new(),
            diffuse: Vector3::from(material.diffuse),
            specular: Vector4::new(r, g, b, 0.0),
            shininess: material.shininess,
            transparency: material.dissolve,
        }
    }
}

impl MaterialBlock {
    pub fn new(name: &str, vertices: Vec<f32>) -> Self {
        Self {
            name: name.to_string(),
            vertices,
            ..MaterialBlock::default()
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.vertices.len() / self.layout.components_per_vertex()
    }

    fn append_mesh(&mut self, mesh: &tobj::Mesh) {
        let components = self.layout.components_per_vertex();
        self.vertices.reserve(mesh.indices.len() * components);

        for &index in &mesh.indices {
            let index = index as usize;

            if self.layout.has_texcoords() {
                self.append_attribute(&mesh.texcoords, index, 2);
            }
            if self.layout.has_normals() {
                self.append_attribute(&mesh.normals, index, 3);
            }
            self.append_attribute(&mesh.positions, index, 3);
        }
    }

    /// Faces without the attribute (or a short attribute buffer) get zeros.
    fn append_attribute(&mut self, data: &[f32], index: usize, width: usize) {
        match data.get(index * width..(index + 1) * width) {
            Some(values) => self.vertices.extend_from_slice(values),
            None => self.vertices.extend(iter::repeat(0.0).take(width)),
        }
    }
}

/// Materials in declaration order, each holding the de-indexed vertices of its faces.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshModel {
    materials: Vec<MaterialBlock>,
}

impl MeshModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_material(&mut self, material: MaterialBlock) {
        self.materials.push(material)
    }

    pub fn materials(&self) -> &[MaterialBlock] {
        &self.materials
    }

    pub fn get(&self, name: &str) -> Option<&MaterialBlock> {
        self.materials.iter().find(|material| material.name == name)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let (models, materials) = load_obj(path, &load_options())?;
        let materials = materials.unwrap_or_else(|err| {
            warn!(
                "failed to load materials for {}: {}, using defaults",
                path.display(),
                err
            );
            Vec::new()
        });

        Ok(Self::from_tobj(&models, &materials))
    }

    pub fn from_tobj(models: &[tobj::Model], materials: &[tobj::Material]) -> Self {
        let mut blocks: Vec<MaterialBlock> = materials.iter().map(MaterialBlock::from).collect();

        let fallback = blocks.len();
        blocks.push(MaterialBlock::default());
        let target = |model: &tobj::Model| match model.mesh.material_id {
            Some(id) if id < fallback => id,
            _ => fallback,
        };

        for model in models {
            let block = &mut blocks[target(model)];
            block.layout = block.layout.union(VertexLayout::of_mesh(&model.mesh));
        }
        for model in models {
            debug!(
                "model \"{}\": {} faces",
                model.name,
                model.mesh.indices.len() / 3
            );
            blocks[target(model)].append_mesh(&model.mesh);
        }
        for block in &blocks {
            debug!(
                "material \"{}\": {} vertices, layout {}",
                block.name,
                block.vertex_count(),
                block.layout
            );
        }

        if !models.iter().any(|model| target(model) == fallback) {
            blocks.pop();
        }

        Self { materials: blocks }
    }
}

pub fn load_options() -> tobj::LoadOptions {
    tobj::LoadOptions {
        single_index: true,
        triangulate: true,
        ignore_points: true,
        ignore_lines: true,
        ..Default::default()
    }
}
