use crate::assets::registry::TextureTable;
use crate::components::entity::Entity;
use crate::renderer::instance::{RenderBuffer, RenderInstance};

/// Build the render buffer from a set of entities: one instance per mesh,
/// in entity order, with every mesh sharing its entity's model matrix.
/// Texture paths are interned into `textures` as they are first seen.
pub fn build_render_buffer<'a>(
    entities: impl Iterator<Item = &'a Entity>,
    textures: &mut TextureTable,
    buffer: &mut RenderBuffer,
) {
    buffer.clear();

    for entity in entities {
        let model = entity.transform.matrix().to_cols_array_2d();
        entity.model.for_each_mesh(&mut |mesh| {
            let material = &mesh.material;
            let color = material.color();
            buffer.push(RenderInstance {
                model,
                color: [color.r, color.g, color.b, material.opacity()],
                emissive: material.emissive().to_array(),
                lit: if material.is_lit() { 1.0 } else { 0.0 },
                geometry: mesh.geometry.as_f32(),
                map: textures.slot(material.map()) as f32,
                normal_map: textures.slot(material.normal_map()) as f32,
                _pad: 0.0,
            });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::types::{EntityId, GeometryId};
    use crate::components::material::{BasicMaterial, Color, Material, StandardMaterial, TextureRef};
    use crate::components::mesh::{Mesh, Node};
    use glam::Vec3;

    #[test]
    fn one_instance_per_mesh() {
        let model = Node::group("saturn")
            .with_child(Node::from_mesh("body", Mesh::new(GeometryId(1), Material::default())))
            .with_child(Node::from_mesh("rings", Mesh::new(GeometryId(2), Material::default())));
        let entities = vec![
            Entity::new(EntityId(1)).with_model(model),
            Entity::new(EntityId(2)),
        ];

        let mut textures = TextureTable::new();
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut textures, &mut buffer);

        assert_eq!(buffer.instance_count(), 2);
        assert_eq!(buffer.instances[1].geometry, 2.0);
    }

    #[test]
    fn instance_carries_transform_and_material() {
        let material = Material::Basic(
            BasicMaterial::textured(TextureRef::new("moon.jpeg"))
                .with_normal_map(TextureRef::new("crater.jpeg")),
        );
        let entities = vec![Entity::new(EntityId(1))
            .with_tag("moon")
            .with_mesh(Mesh::new(GeometryId(0), material))
            .with_pos(Vec3::new(-10.0, 0.0, 30.0))];

        let mut textures = TextureTable::new();
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut textures, &mut buffer);

        let inst = buffer.instances[0];
        assert_eq!(inst.model[3], [-10.0, 0.0, 30.0, 1.0]);
        assert_eq!(inst.map, 1.0);
        assert_eq!(inst.normal_map, 2.0);
        assert_eq!(inst.lit, 1.0);
        assert_eq!(textures.get("crater.jpeg"), Some(2));
    }

    #[test]
    fn untextured_star_has_no_texture_ids() {
        let material = Material::Standard(StandardMaterial::default().with_color(Color::WHITE));
        let entities = vec![Entity::new(EntityId(1)).with_mesh(Mesh::new(GeometryId(0), material))];

        let mut textures = TextureTable::new();
        let mut buffer = RenderBuffer::new();
        build_render_buffer(entities.iter(), &mut textures, &mut buffer);

        let inst = buffer.instances[0];
        assert_eq!(inst.map, 0.0);
        assert_eq!(inst.normal_map, 0.0);
        assert_eq!(inst.color, [1.0, 1.0, 1.0, 1.0]);
        assert!(textures.is_empty());
    }
}
