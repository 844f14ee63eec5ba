//! CPU 端网格数据
//!
//! 只负责生成顶点/索引数据，上传到 GPU 由外部渲染后端完成。

#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct VertexPX {
    pub pos: [f32; 3],
    pub uv: [f32; 2],
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct MeshData {
    pub vertices: Vec<VertexPX>,
    pub indices: Vec<u32>,
}

impl MeshData {
    /// 顶点数据的原始字节，供渲染后端上传
    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

pub struct MeshBuilder;

impl MeshBuilder {
    /// 以原点为中心、边长为 2 的四边形（XY 平面）
    pub fn screen_quad() -> MeshData {
        let vertices = vec![
            VertexPX { pos: [-1.0, 1.0, 0.0], uv: [0.0, 0.0] },
            VertexPX { pos: [1.0, 1.0, 0.0], uv: [1.0, 0.0] },
            VertexPX { pos: [1.0, -1.0, 0.0], uv: [1.0, 1.0] },
            VertexPX { pos: [-1.0, -1.0, 0.0], uv: [0.0, 1.0] },
        ];
        let indices = vec![0, 1, 2, 0, 2, 3];
        MeshData { vertices, indices }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_quad() {
        let quad = MeshBuilder::screen_quad();
        assert_eq!(quad.vertices.len(), 4);
        assert_eq!(quad.index_count(), 6);
        assert!(quad.indices.iter().all(|&i| (i as usize) < quad.vertices.len()));
        assert_eq!(quad.vertex_bytes().len(), 4 * std::mem::size_of::<VertexPX>());
        assert_eq!(quad.index_bytes().len(), 6 * 4);
    }
}
