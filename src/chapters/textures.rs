use crate::app::{Chapter, ChapterContext, Frame};
use crate::error::Result;
use crate::mesh::Mesh;
use crate::shader::ShaderProgram;
use crate::texture::Texture;

// (x, y, z, u, v)
#[rustfmt::skip]
const QUAD: [f32; 20] = [
     0.5,  0.5, 0.0, 1.0, 1.0,
     0.5, -0.5, 0.0, 1.0, 0.0,
    -0.5, -0.5, 0.0, 0.0, 0.0,
    -0.5,  0.5, 0.0, 0.0, 1.0,
];

const QUAD_INDICES: [u32; 6] = [0, 1, 3, 1, 2, 3];

/// Two images on one quad, mixed in the fragment shader.
pub struct TexturesChapter {
    program: ShaderProgram,
    quad: Mesh,
    container: Texture,
    face: Texture,
}

impl Chapter for TexturesChapter {
    const TITLE: &'static str = "Textures";

    fn load(ctx: &ChapterContext) -> Result<Self> {
        let assets = &ctx.config.assets;
        let program = ShaderProgram::from_sources(
            include_str!("../shaders/textures.vert"),
            include_str!("../shaders/textures.frag"),
        )?;
        super::bind_sampler_units(&program);

        Ok(TexturesChapter {
            program,
            quad: Mesh::new(&QUAD, &[3, 2], Some(&QUAD_INDICES)),
            container: Texture::from_file(assets.path(&assets.container))?,
            face: Texture::from_file(assets.path(&assets.face))?,
        })
    }

    fn render(&mut self, _frame: &Frame) {
        self.program.use_program();
        self.container.bind(0);
        self.face.bind(1);
        self.quad.draw();
    }
}
