use crate::camera::Camera;
use crate::error::{EditorError, Result};
use crate::render::scene::RectInstance;
use crate::tile::Rect;
use glow::*;
use std::mem;
use std::sync::Arc;

const RECT_VERTEX_SHADER_SRC: &str = r#"#version 330 core
layout (location = 0) in vec2 aPos;
layout (location = 1) in vec4 aRect;        // min.xy, size.xy
layout (location = 2) in vec4 aFill;
layout (location = 3) in vec4 aBorder;
layout (location = 4) in vec2 aShape;       // radius, border width

uniform mat4 uProjection;

out vec2 vLocal;
out vec2 vSize;
out vec4 vFill;
out vec4 vBorder;
out vec2 vShape;

void main() {
    vLocal = aPos * aRect.zw;
    vSize = aRect.zw;
    vFill = aFill;
    vBorder = aBorder;
    vShape = aShape;
    gl_Position = uProjection * vec4(aRect.xy + vLocal, 0.0, 1.0);
}
"#;

const RECT_FRAGMENT_SHADER_SRC: &str = r#"#version 330 core
in vec2 vLocal;
in vec2 vSize;
in vec4 vFill;
in vec4 vBorder;
in vec2 vShape;

out vec4 FragColor;

float roundedBox(vec2 p, vec2 halfSize, float r) {
    vec2 q = abs(p) - halfSize + vec2(r);
    return length(max(q, 0.0)) + min(max(q.x, q.y), 0.0) - r;
}

void main() {
    vec2 halfSize = vSize * 0.5;
    float radius = min(vShape.x, min(halfSize.x, halfSize.y));
    float d = roundedBox(vLocal - halfSize, halfSize, radius);
    float aa = max(fwidth(d), 1e-4);

    float outer = 1.0 - smoothstep(-aa, aa, d);
    float inner = vShape.y > 0.0 ? 1.0 - smoothstep(-aa, aa, d + vShape.y) : outer;

    float fillAlpha = vFill.a * inner;
    float borderAlpha = vBorder.a * max(outer - inner, 0.0);
    float alpha = fillAlpha + borderAlpha;
    if (alpha <= 0.0) {
        discard;
    }
    vec3 rgb = (vFill.rgb * fillAlpha + vBorder.rgb * borderAlpha) / alpha;
    FragColor = vec4(rgb, alpha);
}
"#;

const SPRITE_VERTEX_SHADER_SRC: &str = r#"#version 330 core
layout (location = 0) in vec2 aPos;

uniform mat4 uProjection;
uniform vec4 uRect;

out vec2 vUv;

void main() {
    vUv = aPos;
    gl_Position = uProjection * vec4(uRect.xy + aPos * uRect.zw, 0.0, 1.0);
}
"#;

const SPRITE_FRAGMENT_SHADER_SRC: &str = r#"#version 330 core
in vec2 vUv;
out vec4 FragColor;

uniform sampler2D uTexture;

void main() {
    FragColor = texture(uTexture, vUv);
}
"#;

/// Floats per rect instance: rect(4) + fill(4) + border(4) + shape(2)
const RECT_INSTANCE_FLOATS: usize = 14;

/// A textured quad
#[derive(Debug, Clone, Copy)]
pub struct SpriteDraw {
    pub rect: Rect,
    pub texture: glow::Texture,
}

pub struct Renderer {
    gl: Arc<glow::Context>,
    // Rounded rect rendering
    rect_program: NativeProgram,
    rect_vao: NativeVertexArray,
    quad_vbo: NativeBuffer,
    instance_vbo: NativeBuffer,
    rect_projection_loc: NativeUniformLocation,
    // Sprite rendering
    sprite_program: NativeProgram,
    sprite_vao: NativeVertexArray,
    sprite_projection_loc: NativeUniformLocation,
    sprite_rect_loc: NativeUniformLocation,
    sprite_texture_loc: NativeUniformLocation,
}

unsafe fn compile_program(gl: &glow::Context, vertex_src: &str, fragment_src: &str, name: &str) -> Result<NativeProgram> {
    let vertex_shader = gl
        .create_shader(VERTEX_SHADER)
        .map_err(|e| EditorError::Shader(format!("Failed to create {name} vertex shader: {e}")))?;
    gl.shader_source(vertex_shader, vertex_src);
    gl.compile_shader(vertex_shader);
    if !gl.get_shader_compile_status(vertex_shader) {
        return Err(EditorError::Shader(gl.get_shader_info_log(vertex_shader)));
    }

    let fragment_shader = gl
        .create_shader(FRAGMENT_SHADER)
        .map_err(|e| EditorError::Shader(format!("Failed to create {name} fragment shader: {e}")))?;
    gl.shader_source(fragment_shader, fragment_src);
    gl.compile_shader(fragment_shader);
    if !gl.get_shader_compile_status(fragment_shader) {
        return Err(EditorError::Shader(gl.get_shader_info_log(fragment_shader)));
    }

    let program = gl
        .create_program()
        .map_err(|e| EditorError::Shader(format!("Failed to create {name} program: {e}")))?;
    gl.attach_shader(program, vertex_shader);
    gl.attach_shader(program, fragment_shader);
    gl.link_program(program);
    if !gl.get_program_link_status(program) {
        return Err(EditorError::Shader(gl.get_program_info_log(program)));
    }

    gl.delete_shader(vertex_shader);
    gl.delete_shader(fragment_shader);
    Ok(program)
}

unsafe fn uniform(gl: &glow::Context, program: NativeProgram, name: &str) -> Result<NativeUniformLocation> {
    gl.get_uniform_location(program, name)
        .ok_or_else(|| EditorError::Shader(format!("Failed to get {name} uniform location")))
}

impl Renderer {
    pub fn new(gl: Arc<glow::Context>) -> Result<Self> {
        unsafe {
            let rect_program = compile_program(&gl, RECT_VERTEX_SHADER_SRC, RECT_FRAGMENT_SHADER_SRC, "rect")?;
            let rect_projection_loc = uniform(&gl, rect_program, "uProjection")?;

            let sprite_program =
                compile_program(&gl, SPRITE_VERTEX_SHADER_SRC, SPRITE_FRAGMENT_SHADER_SRC, "sprite")?;
            let sprite_projection_loc = uniform(&gl, sprite_program, "uProjection")?;
            let sprite_rect_loc = uniform(&gl, sprite_program, "uRect")?;
            let sprite_texture_loc = uniform(&gl, sprite_program, "uTexture")?;

            // Unit quad (0,0 to 1,1); y grows down in world space
            let vertices: [f32; 12] = [
                0.0, 0.0, // top-left
                1.0, 0.0, // top-right
                1.0, 1.0, // bottom-right
                0.0, 0.0, // top-left
                1.0, 1.0, // bottom-right
                0.0, 1.0, // bottom-left
            ];

            let quad_vbo = gl
                .create_buffer()
                .map_err(|e| EditorError::Gl(format!("Failed to create VBO: {e}")))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(quad_vbo));
            gl.buffer_data_u8_slice(ARRAY_BUFFER, as_u8_slice(&vertices), STATIC_DRAW);

            // Rect VAO: shared quad + per-instance attributes
            let rect_vao = gl
                .create_vertex_array()
                .map_err(|e| EditorError::Gl(format!("Failed to create VAO: {e}")))?;
            gl.bind_vertex_array(Some(rect_vao));

            gl.bind_buffer(ARRAY_BUFFER, Some(quad_vbo));
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, FLOAT, false, 8, 0);

            let instance_vbo = gl
                .create_buffer()
                .map_err(|e| EditorError::Gl(format!("Failed to create instance VBO: {e}")))?;
            gl.bind_buffer(ARRAY_BUFFER, Some(instance_vbo));

            let stride = (RECT_INSTANCE_FLOATS * mem::size_of::<f32>()) as i32;
            // (location, components, float offset)
            for (location, size, offset) in [(1, 4, 0), (2, 4, 4), (3, 4, 8), (4, 2, 12)] {
                gl.enable_vertex_attrib_array(location);
                gl.vertex_attrib_pointer_f32(location, size, FLOAT, false, stride, offset * 4);
                gl.vertex_attrib_divisor(location, 1);
            }

            gl.bind_vertex_array(None);

            // Sprite VAO: quad only
            let sprite_vao = gl
                .create_vertex_array()
                .map_err(|e| EditorError::Gl(format!("Failed to create sprite VAO: {e}")))?;
            gl.bind_vertex_array(Some(sprite_vao));
            gl.bind_buffer(ARRAY_BUFFER, Some(quad_vbo));
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(0, 2, FLOAT, false, 8, 0);
            gl.bind_vertex_array(None);

            Ok(Self {
                gl,
                rect_program,
                rect_vao,
                quad_vbo,
                instance_vbo,
                rect_projection_loc,
                sprite_program,
                sprite_vao,
                sprite_projection_loc,
                sprite_rect_loc,
                sprite_texture_loc,
            })
        }
    }

    /// Restore the GL state this renderer expects; egui leaves its own behind
    pub fn begin_frame(&self) {
        unsafe {
            self.gl.disable(SCISSOR_TEST);
            self.gl.disable(DEPTH_TEST);
            self.gl.disable(CULL_FACE);
            self.gl.enable(BLEND);
            self.gl.blend_func(SRC_ALPHA, ONE_MINUS_SRC_ALPHA);
        }
    }

    /// Draw one layer of rounded rects
    pub fn render_rects(&self, camera: &Camera, rects: &[RectInstance]) {
        if rects.is_empty() {
            return;
        }

        let mut instance_data = Vec::with_capacity(rects.len() * RECT_INSTANCE_FLOATS);
        for r in rects {
            let size = r.rect.size();
            instance_data.extend_from_slice(&[
                r.rect.min.x,
                r.rect.min.y,
                size.x,
                size.y,
                r.fill.x,
                r.fill.y,
                r.fill.z,
                r.fill.w,
                r.border_color.x,
                r.border_color.y,
                r.border_color.z,
                r.border_color.w,
                r.radius,
                r.border_width,
            ]);
        }

        unsafe {
            self.gl.use_program(Some(self.rect_program));
            self.gl.bind_vertex_array(Some(self.rect_vao));

            self.gl.bind_buffer(ARRAY_BUFFER, Some(self.instance_vbo));
            self.gl
                .buffer_data_u8_slice(ARRAY_BUFFER, as_u8_slice(&instance_data), DYNAMIC_DRAW);

            let projection = camera.projection_matrix();
            self.gl
                .uniform_matrix_4_f32_slice(Some(&self.rect_projection_loc), false, projection.as_ref());

            self.gl.draw_arrays_instanced(TRIANGLES, 0, 6, rects.len() as i32);
            self.gl.bind_vertex_array(None);
        }
    }

    /// Draw textured quads, one draw call each
    pub fn render_sprites(&self, camera: &Camera, sprites: &[SpriteDraw]) {
        if sprites.is_empty() {
            return;
        }

        unsafe {
            self.gl.use_program(Some(self.sprite_program));
            self.gl.bind_vertex_array(Some(self.sprite_vao));

            let projection = camera.projection_matrix();
            self.gl
                .uniform_matrix_4_f32_slice(Some(&self.sprite_projection_loc), false, projection.as_ref());
            self.gl.uniform_1_i32(Some(&self.sprite_texture_loc), 0);
            self.gl.active_texture(TEXTURE0);

            for sprite in sprites {
                let size = sprite.rect.size();
                self.gl.uniform_4_f32(
                    Some(&self.sprite_rect_loc),
                    sprite.rect.min.x,
                    sprite.rect.min.y,
                    size.x,
                    size.y,
                );
                self.gl.bind_texture(TEXTURE_2D, Some(sprite.texture));
                self.gl.draw_arrays(TRIANGLES, 0, 6);
            }

            self.gl.bind_texture(TEXTURE_2D, None);
            self.gl.bind_vertex_array(None);
        }
    }
}

impl Drop for Renderer {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_program(self.rect_program);
            self.gl.delete_vertex_array(self.rect_vao);
            self.gl.delete_buffer(self.quad_vbo);
            self.gl.delete_buffer(self.instance_vbo);
            self.gl.delete_program(self.sprite_program);
            self.gl.delete_vertex_array(self.sprite_vao);
        }
    }
}

fn as_u8_slice<T>(data: &[T]) -> &[u8] {
    unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, mem::size_of_val(data)) }
}
